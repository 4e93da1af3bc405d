use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use innkeeper_agent::{AgentRuntime, OpenAiChatClient};
use innkeeper_core::booking::{ReservationStore, ThreadRngSource};
use innkeeper_core::config::{AppConfig, ConfigError, LoadOptions};
use innkeeper_core::fixtures::{FixtureError, FixtureStore};
use innkeeper_core::shop::ShopCatalog;

pub struct Application {
    pub config: AppConfig,
    pub fixtures: FixtureStore,
    pub shop: Arc<ShopCatalog>,
    pub reservations: Arc<ReservationStore>,
    pub agent: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fixtures(#[from] FixtureError),
    #[error("language-model client setup failed: {0}")]
    Llm(#[source] anyhow::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Wires the application from an already-loaded config. Fixture problems
/// abort here, before any listener binds.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let fixtures = FixtureStore::load(config.fixtures.data_dir.as_deref())?;
    info!(
        event_name = "system.bootstrap.fixtures_loaded",
        document_count = fixtures.document_count(),
        "canned documents ready"
    );

    if config.llm.api_key.is_none() {
        warn!(
            "no language-model API key configured; the reservation agent will only return its \
             connectivity apology"
        );
    }

    let shop = Arc::new(ShopCatalog::new(&fixtures));
    let reservations = Arc::new(ReservationStore::new(
        &fixtures,
        Arc::new(ThreadRngSource),
        config.booking.failure_rate,
    ));

    let llm = OpenAiChatClient::new(
        &config.llm.base_url,
        config.llm.api_key.clone(),
        &config.llm.model,
        Duration::from_secs(config.llm.timeout_secs),
    )
    .map_err(BootstrapError::Llm)?;
    let agent = Arc::new(AgentRuntime::new(Arc::new(llm), Arc::clone(&shop)));

    info!(event_name = "system.bootstrap.ready", "application bootstrap complete");
    Ok(Application { config, fixtures, shop, reservations, agent })
}
