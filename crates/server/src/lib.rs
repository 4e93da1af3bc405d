use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod agent;
pub mod book;
pub mod bootstrap;
pub mod context;
pub mod error;
pub mod health;
pub mod shop;

pub use bootstrap::{bootstrap, bootstrap_with_config, Application, BootstrapError};

/// Composes the full HTTP surface from a bootstrapped application.
pub fn app(application: &Application) -> Router {
    Router::new()
        .merge(shop::router(Arc::clone(&application.shop)))
        .merge(book::router(Arc::clone(&application.reservations)))
        .merge(agent::router(Arc::clone(&application.agent)))
        .merge(health::router(application.fixtures.clone(), Arc::clone(&application.reservations)))
        .layer(TraceLayer::new_for_http())
}
