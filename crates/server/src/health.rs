use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use innkeeper_core::booking::ReservationStore;
use innkeeper_core::fixtures::FixtureStore;

#[derive(Clone)]
pub struct HealthState {
    fixtures: FixtureStore,
    reservations: Arc<ReservationStore>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub fixtures: HealthCheck,
    pub reservations: HealthCheck,
    pub checked_at: String,
}

pub fn router(fixtures: FixtureStore, reservations: Arc<ReservationStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { fixtures, reservations })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let payload = HealthResponse {
        status: "ready",
        service: HealthCheck {
            status: "ready",
            detail: "innkeeper-server runtime initialized".to_string(),
        },
        fixtures: HealthCheck {
            status: "ready",
            detail: format!("{} canned documents loaded", state.fixtures.document_count()),
        },
        reservations: HealthCheck {
            status: "ready",
            detail: format!("{} active reservations", state.reservations.active_count()),
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Json;

    use innkeeper_core::booking::{ReservationStore, ThreadRngSource};
    use innkeeper_core::fixtures::FixtureStore;

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_reports_ready_with_loaded_fixture_count() {
        let fixtures = FixtureStore::load(None).expect("fixtures should load");
        let reservations =
            Arc::new(ReservationStore::new(&fixtures, Arc::new(ThreadRngSource), 0.0));

        let (status, Json(payload)) =
            health(State(HealthState { fixtures, reservations })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.fixtures.detail, "7 canned documents loaded");
        assert_eq!(payload.reservations.detail, "0 active reservations");
    }
}
