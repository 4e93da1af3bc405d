//! Book API routes.
//!
//! - `POST   /book/v1/hotels/{hotelCode}/reservations`                        — create
//! - `GET    /book/v1/hotels/{hotelCode}/reservations/{confirmationNumber}`   — retrieve
//! - `PUT    /book/v1/hotels/{hotelCode}/reservations/{confirmationNumber}`   — modify
//! - `DELETE /book/v1/hotels/{hotelCode}/reservations/{confirmationNumber}`   — cancel

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;

use innkeeper_core::booking::ReservationStore;

use crate::context::RequestContext;
use crate::error::ApiError;

pub fn router(store: Arc<ReservationStore>) -> Router {
    Router::new()
        .route("/book/v1/hotels/{hotelCode}/reservations", post(create_reservation))
        .route(
            "/book/v1/hotels/{hotelCode}/reservations/{confirmationNumber}",
            get(get_reservation).put(modify_reservation).delete(cancel_reservation),
        )
        .with_state(store)
}

async fn create_reservation(
    State(store): State<Arc<ReservationStore>>,
    context: RequestContext,
    Path(hotel_code): Path<String>,
    uri: Uri,
    Json(request): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    info!(request_id = %context.request_id, hotel_code = %hotel_code, "create reservation request");

    let response = store
        .create(&request)
        .map_err(|error| ApiError::from(error).at(uri.path()))?;

    info!(request_id = %context.request_id, hotel_code = %hotel_code, "reservation created");
    Ok(Json(response))
}

async fn get_reservation(
    State(store): State<Arc<ReservationStore>>,
    context: RequestContext,
    Path((hotel_code, confirmation)): Path<(String, String)>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        confirmation = %confirmation,
        "retrieve reservation request"
    );

    let response = store
        .get(&confirmation)
        .map_err(|error| ApiError::from(error).at(uri.path()))?;

    Ok(Json(response))
}

async fn modify_reservation(
    State(store): State<Arc<ReservationStore>>,
    context: RequestContext,
    Path((hotel_code, confirmation)): Path<(String, String)>,
    uri: Uri,
    Json(request): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        confirmation = %confirmation,
        "modify reservation request"
    );

    let response = store
        .modify(&confirmation, &request)
        .map_err(|error| ApiError::from(error).at(uri.path()))?;

    Ok(Json(response))
}

async fn cancel_reservation(
    State(store): State<Arc<ReservationStore>>,
    context: RequestContext,
    Path((hotel_code, confirmation)): Path<(String, String)>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        confirmation = %confirmation,
        "cancel reservation request"
    );

    let response = store
        .cancel(&confirmation)
        .map_err(|error| ApiError::from(error).at(uri.path()))?;

    Ok(Json(response))
}
