//! Shop API routes.
//!
//! - `GET /shop/v1/hotels`                          — multi-property search
//! - `GET /shop/v1/hotels/{hotelCode}/offers`       — room/rate offers
//! - `GET /shop/v1/hotels/{hotelCode}/calendar`     — calendar availability
//! - `GET /shop/v1/hotels/{hotelCode}/offer`        — single offer detail
//!
//! Query parameters are logged for traceability but never filter the
//! canned documents.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use innkeeper_core::shop::ShopCatalog;

use crate::context::RequestContext;

pub fn router(shop: Arc<ShopCatalog>) -> Router {
    Router::new()
        .route("/shop/v1/hotels", get(search_properties))
        .route("/shop/v1/hotels/{hotelCode}/offers", get(property_offers))
        .route("/shop/v1/hotels/{hotelCode}/calendar", get(calendar_availability))
        .route("/shop/v1/hotels/{hotelCode}/offer", get(offer_detail))
        .with_state(shop)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchParams {
    adults: Option<u32>,
    number_of_units: Option<u32>,
    arrival_date: Option<String>,
    departure_date: Option<String>,
    chain_code: Option<String>,
    hotel_codes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OffersParams {
    adults: Option<u32>,
    number_of_units: Option<u32>,
    arrival_date: Option<String>,
    departure_date: Option<String>,
    rate_plan_codes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CalendarParams {
    adults: Option<u32>,
    number_of_units: Option<u32>,
    start_date: Option<String>,
    end_date: Option<String>,
    length_of_stay: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OfferDetailParams {
    room_type: Option<String>,
    rate_plan_code: Option<String>,
    adults: Option<u32>,
    arrival_date: Option<String>,
    departure_date: Option<String>,
}

async fn search_properties(
    State(shop): State<Arc<ShopCatalog>>,
    context: RequestContext,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    info!(
        request_id = %context.request_id,
        adults = ?params.adults,
        number_of_units = ?params.number_of_units,
        arrival_date = ?params.arrival_date,
        departure_date = ?params.departure_date,
        chain_code = ?params.chain_code,
        hotel_codes = ?params.hotel_codes,
        "property search request"
    );

    Json(shop.search_properties().as_ref().clone())
}

async fn property_offers(
    State(shop): State<Arc<ShopCatalog>>,
    context: RequestContext,
    Path(hotel_code): Path<String>,
    Query(params): Query<OffersParams>,
) -> Json<Value> {
    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        adults = ?params.adults,
        number_of_units = ?params.number_of_units,
        arrival_date = ?params.arrival_date,
        departure_date = ?params.departure_date,
        rate_plan_codes = ?params.rate_plan_codes,
        "property offers request"
    );

    Json(shop.property_offers(&hotel_code).as_ref().clone())
}

async fn calendar_availability(
    State(shop): State<Arc<ShopCatalog>>,
    context: RequestContext,
    Path(hotel_code): Path<String>,
    Query(params): Query<CalendarParams>,
) -> Json<Value> {
    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        adults = ?params.adults,
        number_of_units = ?params.number_of_units,
        start_date = ?params.start_date,
        end_date = ?params.end_date,
        length_of_stay = ?params.length_of_stay,
        "calendar availability request"
    );

    Json(shop.calendar_availability(&hotel_code).as_ref().clone())
}

async fn offer_detail(
    State(shop): State<Arc<ShopCatalog>>,
    context: RequestContext,
    Path(hotel_code): Path<String>,
    Query(params): Query<OfferDetailParams>,
) -> Json<Value> {
    let room_type = params.room_type.as_deref().unwrap_or("");
    let rate_plan_code = params.rate_plan_code.as_deref().unwrap_or("");

    info!(
        request_id = %context.request_id,
        hotel_code = %hotel_code,
        room_type,
        rate_plan_code,
        adults = ?params.adults,
        arrival_date = ?params.arrival_date,
        departure_date = ?params.departure_date,
        "offer detail request"
    );

    Json(shop.offer_detail(&hotel_code, room_type, rate_plan_code).as_ref().clone())
}
