//! HTTP error documents.
//!
//! Every error surfaced to a caller is the same JSON shape: numeric
//! `status`, short `title`, optional `detail`, optional `o:errorPath`, and
//! an RFC 3339 `timestamp`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::error;

use innkeeper_core::errors::BookingError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    detail: Option<String>,
    path: Option<String>,
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Resource not found",
            detail: Some(detail.into()),
            path: None,
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            title: "No availability",
            detail: Some(detail.into()),
            path: None,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal server error",
            detail: Some(detail.into()),
            path: None,
        }
    }

    /// Attaches the request path reported in `o:errorPath`.
    pub fn at(mut self, path: &str) -> Self {
        self.path = Some(path.to_owned());
        self
    }
}

impl From<BookingError> for ApiError {
    fn from(error: BookingError) -> Self {
        match &error {
            BookingError::NotFound(_) => Self::not_found(error.to_string()),
            BookingError::NoAvailability => Self::conflict(error.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorDocument {
    status: u16,
    title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(rename = "o:errorPath", skip_serializing_if = "Option::is_none")]
    error_path: Option<String>,
    timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(
            status = self.status.as_u16(),
            title = self.title,
            detail = self.detail.as_deref().unwrap_or(""),
            path = self.path.as_deref().unwrap_or(""),
            "request failed"
        );

        let document = ErrorDocument {
            status: self.status.as_u16(),
            title: self.title,
            detail: self.detail,
            error_path: self.path,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        (self.status, Json(document)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use innkeeper_core::errors::BookingError;

    use super::ApiError;

    #[test]
    fn booking_errors_map_to_the_documented_statuses() {
        let not_found = ApiError::from(BookingError::NotFound("1234567".to_owned()));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.title, "Resource not found");

        let conflict = ApiError::from(BookingError::NoAvailability);
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.title, "No availability");
    }

    #[test]
    fn response_carries_the_error_document_status() {
        let response = ApiError::conflict("no rooms left").at("/book/v1/hotels").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
