use thiserror::Error;

/// Failures surfaced by the reservation store. `NotFound` is a client error
/// (unknown confirmation number); `NoAvailability` is the injected
/// contention outcome and maps to a conflict at the HTTP boundary. Neither
/// is ever retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("reservation not found: {0}")]
    NotFound(String),
    #[error("no availability for requested dates")]
    NoAvailability,
}
