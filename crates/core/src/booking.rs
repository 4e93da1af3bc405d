//! In-memory reservation store.
//!
//! Reservations are opaque JSON documents keyed by a generated 7-digit
//! confirmation number. Responses are deep copies of booking templates with
//! the confirmation number and timestamps stamped in; the templates
//! themselves are never mutated. A configurable slice of create calls fails
//! with `NoAvailability` before touching any state, to let clients exercise
//! their contention handling.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::BookingError;
use crate::fixtures::FixtureStore;

const CONFIRMATION_SPACE: u32 = 10_000_000;

/// Source of randomness for fault injection and confirmation numbers.
/// Injected so tests can pin outcomes.
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn unit(&self) -> f64;
    /// Uniform integer in `[0, bound)`.
    fn below(&self, bound: u32) -> u32;
}

/// Production source backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn unit(&self) -> f64 {
        rand::thread_rng().gen()
    }

    fn below(&self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

pub struct ReservationStore {
    reservations: RwLock<HashMap<String, Value>>,
    success_template: Arc<Value>,
    cc_guaranteed_template: Arc<Value>,
    cancellation_template: Arc<Value>,
    random: Arc<dyn RandomSource>,
    failure_rate: f64,
}

impl ReservationStore {
    pub fn new(fixtures: &FixtureStore, random: Arc<dyn RandomSource>, failure_rate: f64) -> Self {
        Self {
            reservations: RwLock::new(HashMap::new()),
            success_template: fixtures.book_create_success(),
            cc_guaranteed_template: fixtures.book_create_cc_guaranteed(),
            cancellation_template: fixtures.book_cancellation(),
            random,
            failure_rate,
        }
    }

    /// Books a reservation. The response template depends on whether the
    /// request carries a credit-card guarantee. Fails with `NoAvailability`
    /// for a random slice of calls, before any state changes.
    pub fn create(&self, request: &Value) -> Result<Value, BookingError> {
        if self.random.unit() < self.failure_rate {
            warn!("simulating no availability on create");
            return Err(BookingError::NoAvailability);
        }

        let template = if has_credit_card_guarantee(request) {
            &self.cc_guaranteed_template
        } else {
            &self.success_template
        };
        let mut response = template.as_ref().clone();

        let mut reservations =
            self.reservations.write().unwrap_or_else(PoisonError::into_inner);
        let confirmation = loop {
            let candidate = format!("{:07}", self.random.below(CONFIRMATION_SPACE));
            if !reservations.contains_key(&candidate) {
                break candidate;
            }
        };

        stamp_confirmation_number(&mut response, &confirmation);
        stamp_last_modified(&mut response, &now_rfc3339());
        reservations.insert(confirmation.clone(), response.clone());

        info!(%confirmation, "reservation created");
        Ok(response)
    }

    pub fn get(&self, confirmation: &str) -> Result<Value, BookingError> {
        let reservations = self.reservations.read().unwrap_or_else(PoisonError::into_inner);
        reservations
            .get(confirmation)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(confirmation.to_owned()))
    }

    /// Replaces the stored record with a timestamp-refreshed copy. The
    /// request body is accepted for wire compatibility; its content is not
    /// merged into the stored record.
    pub fn modify(&self, confirmation: &str, _request: &Value) -> Result<Value, BookingError> {
        let mut reservations =
            self.reservations.write().unwrap_or_else(PoisonError::into_inner);
        let existing = reservations
            .get(confirmation)
            .ok_or_else(|| BookingError::NotFound(confirmation.to_owned()))?;

        let mut modified = existing.clone();
        stamp_last_modified(&mut modified, &now_rfc3339());
        reservations.insert(confirmation.to_owned(), modified.clone());

        info!(confirmation = %confirmation, "reservation modified");
        Ok(modified)
    }

    /// Removes the reservation and returns a stamped cancellation document.
    pub fn cancel(&self, confirmation: &str) -> Result<Value, BookingError> {
        let mut reservations =
            self.reservations.write().unwrap_or_else(PoisonError::into_inner);
        if reservations.remove(confirmation).is_none() {
            return Err(BookingError::NotFound(confirmation.to_owned()));
        }
        drop(reservations);

        let now = now_rfc3339();
        let mut response = self.cancellation_template.as_ref().clone();
        stamp_confirmation_number(&mut response, confirmation);
        stamp_last_modified(&mut response, &now);
        stamp_cancellation_date(&mut response, &now);

        info!(confirmation = %confirmation, "reservation cancelled");
        Ok(response)
    }

    /// Number of live reservations.
    pub fn active_count(&self) -> usize {
        self.reservations.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn has_credit_card_guarantee(request: &Value) -> bool {
    request
        .get("reservations")
        .and_then(Value::as_array)
        .and_then(|reservations| reservations.first())
        .and_then(|reservation| reservation.get("roomStay"))
        .and_then(|room_stay| room_stay.get("guarantee"))
        .map(|guarantee| guarantee.get("creditCard").is_some())
        .unwrap_or(false)
}

/// Writes the confirmation number into every `reservationIds` entry of the
/// document's first element whose `type` is `"Confirmation"`.
fn stamp_confirmation_number(document: &mut Value, confirmation: &str) {
    let ids = document
        .get_mut(0)
        .and_then(|reservation| reservation.get_mut("reservationIds"))
        .and_then(Value::as_array_mut);
    let Some(ids) = ids else { return };

    for id_entry in ids {
        if id_entry.get("type").and_then(Value::as_str) != Some("Confirmation") {
            continue;
        }
        if let Some(entry) = id_entry.as_object_mut() {
            entry.insert("id".to_owned(), Value::String(confirmation.to_owned()));
        }
    }
}

fn stamp_last_modified(document: &mut Value, at: &str) {
    if let Some(reservation) = document.get_mut(0).and_then(Value::as_object_mut) {
        reservation.insert("lastModifyDateTime".to_owned(), Value::String(at.to_owned()));
    }
}

fn stamp_cancellation_date(document: &mut Value, at: &str) {
    let room_stay = document
        .get_mut(0)
        .and_then(|reservation| reservation.get_mut("roomStay"))
        .and_then(Value::as_object_mut);
    if let Some(room_stay) = room_stay {
        room_stay.insert("cancellationDate".to_owned(), Value::String(at.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use crate::errors::BookingError;
    use crate::fixtures::FixtureStore;

    use super::{RandomSource, ReservationStore};

    /// Replays scripted draws; falls back to "no fault, number 1234567"
    /// once a script runs dry.
    struct ScriptedRandom {
        units: Mutex<VecDeque<f64>>,
        numbers: Mutex<VecDeque<u32>>,
    }

    impl ScriptedRandom {
        fn new(units: &[f64], numbers: &[u32]) -> Arc<Self> {
            Arc::new(Self {
                units: Mutex::new(units.iter().copied().collect()),
                numbers: Mutex::new(numbers.iter().copied().collect()),
            })
        }
    }

    impl RandomSource for ScriptedRandom {
        fn unit(&self) -> f64 {
            self.units.lock().expect("units lock").pop_front().unwrap_or(0.99)
        }

        fn below(&self, _bound: u32) -> u32 {
            self.numbers.lock().expect("numbers lock").pop_front().unwrap_or(1_234_567)
        }
    }

    fn store_with(random: Arc<ScriptedRandom>, failure_rate: f64) -> ReservationStore {
        let fixtures = FixtureStore::load(None).expect("fixtures should load");
        ReservationStore::new(&fixtures, random, failure_rate)
    }

    fn plain_request() -> Value {
        json!({
            "reservations": [{
                "roomStay": {
                    "arrivalDate": "2024-12-15",
                    "departureDate": "2024-12-17",
                    "guarantee": { "guaranteeType": "GuaranteeRequired" }
                }
            }]
        })
    }

    fn cc_request() -> Value {
        json!({
            "reservations": [{
                "roomStay": {
                    "guarantee": {
                        "creditCard": { "cardType": "VI", "cardNumberMasked": "XXXX1111" }
                    }
                }
            }]
        })
    }

    fn confirmation_of(document: &Value) -> String {
        document[0]["reservationIds"]
            .as_array()
            .expect("reservationIds")
            .iter()
            .find(|entry| entry["type"] == "Confirmation")
            .and_then(|entry| entry["id"].as_str())
            .expect("confirmation id")
            .to_owned()
    }

    #[test]
    fn create_returns_zero_padded_confirmation_and_record_is_retrievable() {
        let store = store_with(ScriptedRandom::new(&[0.5], &[42_137]), 0.1);

        let created = store.create(&plain_request()).expect("create should succeed");
        let confirmation = confirmation_of(&created);
        assert_eq!(confirmation, "0042137");
        assert_eq!(confirmation.len(), 7);

        let fetched = store.get(&confirmation).expect("get should succeed");
        assert_eq!(fetched, created);
        assert_eq!(store.active_count(), 1);
    }

    #[test]
    fn injected_fault_fails_create_before_any_state_change() {
        let store = store_with(ScriptedRandom::new(&[0.05], &[]), 0.1);

        let error = store.create(&plain_request()).expect_err("create should fail");
        assert_eq!(error, BookingError::NoAvailability);
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn zero_failure_rate_disables_fault_injection() {
        let store = store_with(ScriptedRandom::new(&[0.0], &[1]), 0.0);
        assert!(store.create(&plain_request()).is_ok());
    }

    #[test]
    fn credit_card_guarantee_selects_the_cc_template() {
        let store = store_with(ScriptedRandom::new(&[], &[1_111_111, 2_222_222]), 0.0);

        let created = store.create(&cc_request()).expect("create should succeed");
        assert!(created[0]["roomStay"]["guarantee"]["creditCard"].is_object());

        let plain = store.create(&plain_request()).expect("create should succeed");
        assert!(plain[0]["roomStay"]["guarantee"]["creditCard"].is_null());
    }

    #[test]
    fn stamping_never_mutates_the_shared_template() {
        let fixtures = FixtureStore::load(None).expect("fixtures should load");
        let store =
            ReservationStore::new(&fixtures, ScriptedRandom::new(&[], &[7_654_321]), 0.0);

        store.create(&plain_request()).expect("create should succeed");

        let template = fixtures.book_create_success();
        assert_eq!(template[0]["reservationIds"][0]["id"], "0000000");
    }

    #[test]
    fn generated_confirmation_rerolls_on_collision() {
        let store = store_with(ScriptedRandom::new(&[], &[42, 42, 99]), 0.0);

        let first = store.create(&plain_request()).expect("first create");
        let second = store.create(&plain_request()).expect("second create");

        assert_eq!(confirmation_of(&first), "0000042");
        assert_eq!(confirmation_of(&second), "0000099");
        assert_eq!(store.active_count(), 2);
    }

    #[test]
    fn get_modify_cancel_fail_not_found_for_unknown_confirmation() {
        let store = store_with(ScriptedRandom::new(&[], &[]), 0.0);
        let missing = BookingError::NotFound("9999999".to_owned());

        assert_eq!(store.get("9999999").expect_err("get"), missing);
        assert_eq!(store.modify("9999999", &plain_request()).expect_err("modify"), missing);
        assert_eq!(store.cancel("9999999").expect_err("cancel"), missing);
    }

    #[test]
    fn modify_refreshes_timestamp_and_ignores_request_body() {
        let store = store_with(ScriptedRandom::new(&[], &[5]), 0.0);

        let created = store.create(&plain_request()).expect("create");
        let confirmation = confirmation_of(&created);

        let modified = store
            .modify(&confirmation, &json!({"roomStay": {"roomType": "C2Q"}}))
            .expect("modify");

        assert_eq!(modified[0]["roomStay"]["roomType"], "A1K");
        assert!(modified[0]["lastModifyDateTime"].is_string());
        assert_eq!(store.get(&confirmation).expect("get"), modified);
    }

    #[test]
    fn cancel_removes_the_record_and_stamps_the_cancellation_document() {
        let store = store_with(ScriptedRandom::new(&[], &[31_415]), 0.0);

        let created = store.create(&plain_request()).expect("create");
        let confirmation = confirmation_of(&created);

        let cancelled = store.cancel(&confirmation).expect("cancel");
        assert_eq!(confirmation_of(&cancelled), confirmation);
        assert_eq!(cancelled[0]["status"], "Cancelled");
        assert!(cancelled[0]["roomStay"]["cancellationDate"].is_string());

        assert_eq!(
            store.get(&confirmation).expect_err("get after cancel"),
            BookingError::NotFound(confirmation),
        );
        assert_eq!(store.active_count(), 0);
    }
}
