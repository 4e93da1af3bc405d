//! Classification and validation of raw model completions.
//!
//! A completion is either conversational text or a JSON envelope carrying a
//! `reservation_draft`. Drafts are only surfaced once they validate as
//! complete, and their pricing fields are overridden from the live shop
//! catalog whenever a matching offer exists. Everything that fails along
//! the way degrades to a plain message; this module never errors.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use innkeeper_core::domain::{AgentReply, ReservationDraft};
use innkeeper_core::shop::ShopCatalog;

/// Sent when the model claims a draft but the required fields are missing
/// and it supplied no message of its own.
const MISSING_DETAILS_PROMPT: &str =
    "I still need a few details before I can pre-fill your booking. Could you confirm your \
     dates, room type, and rate plan?";

pub struct ResponseInterpreter {
    shop: Arc<ShopCatalog>,
}

impl ResponseInterpreter {
    pub fn new(shop: Arc<ShopCatalog>) -> Self {
        Self { shop }
    }

    /// Turns one raw completion into a reply. Never fails; anything that
    /// does not validate as a complete draft comes back as a message.
    pub fn interpret(&self, raw: &str) -> AgentReply {
        let trimmed = raw.trim();
        if !trimmed.starts_with('{') && !trimmed.contains("reservation_draft") {
            return AgentReply::message(trimmed);
        }

        let Some(candidate) = strip_code_fence(trimmed) else {
            debug!("unterminated code fence in model output, treating as plain message");
            return AgentReply::message(raw);
        };
        let Ok(parsed) = serde_json::from_str::<Value>(candidate) else {
            debug!("model output is not JSON, treating as plain message");
            return AgentReply::message(raw);
        };

        if parsed.get("type").and_then(Value::as_str) != Some("reservation_draft") {
            return AgentReply::message(raw);
        }

        let message = parsed.get("message").and_then(Value::as_str).map(str::to_owned);
        let draft = parsed
            .get("reservation_draft")
            .cloned()
            .and_then(|value| serde_json::from_value::<ReservationDraft>(value).ok());

        match draft.filter(ReservationDraft::is_complete) {
            Some(mut draft) => {
                info!(hotel_code = %draft.hotel_code, "model produced a reservation draft");
                self.enrich(&mut draft);
                AgentReply::ReservationDraft { message, reservation_draft: draft }
            }
            None => {
                warn!("model claimed a reservation draft but required fields are missing");
                AgentReply::Message {
                    message: message.unwrap_or_else(|| MISSING_DETAILS_PROMPT.to_owned()),
                }
            }
        }
    }

    /// Overrides the draft's estimate with live offer data when the shop
    /// catalog has an exact room-type/rate-plan match. Best effort: no
    /// match means the model's own values stand.
    fn enrich(&self, draft: &mut ReservationDraft) {
        let offers = self.shop.property_offers(&draft.hotel_code);

        let Some(plan) = find_rate_plan(&offers, &draft.room_type, &draft.rate_plan_code) else {
            warn!(
                hotel_code = %draft.hotel_code,
                room_type = %draft.room_type,
                rate_plan_code = %draft.rate_plan_code,
                "no matching live offer, keeping model estimates"
            );
            return;
        };

        let total = plan.pointer("/total/amountAfterTax").and_then(Value::as_f64).unwrap_or(0.0);
        let currency = plan.pointer("/total/currencyCode").and_then(Value::as_str).unwrap_or("");
        let cancel_policy = plan
            .pointer("/cancelPenalty/penaltyDescription")
            .and_then(Value::as_str)
            .unwrap_or("");

        if total > 0.0 {
            draft.estimated_total = total;
        }
        if !currency.trim().is_empty() {
            draft.currency_code = currency.to_owned();
        }
        if !cancel_policy.trim().is_empty() {
            draft.cancellation_policy = cancel_policy.to_owned();
        }

        info!(total, currency, "enriched draft with live offer");
    }
}

/// First match wins, in document order: stays, then room types, then rate
/// plans. Codes compare case-sensitively.
fn find_rate_plan<'a>(offers: &'a Value, room_type: &str, rate_plan_code: &str) -> Option<&'a Value> {
    for stay in offers.get("roomStays")?.as_array()? {
        for room in stay.get("roomTypes").and_then(Value::as_array).into_iter().flatten() {
            if room.get("roomType").and_then(Value::as_str) != Some(room_type) {
                continue;
            }
            for plan in room.get("ratePlans").and_then(Value::as_array).into_iter().flatten() {
                if plan.get("ratePlanCode").and_then(Value::as_str) == Some(rate_plan_code) {
                    return Some(plan);
                }
            }
        }
    }
    None
}

/// Extracts the payload of an optional fenced code block. `None` means a
/// fence was opened but never closed.
fn strip_code_fence(trimmed: &str) -> Option<&str> {
    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + "```json".len()..];
        let end = rest.rfind("```")?;
        return Some(rest[..end].trim());
    }
    if let Some(start) = trimmed.find("```") {
        let rest = &trimmed[start + "```".len()..];
        let end = rest.rfind("```")?;
        return Some(rest[..end].trim());
    }
    Some(trimmed)
}
