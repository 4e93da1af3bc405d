use serde::{Deserialize, Serialize};

/// Chat role on the wire. Anything that is not `assistant` deserializes as
/// `user`, matching how the upstream providers treat unknown roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    #[default]
    #[serde(other)]
    User,
}

/// One turn of the conversation history supplied by the caller. The history
/// is owned by the client and never persisted server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Tentative reservation proposal extracted from model output. Field names
/// follow the JSON contract the assistant is prompted with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationDraft {
    pub hotel_code: String,
    pub hotel_name: String,
    pub arrival_date: String,
    pub departure_date: String,
    pub adults: i64,
    pub children: i64,
    pub room_type: String,
    pub room_name: String,
    pub rate_plan_code: String,
    pub rate_plan_name: String,
    pub estimated_total: f64,
    pub currency_code: String,
    pub cancellation_policy: String,
}

impl ReservationDraft {
    /// A draft is bookable only when the fields needed to price and commit
    /// it are present. Incomplete drafts must never reach the caller as
    /// drafts.
    pub fn is_complete(&self) -> bool {
        !self.hotel_code.trim().is_empty()
            && !self.arrival_date.trim().is_empty()
            && !self.departure_date.trim().is_empty()
            && !self.room_type.trim().is_empty()
            && !self.rate_plan_code.trim().is_empty()
            && self.adults > 0
    }
}

/// What the reservation assistant hands back for one chat call: either a
/// plain conversational message or a validated reservation draft. Exactly
/// one variant per call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentReply {
    Message {
        message: String,
    },
    ReservationDraft {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        reservation_draft: ReservationDraft,
    },
}

impl AgentReply {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { message: text.into() }
    }
}
