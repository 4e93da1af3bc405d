//! Reservation agent route.
//!
//! `POST /agent/v1/reservation-agent` takes the caller's conversation
//! history and returns either a chat message or a structured
//! reservation_draft once enough details have been collected.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use innkeeper_agent::AgentRuntime;
use innkeeper_core::domain::{AgentReply, ConversationMessage};

use crate::context::RequestContext;

pub fn router(agent: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/agent/v1/reservation-agent", post(chat))
        .with_state(agent)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatRequest {
    messages: Vec<ConversationMessage>,
}

async fn chat(
    State(agent): State<Arc<AgentRuntime>>,
    context: RequestContext,
    Json(request): Json<ChatRequest>,
) -> Json<AgentReply> {
    info!(
        request_id = %context.request_id,
        turns = request.messages.len(),
        "agent chat request"
    );

    let reply = agent.chat(&request.messages).await;

    let reply_type = match &reply {
        AgentReply::Message { .. } => "message",
        AgentReply::ReservationDraft { .. } => "reservation_draft",
    };
    info!(request_id = %context.request_id, reply_type, "agent chat response");

    Json(reply)
}
