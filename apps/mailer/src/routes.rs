//! Axum route handlers for the mail dispatch service.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::Message;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::MailError;
use crate::state::AppState;
use crate::transport::select_transport;

pub const DEFAULT_SUBJECT: &str = "Password reset";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/send-reset", post(handle_send_reset))
        .with_state(state)
}

/// GET /health
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mailer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub ok: bool,
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /send-reset
///
/// Sends one transactional message. A missing recipient is rejected with 400
/// before any transport is selected; a transport-level failure comes back as
/// 500 `{ok:false, error}` rather than crashing the process.
async fn handle_send_reset(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>, MailError> {
    let to = request
        .to
        .filter(|t| !t.trim().is_empty())
        .ok_or(MailError::MissingRecipient)?;

    // Transport configuration is read per call, not captured at startup.
    let transport = select_transport(&state.config)?;

    let message_id = format!("<{}@mailer>", Uuid::new_v4());
    let subject = request
        .subject
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
    let text = request.text.unwrap_or_default();

    let builder = Message::builder()
        .from(state.config.sender().parse::<Mailbox>()?)
        .to(to.parse::<Mailbox>()?)
        .subject(subject)
        .message_id(Some(message_id.clone()));

    let message = match request.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(text, html))?,
        None => builder.header(ContentType::TEXT_PLAIN).body(text)?,
    };

    info!(transport = transport.kind(), to = %to, "dispatching message");
    let preview = transport.deliver(message).await?;

    Ok(Json(SendResponse {
        ok: true,
        message_id,
        preview,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
