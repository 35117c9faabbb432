use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Service-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, MailError>`.
#[derive(Debug, Error)]
pub enum MailError {
    /// Rejected before any transport is selected.
    #[error("to required")]
    MissingRecipient,

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not assemble message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp send failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("file transport failed: {0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("spool directory unavailable: {0}")]
    Spool(#[from] std::io::Error),

    #[error("send task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for MailError {
    fn into_response(self) -> Response {
        match &self {
            MailError::MissingRecipient => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "to required"})),
            )
                .into_response(),
            other => {
                tracing::error!("send error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"ok": false, "error": other.to_string()})),
                )
                    .into_response()
            }
        }
    }
}
