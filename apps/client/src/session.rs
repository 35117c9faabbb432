//! Session client: signup, login, logout, history. Each call is a single
//! request with no retry; identity rides the shared cookie store on
//! [`Backend`], never an explicit token in the payload.

use serde::Serialize;
use tracing::debug;

use crate::errors::ClientError;
use crate::http::Backend;
use crate::models::{HistoryEntry, HistoryResponse};

pub const HISTORY_FALLBACK_MESSAGE: &str = "Could not fetch history";

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

/// Which session-gated controls the interface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionControls {
    pub logout_visible: bool,
    pub history_visible: bool,
}

impl SessionControls {
    pub fn signed_in() -> Self {
        SessionControls {
            logout_visible: true,
            history_visible: true,
        }
    }

    pub fn signed_out() -> Self {
        SessionControls {
            logout_visible: false,
            history_visible: false,
        }
    }
}

/// `POST /signup`. The response body is opaque to this layer and surfaced to
/// the caller as-is.
pub async fn signup(
    backend: &Backend,
    credentials: &Credentials,
) -> Result<serde_json::Value, ClientError> {
    post_credentials(backend, "/signup", credentials).await
}

/// `POST /login`. Establishes the ambient session cookie on success.
pub async fn login(
    backend: &Backend,
    credentials: &Credentials,
) -> Result<serde_json::Value, ClientError> {
    post_credentials(backend, "/login", credentials).await
}

async fn post_credentials(
    backend: &Backend,
    path: &str,
    credentials: &Credentials,
) -> Result<serde_json::Value, ClientError> {
    let response = backend
        .http()
        .post(backend.url(path))
        .json(credentials)
        .send()
        .await?;
    backend.read_json(response).await
}

/// `POST /logout`. On success the session-gated controls are hidden.
pub async fn logout(backend: &Backend) -> Result<SessionControls, ClientError> {
    let response = backend.http().post(backend.url("/logout")).send().await?;
    let _: serde_json::Value = backend.read_json(response).await?;
    Ok(SessionControls::signed_out())
}

/// `GET /history`. Failures without a server-supplied message degrade to the
/// fixed fallback so the caller always has something to show.
pub async fn fetch_history(backend: &Backend) -> Result<Vec<HistoryEntry>, ClientError> {
    let result: Result<HistoryResponse, ClientError> = async {
        let response = backend.http().get(backend.url("/history")).send().await?;
        backend.read_json(response).await
    }
    .await;

    match result {
        Ok(body) => Ok(body.history),
        Err(ClientError::Server(message)) => Err(ClientError::Server(message)),
        Err(err) => {
            debug!("history fetch failed: {err:?}");
            Err(ClientError::Server(HISTORY_FALLBACK_MESSAGE.to_string()))
        }
    }
}

/// Projects history entries into display lines, newest-last as served.
pub fn render_history(entries: &[HistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} — {} — TF-IDF: {}% — Skill Match: {}%",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.analysis.job_role,
                entry.analysis.tfidf_score.round() as u32,
                entry.analysis.skill_match.match_percentage,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisSummary, MatchSummary};
    use chrono::TimeZone;

    #[test]
    fn session_controls_toggle() {
        assert!(SessionControls::signed_in().logout_visible);
        assert!(!SessionControls::signed_out().history_visible);
    }

    #[test]
    fn history_lines_carry_role_and_scores() {
        let entries = vec![HistoryEntry {
            timestamp: chrono::Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
            analysis: AnalysisSummary {
                job_role: "Data Analyst".to_string(),
                tfidf_score: 72.4,
                skill_match: MatchSummary {
                    match_percentage: 50.0,
                },
            },
        }];
        let lines = render_history(&entries);
        assert_eq!(
            lines,
            vec!["2025-03-14 09:30 — Data Analyst — TF-IDF: 72% — Skill Match: 50%"]
        );
    }
}
