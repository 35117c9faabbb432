//! Analysis submission: `idle → submitting → (success | error)`.
//!
//! One request in flight at a time. The flow owns its state; a second submit
//! while `Submitting` is refused by the guard, and every network outcome
//! (success, server error, transport error) lands the machine back in a
//! terminal state so the UI can never stick in `Submitting`.

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::http::Backend;
use crate::models::AnalysisResult;
use crate::upload::ValidCandidate;

#[derive(Debug, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Submitting,
    Success(AnalysisResult),
    Error(String),
}

impl AnalysisState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, AnalysisState::Submitting)
    }
}

#[derive(Debug, Default)]
pub struct AnalysisFlow {
    state: AnalysisState,
}

impl AnalysisFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// The submit control is enabled only when this returns true.
    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
    }

    /// Parsed result of the last successful submission, if the flow is in
    /// `Success`.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AnalysisState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Submits a validated candidate and drives the machine to `Success` or
    /// `Error`. A call while a request is in flight is ignored.
    pub async fn submit(&mut self, backend: &Backend, valid: ValidCandidate) -> &AnalysisState {
        if !self.can_submit() {
            debug!("submit ignored: request already in flight");
            return &self.state;
        }
        self.state = AnalysisState::Submitting;

        self.state = match send_analysis(backend, valid).await {
            Ok(result) => AnalysisState::Success(result),
            Err(err) => {
                warn!("analysis failed: {err:?}");
                AnalysisState::Error(err.user_message())
            }
        };
        &self.state
    }

    /// Returns to `Idle`, discarding any previous result or error.
    pub fn reset(&mut self) {
        self.state = AnalysisState::Idle;
    }
}

/// `POST /analyze` with multipart `resume` + `job_role`.
async fn send_analysis(
    backend: &Backend,
    valid: ValidCandidate,
) -> Result<AnalysisResult, ClientError> {
    let ValidCandidate {
        candidate,
        job_role,
    } = valid;

    let part = Part::bytes(candidate.bytes.to_vec())
        .file_name(candidate.file_name)
        .mime_str(&candidate.declared_type)?;
    let form = Form::new().part("resume", part).text("job_role", job_role);

    let response = backend
        .http()
        .post(backend.url("/analyze"))
        .multipart(form)
        .send()
        .await?;

    let result: AnalysisResult = backend.read_json(response).await?;
    result
        .check_consistency()
        .map_err(ClientError::Transport)?;
    Ok(result)
}
