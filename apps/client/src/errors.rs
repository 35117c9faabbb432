use thiserror::Error;

/// Pre-network validation failures. Detected entirely client-side; none of
/// these ever issues a request. The `Display` strings are the user-facing
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a resume file")]
    MissingFile,

    #[error("Please select a job role")]
    MissingRole,

    #[error("Only PDF files are allowed")]
    UnsupportedType,

    #[error("File is too large (max 5MB)")]
    TooLarge,
}

/// Workflow-level error type.
/// `Display` is the user-facing message; transport details are logged where
/// the error is constructed, never shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Network unreachable, timed out, or a response body that could not be
    /// decoded (including a non-2xx response with an unparseable payload).
    #[error("Network error. Please try again.")]
    Transport(String),

    /// Non-2xx response carrying a parseable `{error}` payload.
    #[error("{0}")]
    Server(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl ClientError {
    /// Message suitable for direct display in the UI.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
