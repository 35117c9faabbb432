//! Workflow engine for the resume-analysis web client.
//!
//! Drives the upload → analyze → render cycle and the skill-quiz sub-flow
//! against the scoring backend, which is treated as a black box reached over
//! HTTP/JSON. All projections (`render`) are pure; all network access goes
//! through [`http::Backend`].

pub mod analysis;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod quiz;
pub mod render;
pub mod session;
pub mod upload;

pub use analysis::{AnalysisFlow, AnalysisState};
pub use config::Config;
pub use errors::{ClientError, ValidationError};
pub use http::Backend;
pub use models::AnalysisResult;
pub use quiz::{QuizFlow, QuizState, QuizSubmit};
pub use render::{render, RenderedView};
pub use upload::{UploadCandidate, UploadForm, ValidCandidate};
