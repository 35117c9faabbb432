use crate::config::Config;

/// Shared application state injected into route handlers via Axum extractors.
/// Transport configuration lives here and is read at call time, so each
/// request selects its transport independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
