use std::sync::Arc;

use crate::analysis::SkillAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Analysis pipeline bound to the vocabulary loaded at startup and the
    /// optional embedder. Read-only for the lifetime of the process.
    pub analyzer: Arc<SkillAnalyzer>,
}
