use std::sync::Arc;

use crate::article::upload::UploadStore;
use crate::config::Config;
use crate::llm_client::ArticleGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Production uses `LlmClient`; tests inject fakes.
    pub generator: Arc<dyn ArticleGenerator>,
    pub uploads: UploadStore,
    pub config: Config,
}
