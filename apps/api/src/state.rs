use std::sync::Arc;

use crate::config::Config;
use crate::layout::{PageLayout, RenderBackend};
use crate::llm_client::TextGenerator;
use crate::runs::progress::ProgressStore;
use crate::scrape::PageLoader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Default: `GeminiClient`; tests swap in canned generators.
    pub generator: Arc<dyn TextGenerator>,
    pub page_loader: Arc<dyn PageLoader>,
    pub renderer: Arc<dyn RenderBackend>,
    pub progress: ProgressStore,
    pub config: Config,
    /// Page geometry handed to the renderer. Defaults to US letter.
    pub page_layout: PageLayout,
}
