//! State shared by all handlers

use std::path::PathBuf;
use std::sync::Arc;

use tasksift_core::api::{HtmlRenderer, RenderError, ResultCache, Services};

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub cache: Arc<ResultCache>,
    pub renderer: Arc<HtmlRenderer>,
    /// Base page, re-read on every request.
    pub template_path: Arc<PathBuf>,
    /// Shown in the missing-credential message.
    pub api_key_env: Arc<str>,
}

impl AppState {
    pub fn new(
        services: Services,
        template_path: impl Into<PathBuf>,
        api_key_env: &str,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            services: Arc::new(services),
            cache: Arc::new(ResultCache::new()),
            renderer: Arc::new(HtmlRenderer::new()?),
            template_path: Arc::new(template_path.into()),
            api_key_env: Arc::from(api_key_env),
        })
    }
}
