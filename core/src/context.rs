use crate::config::AppConfig;
use crate::llm::TaskSummarizer;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Services {
    /// `None` when no API credential is configured.
    pub summarizer: Option<Arc<dyn TaskSummarizer>>,
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services>;
}
