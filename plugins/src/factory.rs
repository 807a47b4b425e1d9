use std::sync::Arc;

use anyhow::Result;

use tasksift_core::api::{AppConfig, TaskSummarizer};

use crate::llm::ChatSummarizerPlugin;

/// Builds the summarizer when a credential is available.
///
/// A missing key is not an error: the server still starts and shows an inline
/// message on submission.
pub fn build_summarizer(cfg: &AppConfig) -> Result<Option<Arc<dyn TaskSummarizer>>> {
    let Some(api_key) = cfg.llm.resolve_api_key() else {
        tracing::warn!(
            "{} is not set; submissions will show a missing-key error",
            cfg.llm.api_key_env
        );
        return Ok(None);
    };

    Ok(Some(Arc::new(ChatSummarizerPlugin::new(&cfg.llm, api_key)?)))
}
