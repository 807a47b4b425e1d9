use async_trait::async_trait;

use super::error::LlmError;
use crate::task::ResultSet;

/// Turns a non-empty list of task lines into structured items with one
/// model call.
#[async_trait]
pub trait TaskSummarizer: Send + Sync {
    fn name(&self) -> &str;
    async fn summarize(&self, tasks: &[String]) -> Result<ResultSet, LlmError>;
}
