use super::chat_client::ChatClient;
use async_trait::async_trait;
use tasksift_core::api::{
    build_user_message, parse_task_items, LlmConfig, LlmError, ResultSet, TaskSummarizer,
    SYSTEM_PROMPT,
};

/// Summarizes tasks with one chat-completion call per submission.
pub struct ChatSummarizerPlugin {
    client: ChatClient,
}

impl ChatSummarizerPlugin {
    pub fn new(cfg: &LlmConfig, api_key: String) -> anyhow::Result<Self> {
        let client = ChatClient::new(
            cfg.base_url.clone(),
            api_key,
            cfg.model.clone(),
            cfg.temperature,
            cfg.timeout_ms,
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TaskSummarizer for ChatSummarizerPlugin {
    fn name(&self) -> &str {
        "chat_completion"
    }

    async fn summarize(&self, tasks: &[String]) -> Result<ResultSet, LlmError> {
        tracing::info!(
            target: "tasksift.llm",
            stage = "llm.plugin.summarize.in",
            model = %self.client.model(),
            tasks = tasks.len(),
            "calling completion API"
        );
        let user = build_user_message(tasks);
        let content = self.client.complete(SYSTEM_PROMPT, &user).await?;
        tracing::debug!(
            target: "tasksift.llm",
            stage = "llm.plugin.summarize.raw",
            "raw model response:\n{}",
            content
        );

        let items = parse_task_items(&content).map_err(|err| {
            tracing::warn!(
                target: "tasksift.llm",
                stage = "llm.plugin.summarize.parse_error",
                "raw response content that caused error:\n{}",
                content
            );
            LlmError::parse_error(err, &content)
        })?;

        tracing::debug!(
            target: "tasksift.llm",
            stage = "llm.plugin.summarize.out",
            items = items.len()
        );
        Ok(items)
    }
}
