//! Submission pipeline: normalize, summarize, cache.

use crate::cache::ResultCache;
use crate::llm::{LlmError, TaskSummarizer};
use crate::task::{normalize_tasks, ResultSet, TaskItem};

/// What happened to one submission.
#[derive(Debug)]
pub enum Outcome {
    /// Input held no task lines; the summarizer was not called and the cache
    /// was left as it was.
    Skipped,
    /// The summarizer answered; the cache now holds exactly these items.
    Processed(ResultSet),
    /// The summarizer failed; the cache was replaced with an empty set.
    Degraded(LlmError),
}

impl Outcome {
    /// Items to render. Failures degrade to an empty list.
    pub fn items(&self) -> &[TaskItem] {
        match self {
            Self::Processed(items) => items,
            Self::Skipped | Self::Degraded(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&LlmError> {
        match self {
            Self::Degraded(err) => Some(err),
            _ => None,
        }
    }
}

pub async fn process_submission(
    raw: &str,
    summarizer: &dyn TaskSummarizer,
    cache: &ResultCache,
) -> Outcome {
    let tasks = normalize_tasks(raw);
    if tasks.is_empty() {
        tracing::info!(
            target: "tasksift.pipeline",
            stage = "pipeline.skip",
            "no valid tasks provided for summarization"
        );
        return Outcome::Skipped;
    }

    tracing::debug!(
        target: "tasksift.pipeline",
        stage = "pipeline.summarize.in",
        summarizer = summarizer.name(),
        tasks = tasks.len()
    );

    match summarizer.summarize(&tasks).await {
        Ok(items) => {
            tracing::info!(
                target: "tasksift.pipeline",
                stage = "pipeline.summarize.out",
                tasks = tasks.len(),
                items = items.len(),
                "tasks processed"
            );
            cache.store(items.clone());
            Outcome::Processed(items)
        }
        Err(err) => {
            tracing::error!(
                target: "tasksift.pipeline",
                stage = "pipeline.summarize.error",
                kind = %err.kind(),
                status = ?err.status(),
                "summarizer failed: {}",
                err
            );
            cache.store(Vec::new());
            Outcome::Degraded(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmErrorKind;
    use crate::task::Priority;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSummarizer {
        calls: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    impl MockSummarizer {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TaskSummarizer for MockSummarizer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn summarize(&self, tasks: &[String]) -> Result<ResultSet, LlmError> {
            self.calls.lock().unwrap().push(tasks.to_vec());
            if self.fail {
                return Err(LlmError::new(LlmErrorKind::Connect, "connection refused"));
            }
            Ok(tasks
                .iter()
                .map(|t| TaskItem {
                    original_task: Some(t.clone()),
                    summary: Some(t.to_uppercase()),
                    tags: Some(vec!["#followup".into()]),
                    priority: Some(Priority::Score(3)),
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_blank_input_skips_summarizer() {
        let summarizer = MockSummarizer::new(false);
        let cache = ResultCache::new();

        let outcome = process_submission(" \n\n\t\n", &summarizer, &cache).await;
        assert!(matches!(outcome, Outcome::Skipped));
        assert!(outcome.items().is_empty());
        assert_eq!(summarizer.call_count(), 0);
        assert!(cache.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_blank_input_keeps_previous_cache() {
        let summarizer = MockSummarizer::new(false);
        let cache = ResultCache::new();
        process_submission("first", &summarizer, &cache).await;

        process_submission("   ", &summarizer, &cache).await;
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_success_caches_items() {
        let summarizer = MockSummarizer::new(false);
        let cache = ResultCache::new();

        let outcome =
            process_submission("Fix login bug\n\n  Write Q3 report  \n", &summarizer, &cache)
                .await;
        assert_eq!(outcome.items().len(), 2);
        assert_eq!(
            summarizer.calls.lock().unwrap()[0],
            vec!["Fix login bug".to_string(), "Write Q3 report".to_string()]
        );
        assert_eq!(cache.snapshot().unwrap().as_slice(), outcome.items());
    }

    #[tokio::test]
    async fn test_second_submission_overwrites() {
        let summarizer = MockSummarizer::new(false);
        let cache = ResultCache::new();
        process_submission("a\nb\nc", &summarizer, &cache).await;
        process_submission("d", &summarizer, &cache).await;

        let items = cache.snapshot().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].original_task(), "d");
    }

    #[tokio::test]
    async fn test_failure_degrades_and_clears_cache() {
        let ok = MockSummarizer::new(false);
        let failing = MockSummarizer::new(true);
        let cache = ResultCache::new();
        process_submission("a", &ok, &cache).await;

        let outcome = process_submission("b", &failing, &cache).await;
        assert!(outcome.items().is_empty());
        assert_eq!(outcome.error().unwrap().kind(), LlmErrorKind::Connect);
        assert!(cache.is_empty());
    }
}
