//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `tasksift_core::api` instead of reaching into internal modules.

pub use crate::cache::ResultCache;
pub use crate::config::{load_default, load_env_files, AppConfig, LlmConfig, LoggingConfig, ServerConfig};
pub use crate::context::{Services, ServicesFactory};
pub use crate::error::{CliError, ExportError, RenderError};
pub use crate::llm::{
    build_user_message, parse_task_items, preview_body, LlmError, LlmErrorKind, TaskSummarizer,
    SYSTEM_PROMPT,
};
pub use crate::pipeline::{process_submission, Outcome};
pub use crate::render::{priority_class, render_csv, HtmlRenderer, CSV_FILENAME};
pub use crate::task::{normalize_tasks, Priority, ResultSet, TaskItem};
