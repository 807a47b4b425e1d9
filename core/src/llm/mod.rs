pub mod error;
pub mod prompt;
pub mod r#trait;

pub use error::{preview_body, LlmError, LlmErrorKind};
pub use prompt::{build_user_message, parse_task_items, SYSTEM_PROMPT};
pub use r#trait::TaskSummarizer;
