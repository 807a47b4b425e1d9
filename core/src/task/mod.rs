mod item;
mod normalize;

pub use item::{Priority, ResultSet, TaskItem, MISSING_PRIORITY, MISSING_TEXT};
pub use normalize::normalize_tasks;
