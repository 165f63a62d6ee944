//! Domain types: goals, daily tasks, categories, IDs

mod category;
mod goal;
mod id;
mod task;

pub use category::Category;
pub use goal::Goal;
pub use id::generate_id;
pub use task::{DailyTask, TaskSpec};

/// Current time as Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
