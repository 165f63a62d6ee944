//! Persistence gateway
//!
//! `GoalStore` is the seam between the progression engine and durable
//! storage. The engine only ever talks to this trait; tests and the
//! reference implementation use [`MemoryStore`].
//!
//! Every mutation is atomic per call: a goal is never observable with some
//! tasks persisted and others missing.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Category, DailyTask, Goal};

mod memory;

pub use memory::MemoryStore;

/// Errors from gateway operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Predicate for listing goals
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalFilter {
    /// Match only goals with this archived state
    pub archived: Option<bool>,

    /// Match only goals in this category
    pub category: Option<Category>,
}

impl GoalFilter {
    /// Everything, archived or not
    pub fn all() -> Self {
        Self::default()
    }

    /// Only goals still visible to the user
    pub fn active() -> Self {
        Self {
            archived: Some(false),
            category: None,
        }
    }

    /// Whether a goal passes this filter
    pub fn matches(&self, goal: &Goal) -> bool {
        if let Some(archived) = self.archived
            && goal.archived != archived
        {
            return false;
        }
        if let Some(category) = self.category
            && goal.category != category
        {
            return false;
        }
        true
    }
}

/// Durable storage for goals, tasks, and the process-wide streak counter
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Persist a goal together with its full task list, all-or-nothing
    async fn create_goal_with_tasks(&self, goal: Goal, tasks: Vec<DailyTask>) -> Result<String, StorageError>;

    /// List goals matching the filter
    async fn fetch_all_goals(&self, filter: GoalFilter) -> Result<Vec<Goal>, StorageError>;

    /// Fetch a goal by ID
    async fn fetch_goal(&self, id: &str) -> Result<Option<Goal>, StorageError>;

    /// Fetch a goal's tasks, sorted by `order`
    async fn fetch_tasks(&self, goal_id: &str) -> Result<Vec<DailyTask>, StorageError>;

    /// Delete a goal, cascading to all owned tasks
    async fn delete_goal(&self, id: &str) -> Result<(), StorageError>;

    /// Soft-hide a goal
    async fn archive_goal(&self, id: &str) -> Result<(), StorageError>;

    /// Make an archived goal visible again
    async fn unarchive_goal(&self, id: &str) -> Result<(), StorageError>;

    /// Append a completion for the given calendar day.
    ///
    /// Returns true if newly added, false if that day already had an entry.
    async fn append_task_completion(&self, task_id: &str, date: NaiveDate) -> Result<bool, StorageError>;

    /// Remove the completion entry for the given calendar day, if present
    async fn remove_task_completion(&self, task_id: &str, date: NaiveDate) -> Result<(), StorageError>;

    /// Set a task's unlocked flag
    async fn set_task_unlocked(&self, task_id: &str, unlocked: bool) -> Result<(), StorageError>;

    /// Write a goal's streak fields
    async fn update_goal_streak(
        &self,
        goal_id: &str,
        current: u32,
        longest: u32,
        last_action_date: Option<NaiveDate>,
    ) -> Result<(), StorageError>;

    /// Read the process-wide streak counter
    async fn global_streak(&self) -> Result<u32, StorageError>;

    /// Raise the process-wide counter to `candidate` if it exceeds the
    /// stored value. Returns the resulting counter. Never lowers it.
    async fn raise_global_streak(&self, candidate: u32) -> Result<u32, StorageError>;
}
