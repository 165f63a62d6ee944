//! DailyTask domain type
//!
//! A DailyTask ("challenge" in user-facing terms) is one step in a goal's
//! sequence. Tasks unlock strictly in `order`: task 0 is unlocked at
//! creation, and completing the task at `order - 1` unlocks the next.
//! Unlocking is one-way; removing a completion never re-locks anything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::now_ms;

/// Input for creating one task: what the generator (or caller) provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Short actionable title
    pub title: String,

    /// What to actually do
    pub description: String,

    /// Estimated-duration label, free text (e.g., "5 min")
    pub duration: String,
}

impl TaskSpec {
    pub fn new(title: impl Into<String>, description: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
        }
    }
}

/// One step in a goal's sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTask {
    /// Unique identifier (e.g., "019431-task-book-flights")
    pub id: String,

    /// Owning goal's identifier
    pub goal_id: String,

    /// Short actionable title
    pub title: String,

    /// What to actually do
    pub description: String,

    /// Estimated-duration label, free text
    pub duration: String,

    /// Position within the goal, unique and contiguous in [0, N)
    pub order: usize,

    /// One-way flag: transitions false -> true only
    pub is_unlocked: bool,

    /// Calendar days with a recorded completion, at most one entry per day
    pub completions: Vec<NaiveDate>,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl DailyTask {
    /// Create a task at the given position. Only position 0 starts unlocked.
    pub fn from_spec(goal_id: impl Into<String>, order: usize, spec: &TaskSpec) -> Self {
        let now = now_ms();
        Self {
            id: generate_id("task", &spec.title),
            goal_id: goal_id.into(),
            title: spec.title.clone(),
            description: spec.description.clone(),
            duration: spec.duration.clone(),
            order,
            is_unlocked: order == 0,
            completions: Vec::new(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A task is completed once it has at least one recorded completion
    pub fn is_completed(&self) -> bool {
        !self.completions.is_empty()
    }

    /// Earliest recorded completion day, if any
    pub fn completed_at(&self) -> Option<NaiveDate> {
        self.completions.iter().min().copied()
    }

    /// Whether a completion is recorded for the given calendar day
    pub fn has_completion_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }

    /// Record a completion for the given day.
    ///
    /// Returns false (and records nothing) if that day already has an entry.
    pub fn record_completion(&mut self, date: NaiveDate) -> bool {
        if self.has_completion_on(date) {
            return false;
        }
        self.completions.push(date);
        self.updated_at = now_ms();
        true
    }

    /// Remove the completion entry for the given day, if present
    pub fn remove_completion(&mut self, date: NaiveDate) {
        let before = self.completions.len();
        self.completions.retain(|d| *d != date);
        if self.completions.len() != before {
            self.updated_at = now_ms();
        }
    }

    /// Unlock the task. One-way: never reversed.
    pub fn unlock(&mut self) {
        if !self.is_unlocked {
            self.is_unlocked = true;
            self.updated_at = now_ms();
        }
    }

    /// Set the due date
    pub fn set_due_date(&mut self, due: Option<NaiveDate>) {
        self.due_date = due;
        self.updated_at = now_ms();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_from_spec_first_task_unlocked() {
        let spec = TaskSpec::new("Book flights", "Compare fares and book", "20 min");
        let task = DailyTask::from_spec("goal-1", 0, &spec);
        assert!(task.id.contains("-task-"));
        assert_eq!(task.goal_id, "goal-1");
        assert_eq!(task.order, 0);
        assert!(task.is_unlocked);
        assert!(!task.is_completed());
    }

    #[test]
    fn test_from_spec_later_tasks_locked() {
        let spec = TaskSpec::new("Pack bags", "Make a packing list", "15 min");
        let task = DailyTask::from_spec("goal-1", 3, &spec);
        assert!(!task.is_unlocked);
    }

    #[test]
    fn test_record_completion_dedup_same_day() {
        let mut task = DailyTask::from_spec("goal-1", 0, &TaskSpec::new("t", "d", "5 min"));

        assert!(task.record_completion(day(10)));
        assert!(!task.record_completion(day(10)));
        assert_eq!(task.completions.len(), 1);

        // Different day is a new entry
        assert!(task.record_completion(day(11)));
        assert_eq!(task.completions.len(), 2);
    }

    #[test]
    fn test_completed_at_is_earliest() {
        let mut task = DailyTask::from_spec("goal-1", 0, &TaskSpec::new("t", "d", "5 min"));
        task.record_completion(day(12));
        task.record_completion(day(10));
        task.record_completion(day(11));
        assert_eq!(task.completed_at(), Some(day(10)));
    }

    #[test]
    fn test_remove_completion() {
        let mut task = DailyTask::from_spec("goal-1", 0, &TaskSpec::new("t", "d", "5 min"));
        task.record_completion(day(10));
        task.remove_completion(day(10));
        assert!(!task.is_completed());

        // Removing a day that has no entry is a no-op
        task.remove_completion(day(11));
        assert!(task.completions.is_empty());
    }

    #[test]
    fn test_unlock_is_one_way() {
        let mut task = DailyTask::from_spec("goal-1", 2, &TaskSpec::new("t", "d", "5 min"));
        assert!(!task.is_unlocked);
        task.unlock();
        assert!(task.is_unlocked);
        task.unlock();
        assert!(task.is_unlocked);
    }

    #[test]
    fn test_task_serde() {
        let mut task = DailyTask::from_spec("goal-1", 1, &TaskSpec::new("Title", "Desc", "10 min"));
        task.record_completion(day(1));
        task.set_due_date(Some(day(20)));

        let json = serde_json::to_string(&task).unwrap();
        let deserialized: DailyTask = serde_json::from_str(&json).unwrap();

        assert_eq!(task.id, deserialized.id);
        assert_eq!(task.order, deserialized.order);
        assert_eq!(task.completions, deserialized.completions);
        assert_eq!(task.due_date, deserialized.due_date);
    }
}
