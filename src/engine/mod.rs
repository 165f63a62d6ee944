//! Progression engine
//!
//! Owns the Goal/DailyTask invariants:
//!
//! - sequential gating: per goal, at most one task is unlocked and
//!   incomplete (the "current challenge")
//! - monotonic unlock: `is_unlocked` only ever goes false -> true, driven by
//!   the previous task completing
//! - idempotent completion: at most one completion entry per calendar day,
//!   and the streak advances at most once per day
//!
//! All persistence goes through the injected [`GoalStore`]; "today" is an
//! explicit parameter so callers own the calendar and tests can pin day
//! boundaries.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Category, DailyTask, Goal, TaskSpec};
use crate::store::{GoalFilter, GoalStore, StorageError};
use crate::streak::{self, StreakState};

/// Errors from progression operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Data integrity error: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Lift a gateway not-found into the engine's own taxonomy
fn lift_not_found(err: StorageError) -> EngineError {
    match err {
        StorageError::NotFound(id) => EngineError::NotFound(id),
        other => EngineError::Storage(other),
    }
}

/// Everything needed to create a goal with its task sequence
#[derive(Debug, Clone)]
pub struct CreateGoalRequest {
    pub category: Category,
    pub destination: String,
    pub timeline: String,
    pub user_story: String,
    /// Ordered task inputs; order is assigned from position
    pub task_specs: Vec<TaskSpec>,
    /// Encouragement string from the generator
    pub boarding_pass: String,
}

/// Result of a completion event
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    /// New progress percentage in [0, 100]
    pub progress: f64,
    /// Whether every task in the goal is now completed
    pub goal_complete: bool,
    /// False if this day already had a completion (no-op)
    pub newly_recorded: bool,
    /// ID of the task unlocked by this completion, if any
    pub unlocked_task_id: Option<String>,
    /// Per-goal streak after this event
    pub streak: StreakState,
    /// Process-wide streak counter after this event
    pub global_streak: u32,
}

// === Pure read-side queries over a goal's task slice ===

/// Completed task count / total count, as a percentage. 0.0 with no tasks.
pub fn progress_percent(tasks: &[DailyTask]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// The single unlocked-and-incomplete task, if any, lowest `order` first
pub fn current_challenge(tasks: &[DailyTask]) -> Option<&DailyTask> {
    tasks
        .iter()
        .filter(|t| t.is_unlocked && !t.is_completed())
        .min_by_key(|t| t.order)
}

/// Still-locked tasks, ordered
pub fn upcoming(tasks: &[DailyTask]) -> Vec<&DailyTask> {
    let mut locked: Vec<&DailyTask> = tasks.iter().filter(|t| !t.is_unlocked).collect();
    locked.sort_by_key(|t| t.order);
    locked
}

/// Completed tasks, ordered
pub fn completed_tasks(tasks: &[DailyTask]) -> Vec<&DailyTask> {
    let mut done: Vec<&DailyTask> = tasks.iter().filter(|t| t.is_completed()).collect();
    done.sort_by_key(|t| t.order);
    done
}

/// Orders must be exactly 0..N, unique and contiguous. Anything else is
/// corrupted data to surface, never to silently resolve.
fn check_order_integrity(goal_id: &str, tasks: &[DailyTask]) -> Result<(), EngineError> {
    let mut orders: Vec<usize> = tasks.iter().map(|t| t.order).collect();
    orders.sort_unstable();
    for (expected, actual) in orders.iter().enumerate() {
        if *actual != expected {
            return Err(EngineError::Integrity(format!(
                "Goal {} has non-contiguous task orders (expected {}, found {})",
                goal_id, expected, actual
            )));
        }
    }
    Ok(())
}

/// The progression engine. Collaborators are injected so tests can
/// substitute a fake gateway.
pub struct ProgressionEngine {
    store: Arc<dyn GoalStore>,
}

impl ProgressionEngine {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self { store }
    }

    /// Create a goal and its task sequence in one atomic write.
    ///
    /// Order is assigned from spec position; only task 0 starts unlocked.
    pub async fn create_goal(&self, request: CreateGoalRequest) -> Result<Goal, EngineError> {
        debug!(category = %request.category, destination = %request.destination, "create_goal: called");
        if request.task_specs.is_empty() {
            return Err(EngineError::Validation("Goal must have at least one task".to_string()));
        }

        let goal = Goal::new(
            request.category,
            request.destination,
            request.timeline,
            request.user_story,
            request.boarding_pass,
        );

        let tasks: Vec<DailyTask> = request
            .task_specs
            .iter()
            .enumerate()
            .map(|(order, spec)| DailyTask::from_spec(&goal.id, order, spec))
            .collect();

        self.store.create_goal_with_tasks(goal.clone(), tasks).await?;
        info!(goal_id = %goal.id, task_count = request.task_specs.len(), "Goal created");
        Ok(goal)
    }

    /// Record a completion for `on_date` and unlock the next task.
    ///
    /// The completion append is the commit point: unlock and streak writes
    /// happen only after it succeeds, and the streak advances only when the
    /// completion was newly recorded (not a same-day duplicate).
    pub async fn complete_task(
        &self,
        goal_id: &str,
        task_id: &str,
        on_date: NaiveDate,
    ) -> Result<CompletionOutcome, EngineError> {
        debug!(%goal_id, %task_id, %on_date, "complete_task: called");

        let goal = self
            .store
            .fetch_goal(goal_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Goal {}", goal_id)))?;
        let mut tasks = self.store.fetch_tasks(goal_id).await?;
        check_order_integrity(goal_id, &tasks)?;

        let idx = tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| EngineError::NotFound(format!("Task {} in goal {}", task_id, goal_id)))?;

        if !tasks[idx].is_unlocked {
            return Err(EngineError::InvalidState(format!(
                "Task {} is still locked; complete the previous challenge first",
                task_id
            )));
        }

        let newly_recorded = self.store.append_task_completion(task_id, on_date).await?;
        if newly_recorded {
            tasks[idx].record_completion(on_date);
        } else {
            debug!(%task_id, %on_date, "complete_task: duplicate same-day completion, no-op");
        }

        // Unlock the next task in sequence, if there is one
        let next_order = tasks[idx].order + 1;
        let mut unlocked_task_id = None;
        if let Some(next) = tasks.iter_mut().find(|t| t.order == next_order)
            && !next.is_unlocked
        {
            self.store.set_task_unlocked(&next.id, true).await?;
            next.unlock();
            unlocked_task_id = Some(next.id.clone());
            debug!(next_task = %next.id, "complete_task: unlocked next task");
        }

        // Advance streaks exactly once per newly-recorded completion
        let mut streak = goal.streak_state();
        let mut global_streak = self.store.global_streak().await?;
        if newly_recorded {
            streak = streak::advance(streak, on_date);
            self.store
                .update_goal_streak(goal_id, streak.current, streak.longest, streak.last_action_date)
                .await?;
            global_streak = self.store.raise_global_streak(streak.current).await?;
        }

        let progress = progress_percent(&tasks);
        let goal_complete = progress >= 100.0;
        info!(
            %goal_id,
            %task_id,
            progress,
            goal_complete,
            newly_recorded,
            "Task completion processed"
        );

        Ok(CompletionOutcome {
            progress,
            goal_complete,
            newly_recorded,
            unlocked_task_id,
            streak,
            global_streak,
        })
    }

    /// Remove the completion entry for the given calendar day, if present.
    ///
    /// Downstream tasks stay unlocked: unlocking is one-way, matching the
    /// source system. After removing task k's completion, both k and k+1 can
    /// be unlocked-and-incomplete at once. Streaks are likewise untouched.
    pub async fn remove_completion(
        &self,
        goal_id: &str,
        task_id: &str,
        on_date: NaiveDate,
    ) -> Result<(), EngineError> {
        debug!(%goal_id, %task_id, %on_date, "remove_completion: called");

        self.store
            .fetch_goal(goal_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Goal {}", goal_id)))?;
        let tasks = self.store.fetch_tasks(goal_id).await?;
        if !tasks.iter().any(|t| t.id == task_id) {
            return Err(EngineError::NotFound(format!("Task {} in goal {}", task_id, goal_id)));
        }

        self.store.remove_task_completion(task_id, on_date).await?;
        Ok(())
    }

    /// Current progress percentage for a goal
    pub async fn progress(&self, goal_id: &str) -> Result<f64, EngineError> {
        let tasks = self.fetch_tasks_checked(goal_id).await?;
        Ok(progress_percent(&tasks))
    }

    /// The goal's single unlocked-and-incomplete task, if any
    pub async fn current_challenge(&self, goal_id: &str) -> Result<Option<DailyTask>, EngineError> {
        let tasks = self.fetch_tasks_checked(goal_id).await?;
        Ok(current_challenge(&tasks).cloned())
    }

    /// Still-locked tasks, ordered
    pub async fn upcoming(&self, goal_id: &str) -> Result<Vec<DailyTask>, EngineError> {
        let tasks = self.fetch_tasks_checked(goal_id).await?;
        Ok(upcoming(&tasks).into_iter().cloned().collect())
    }

    /// Completed tasks, ordered
    pub async fn completed(&self, goal_id: &str) -> Result<Vec<DailyTask>, EngineError> {
        let tasks = self.fetch_tasks_checked(goal_id).await?;
        Ok(completed_tasks(&tasks).into_iter().cloned().collect())
    }

    /// List goals matching a filter
    pub async fn goals(&self, filter: GoalFilter) -> Result<Vec<Goal>, EngineError> {
        Ok(self.store.fetch_all_goals(filter).await?)
    }

    /// Soft-hide a completed goal
    pub async fn archive_goal(&self, goal_id: &str) -> Result<(), EngineError> {
        debug!(%goal_id, "archive_goal: called");
        self.store.archive_goal(goal_id).await.map_err(lift_not_found)
    }

    /// Make an archived goal visible again
    pub async fn unarchive_goal(&self, goal_id: &str) -> Result<(), EngineError> {
        debug!(%goal_id, "unarchive_goal: called");
        self.store.unarchive_goal(goal_id).await.map_err(lift_not_found)
    }

    /// Hard-delete a goal and all its tasks
    pub async fn delete_goal(&self, goal_id: &str) -> Result<(), EngineError> {
        debug!(%goal_id, "delete_goal: called");
        self.store.delete_goal(goal_id).await.map_err(lift_not_found)
    }

    /// Process-wide streak counter
    pub async fn global_streak(&self) -> Result<u32, EngineError> {
        Ok(self.store.global_streak().await?)
    }

    async fn fetch_tasks_checked(&self, goal_id: &str) -> Result<Vec<DailyTask>, EngineError> {
        self.store
            .fetch_goal(goal_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Goal {}", goal_id)))?;
        Ok(self.store.fetch_tasks(goal_id).await?)
    }
}
