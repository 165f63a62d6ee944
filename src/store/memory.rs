//! In-memory reference implementation of the persistence gateway
//!
//! All state lives behind a single async mutex, so each gateway call commits
//! as a unit and readers never observe a half-written goal. Suitable for
//! tests and as the reference semantics for durable backends.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{DailyTask, Goal};

use super::{GoalFilter, GoalStore, StorageError};

#[derive(Debug, Default)]
struct State {
    goals: HashMap<String, Goal>,
    /// Tasks keyed by task ID; goal membership via `goal_id`
    tasks: HashMap<String, DailyTask>,
    global_streak: u32,
}

/// In-memory goal store
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn create_goal_with_tasks(&self, goal: Goal, tasks: Vec<DailyTask>) -> Result<String, StorageError> {
        debug!(goal_id = %goal.id, task_count = tasks.len(), "create_goal_with_tasks: called");
        let mut state = self.state.lock().await;

        if state.goals.contains_key(&goal.id) {
            return Err(StorageError::Backend(format!("Goal already exists: {}", goal.id)));
        }
        for task in &tasks {
            if task.goal_id != goal.id {
                return Err(StorageError::Backend(format!(
                    "Task {} does not belong to goal {}",
                    task.id, goal.id
                )));
            }
        }

        let id = goal.id.clone();
        for task in tasks {
            state.tasks.insert(task.id.clone(), task);
        }
        state.goals.insert(id.clone(), goal);
        Ok(id)
    }

    async fn fetch_all_goals(&self, filter: GoalFilter) -> Result<Vec<Goal>, StorageError> {
        debug!(?filter, "fetch_all_goals: called");
        let state = self.state.lock().await;
        let mut goals: Vec<Goal> = state.goals.values().filter(|g| filter.matches(g)).cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(goals)
    }

    async fn fetch_goal(&self, id: &str) -> Result<Option<Goal>, StorageError> {
        debug!(%id, "fetch_goal: called");
        let state = self.state.lock().await;
        Ok(state.goals.get(id).cloned())
    }

    async fn fetch_tasks(&self, goal_id: &str) -> Result<Vec<DailyTask>, StorageError> {
        debug!(%goal_id, "fetch_tasks: called");
        let state = self.state.lock().await;
        let mut tasks: Vec<DailyTask> = state.tasks.values().filter(|t| t.goal_id == goal_id).cloned().collect();
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    async fn delete_goal(&self, id: &str) -> Result<(), StorageError> {
        debug!(%id, "delete_goal: called");
        let mut state = self.state.lock().await;
        if state.goals.remove(id).is_none() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        // Cascade to owned tasks
        state.tasks.retain(|_, t| t.goal_id != id);
        Ok(())
    }

    async fn archive_goal(&self, id: &str) -> Result<(), StorageError> {
        debug!(%id, "archive_goal: called");
        let mut state = self.state.lock().await;
        let goal = state
            .goals
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        goal.set_archived(true);
        Ok(())
    }

    async fn unarchive_goal(&self, id: &str) -> Result<(), StorageError> {
        debug!(%id, "unarchive_goal: called");
        let mut state = self.state.lock().await;
        let goal = state
            .goals
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        goal.set_archived(false);
        Ok(())
    }

    async fn append_task_completion(&self, task_id: &str, date: NaiveDate) -> Result<bool, StorageError> {
        debug!(%task_id, %date, "append_task_completion: called");
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StorageError::NotFound(task_id.to_string()))?;
        Ok(task.record_completion(date))
    }

    async fn remove_task_completion(&self, task_id: &str, date: NaiveDate) -> Result<(), StorageError> {
        debug!(%task_id, %date, "remove_task_completion: called");
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StorageError::NotFound(task_id.to_string()))?;
        task.remove_completion(date);
        Ok(())
    }

    async fn set_task_unlocked(&self, task_id: &str, unlocked: bool) -> Result<(), StorageError> {
        debug!(%task_id, %unlocked, "set_task_unlocked: called");
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StorageError::NotFound(task_id.to_string()))?;
        if unlocked {
            task.unlock();
        }
        // Unlocking is one-way; a false value is ignored rather than reversed
        Ok(())
    }

    async fn update_goal_streak(
        &self,
        goal_id: &str,
        current: u32,
        longest: u32,
        last_action_date: Option<NaiveDate>,
    ) -> Result<(), StorageError> {
        debug!(%goal_id, current, longest, "update_goal_streak: called");
        let mut state = self.state.lock().await;
        let goal = state
            .goals
            .get_mut(goal_id)
            .ok_or_else(|| StorageError::NotFound(goal_id.to_string()))?;
        goal.apply_streak(crate::streak::StreakState {
            current,
            longest,
            last_action_date,
        });
        Ok(())
    }

    async fn global_streak(&self) -> Result<u32, StorageError> {
        let state = self.state.lock().await;
        Ok(state.global_streak)
    }

    async fn raise_global_streak(&self, candidate: u32) -> Result<u32, StorageError> {
        debug!(candidate, "raise_global_streak: called");
        let mut state = self.state.lock().await;
        if candidate > state.global_streak {
            state.global_streak = candidate;
        }
        Ok(state.global_streak)
    }
}
