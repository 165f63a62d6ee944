//! Goal domain type
//!
//! A Goal is the top-level record: a declared destination decomposed into an
//! ordered sequence of daily tasks. Streak counters live on the goal; the
//! task collection is persisted separately and keyed by `goal_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::generate_id;
use super::now_ms;
use crate::streak::StreakState;

/// A user's declared destination, decomposed into an ordered task sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier (e.g., "019430-goal-visit-iceland")
    pub id: String,

    /// Goal category
    pub category: Category,

    /// Free-text destination (what the user wants to reach)
    pub destination: String,

    /// Free-text timeline label (e.g., "3 months")
    pub timeline: String,

    /// Free-text motivation, in the user's own words
    pub user_story: String,

    /// Encouragement string produced by the generator ("boarding pass")
    pub boarding_pass: String,

    /// Soft-hidden after completion; never set by the engine on its own
    pub archived: bool,

    /// Consecutive-day completion streak for this goal
    pub current_streak: u32,

    /// Best streak this goal has ever reached
    pub longest_streak: u32,

    /// Calendar day of the most recent newly-recorded completion
    pub last_action_date: Option<NaiveDate>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Goal {
    /// Create a new Goal with generated ID
    pub fn new(
        category: Category,
        destination: impl Into<String>,
        timeline: impl Into<String>,
        user_story: impl Into<String>,
        boarding_pass: impl Into<String>,
    ) -> Self {
        let destination = destination.into();
        let now = now_ms();
        Self {
            id: generate_id("goal", &destination),
            category,
            destination,
            timeline: timeline.into(),
            user_story: user_story.into(),
            boarding_pass: boarding_pass.into(),
            archived: false,
            current_streak: 0,
            longest_streak: 0,
            last_action_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a Goal with a specific ID (for testing or recovery)
    pub fn with_id(
        id: impl Into<String>,
        category: Category,
        destination: impl Into<String>,
        timeline: impl Into<String>,
        user_story: impl Into<String>,
        boarding_pass: impl Into<String>,
    ) -> Self {
        let now = now_ms();
        Self {
            id: id.into(),
            category,
            destination: destination.into(),
            timeline: timeline.into(),
            user_story: user_story.into(),
            boarding_pass: boarding_pass.into(),
            archived: false,
            current_streak: 0,
            longest_streak: 0,
            last_action_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the archived flag
    pub fn set_archived(&mut self, archived: bool) {
        self.archived = archived;
        self.updated_at = now_ms();
    }

    /// Current streak fields as a value for the streak tracker
    pub fn streak_state(&self) -> StreakState {
        StreakState {
            current: self.current_streak,
            longest: self.longest_streak,
            last_action_date: self.last_action_date,
        }
    }

    /// Write back streak fields after an advancement
    pub fn apply_streak(&mut self, state: StreakState) {
        self.current_streak = state.current;
        self.longest_streak = state.longest;
        self.last_action_date = state.last_action_date;
        self.updated_at = now_ms();
    }
}
