//! Streak tracking
//!
//! Pure computation over `(lastActionDate, today)`. The caller supplies
//! "today" as a calendar day, so tests can pin day boundaries and the engine
//! can use whatever calendar the device considers local.
//!
//! Rules:
//! - last action today: no change (already counted)
//! - last action exactly yesterday: current + 1
//! - gap of two or more days, or no prior action: current resets to 1
//! - longest = max(longest, current), last action becomes today
//!
//! Must be applied exactly once per newly-recorded completion; the engine
//! skips it for same-day duplicates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-goal streak fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive calendar days with at least one completion
    pub current: u32,

    /// Best value `current` has ever reached
    pub longest: u32,

    /// Day of the most recent counted action
    pub last_action_date: Option<NaiveDate>,
}

/// Advance a streak for an action on `today`
pub fn advance(state: StreakState, today: NaiveDate) -> StreakState {
    let current = match state.last_action_date {
        Some(last) if last == today => return state,
        Some(last) if last.succ_opt() == Some(today) => state.current + 1,
        _ => 1,
    };

    StreakState {
        current,
        longest: state.longest.max(current),
        last_action_date: Some(today),
    }
}
