/// Streak calculation over the journal history
///
/// This module defines the StreakInfo struct that holds derived streak
/// information and the pure function that computes it from a journal
/// snapshot. Nothing here is persisted; it is recomputed on every request.

use serde::Serialize;
use chrono::NaiveDate;
use crate::domain::dates;
use crate::domain::{is_day_complete, JournalSnapshot};

/// Upper bound on the number of days a single walk will count
pub const MAX_STREAK_DAYS: u32 = 365;

/// Calculated streak information for the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakInfo {
    /// Consecutive complete days ending today (or yesterday, if today is still open)
    pub current_streak: u32,
    /// Most recent complete day, if the streak is alive
    pub last_completed_date: Option<NaiveDate>,
    /// Whether today's entry is already complete
    pub is_today_complete: bool,
    /// Yesterday was complete, today is not yet, and a streak exists
    pub is_streak_at_risk: bool,
}

impl StreakInfo {
    /// Compute streak statistics for `today` from a read-only snapshot
    ///
    /// The walk starts at today when today is complete, otherwise at
    /// yesterday, so an unfinished current day does not break the count.
    pub fn calculate(snapshot: &JournalSnapshot, today: NaiveDate) -> Self {
        let yesterday = dates::yesterday(today);
        let complete = |date: &NaiveDate| is_day_complete(snapshot.get(date));

        let is_today_complete = complete(&today);
        let was_yesterday_complete = complete(&yesterday);

        // Count consecutive days backwards
        let mut checking_date = if is_today_complete { today } else { yesterday };
        let mut current_streak = 0;
        while current_streak < MAX_STREAK_DAYS && complete(&checking_date) {
            current_streak += 1;
            checking_date = dates::previous_day(checking_date);
        }

        let is_streak_at_risk = !is_today_complete && was_yesterday_complete && current_streak > 0;

        let last_completed_date = if is_today_complete {
            Some(today)
        } else if was_yesterday_complete {
            Some(yesterday)
        } else if current_streak > 0 {
            snapshot.keys().rev().find(|date| complete(*date)).copied()
        } else {
            None
        };

        Self {
            current_streak,
            last_completed_date,
            is_today_complete,
            is_streak_at_risk,
        }
    }

    /// Get an encouraging message for the current streak status
    pub fn message(&self) -> String {
        if self.current_streak == 0 {
            return "Start your streak today! 🌱".to_string();
        }
        if self.is_streak_at_risk {
            return format!("Complete today to keep your {}-day streak! ⏰", self.current_streak);
        }
        if self.is_today_complete {
            return match self.current_streak {
                1 => "Great start! Day 1 complete! 🎉".to_string(),
                2..=6 => format!("{} days strong! Keep going! 💪", self.current_streak),
                7..=29 => format!("Amazing! {}-day streak! 🔥", self.current_streak),
                30..=99 => format!("Incredible! {} days of consistency! ⭐", self.current_streak),
                _ => format!("Legendary! {}-day streak! 🏆", self.current_streak),
            };
        }
        format!("{}-day streak! Complete today to continue! ✨", self.current_streak)
    }
}
