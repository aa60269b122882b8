//! Streak computation.
//!
//! Pure functions over a habit's completed dates. The store feeds them the
//! dates whose record is `completed == true` and caches the results on the
//! habit; nothing here touches storage or the clock.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Completion;

/// Consecutive completed days ending at `reference`, inclusive.
///
/// Walks backward from `reference` and stops at the first missing day, so a
/// missing `reference` yields 0.
pub fn current_streak(completed: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = reference;
    while completed.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive days in `sorted`.
///
/// `sorted` must be ascending and free of duplicates; use
/// [`longest_streak_unsorted`] for arbitrary input.
pub fn longest_streak(sorted: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in sorted {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// [`longest_streak`] for input in any order, duplicates allowed.
pub fn longest_streak_unsorted<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let sorted: Vec<NaiveDate> = unique.into_iter().collect();
    longest_streak(&sorted)
}

/// `round(100 * completed_days / total_logged_days)`, or 0 with no logged days.
///
/// The denominator counts days with any record, completed or toggled off.
pub fn completion_rate(total_logged_days: usize, completed_days: usize) -> u8 {
    if total_logged_days == 0 {
        return 0;
    }
    let rate = (completed_days as f64 / total_logged_days as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

/// Everything derived from one habit's completion records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
    pub logged_days: usize,
    pub completed_days: usize,
}

impl StreakSummary {
    /// Summarize the records of a single habit relative to `today`.
    pub fn from_completions(completions: &[Completion], today: NaiveDate) -> Self {
        let completed: BTreeSet<NaiveDate> = completions
            .iter()
            .filter(|c| c.completed)
            .map(|c| c.date)
            .collect();
        let sorted: Vec<NaiveDate> = completed.iter().copied().collect();

        Self {
            current: current_streak(&completed, today),
            longest: longest_streak(&sorted),
            logged_days: completions.len(),
            completed_days: completed.len(),
        }
    }

    pub fn completion_rate(&self) -> u8 {
        completion_rate(self.logged_days, self.completed_days)
    }
}
