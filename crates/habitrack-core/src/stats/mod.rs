//! Aggregate statistics across all habits.
//!
//! - [`Overview`]: headline numbers for the stats page
//! - [`calendar`]: per-day completion status for a month

pub mod calendar;

pub use calendar::{month_calendar, CalendarDay, DayStatus, StreakPosition};

use serde::{Deserialize, Serialize};

use crate::habit::HabitWithStats;

/// Headline numbers across every habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub habit_count: usize,
    /// Highest `longest_streak` of any habit.
    pub best_streak: u32,
    /// Mean completion rate, rounded.
    pub average_completion_rate: u8,
    /// Sum of all current streaks.
    pub active_streak_days: u32,
    pub completed_today: usize,
}

impl Overview {
    pub fn from_habits(habits: &[HabitWithStats]) -> Self {
        if habits.is_empty() {
            return Self::default();
        }
        let rate_sum: u32 = habits.iter().map(|h| u32::from(h.completion_rate)).sum();
        Self {
            habit_count: habits.len(),
            best_streak: habits
                .iter()
                .map(|h| h.habit.longest_streak)
                .max()
                .unwrap_or(0),
            average_completion_rate: (f64::from(rate_sum) / habits.len() as f64).round() as u8,
            active_streak_days: habits.iter().map(|h| h.habit.current_streak).sum(),
            completed_today: habits.iter().filter(|h| h.completed_today).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Habit;
    use chrono::NaiveDate;

    fn stats(id: i64, current: u32, longest: u32, rate: u8, today: bool) -> HabitWithStats {
        HabitWithStats {
            habit: Habit {
                id,
                name: format!("habit {id}"),
                description: None,
                icon: "fas fa-check".into(),
                color: "emerald".into(),
                current_streak: current,
                longest_streak: longest,
                created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            },
            completion_rate: rate,
            completed_today: today,
        }
    }

    #[test]
    fn empty_overview_is_zero() {
        assert_eq!(Overview::from_habits(&[]), Overview::default());
    }

    #[test]
    fn overview_aggregates() {
        let overview = Overview::from_habits(&[
            stats(1, 3, 7, 100, true),
            stats(2, 0, 4, 33, false),
            stats(3, 1, 1, 50, true),
        ]);
        assert_eq!(overview.habit_count, 3);
        assert_eq!(overview.best_streak, 7);
        assert_eq!(overview.average_completion_rate, 61);
        assert_eq!(overview.active_streak_days, 4);
        assert_eq!(overview.completed_today, 2);
    }
}
