//! Month calendar of completion status across all habits.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::habit::Completion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Nothing completed.
    None,
    /// Some but not all habits completed.
    Partial,
    /// Every habit completed.
    Complete,
}

/// Where a complete day sits within a run of two or more complete days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPosition {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub completed: usize,
    pub status: DayStatus,
    /// Only set for complete days with a complete neighbour.
    pub streak: Option<StreakPosition>,
}

struct DayCounts {
    completed: HashMap<NaiveDate, usize>,
    habit_count: usize,
}

impl DayCounts {
    fn completed_on(&self, date: NaiveDate) -> usize {
        self.completed.get(&date).copied().unwrap_or(0)
    }

    fn status(&self, date: NaiveDate) -> DayStatus {
        match self.completed_on(date) {
            0 => DayStatus::None,
            n if n >= self.habit_count => DayStatus::Complete,
            _ => DayStatus::Partial,
        }
    }

    fn is_complete(&self, date: Option<NaiveDate>) -> bool {
        date.map_or(false, |d| self.status(d) == DayStatus::Complete)
    }
}

/// One entry per day of `year`-`month`.
///
/// Neighbouring days outside the month still count when placing a day
/// within a streak.
pub fn month_calendar(
    year: i32,
    month: u32,
    habit_count: usize,
    completions: &[Completion],
) -> Result<Vec<CalendarDay>, ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ValidationError::InvalidValue {
            field: "month".into(),
            message: format!("{year}-{month:02} is not a valid month"),
        }
    })?;

    let mut completed = HashMap::new();
    for c in completions.iter().filter(|c| c.completed) {
        *completed.entry(c.date).or_insert(0) += 1;
    }
    let counts = DayCounts {
        completed,
        habit_count,
    };

    let days = (0..31)
        .map(|offset| first + Duration::days(offset))
        .take_while(|d| d.month() == month)
        .map(|date| {
            let status = counts.status(date);
            let streak = if status == DayStatus::Complete {
                let prev = counts.is_complete(date.pred_opt());
                let next = counts.is_complete(date.succ_opt());
                match (prev, next) {
                    (true, true) => Some(StreakPosition::Middle),
                    (true, false) => Some(StreakPosition::End),
                    (false, true) => Some(StreakPosition::Start),
                    (false, false) => None,
                }
            } else {
                None
            };
            CalendarDay {
                date,
                completed: counts.completed_on(date),
                status,
                streak,
            }
        })
        .collect();
    Ok(days)
}
