//! Habit and completion records.
//!
//! A [`Habit`] carries two cached streak fields that only the store writes.
//! Client input arrives as [`NewHabit`] (create) or [`HabitPatch`] (update);
//! neither type has an id or streak field, so a client can never overwrite
//! them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::streak::StreakSummary;

/// Icon used when a habit is created without one.
pub const DEFAULT_ICON: &str = "fas fa-check";
/// Color used when a habit is created without one.
pub const DEFAULT_COLOR: &str = "emerald";

/// A tracked habit with its cached streak values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Opaque icon token chosen by the UI.
    pub icon: String,
    /// Opaque color token chosen by the UI.
    pub color: String,
    /// Consecutive completed days ending at the day of the last recompute.
    pub current_streak: u32,
    /// Highest streak ever computed for this habit. Never decreases.
    pub longest_streak: u32,
    pub created_at: NaiveDate,
}

impl Habit {
    /// Merge the present fields of `patch` into this habit.
    pub fn apply_patch(&mut self, patch: HabitPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    /// Write freshly computed streaks back onto the cached fields.
    ///
    /// `current_streak` is overwritten; `longest_streak` keeps the running
    /// maximum so a peak survives un-toggled days.
    pub fn apply_streaks(&mut self, summary: &StreakSummary) {
        self.current_streak = summary.current;
        self.longest_streak = self.longest_streak.max(summary.longest);
    }
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Partial update of a habit's user-editable fields.
///
/// `description` distinguishes "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A present field, `null` included, becomes `Some`. A missing one falls
/// back to `#[serde(default)]`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

/// One logged day for one habit. `(habit_id, date)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub id: i64,
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
}

/// A habit merged with its display statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithStats {
    #[serde(flatten)]
    pub habit: Habit,
    /// Percentage of logged days that are completed, 0..=100.
    pub completion_rate: u8,
    /// Whether a completed record exists for the target date.
    pub completed_today: bool,
}
