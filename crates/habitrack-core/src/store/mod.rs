//! In-memory habit store.
//!
//! [`HabitStore`] owns every habit and the [`CompletionLog`]. Toggling a
//! completion recomputes that habit's streaks before returning, so the
//! cached `current_streak`/`longest_streak` always reflect the last write.

mod completion_log;
pub mod sample;
mod shared;

pub use completion_log::CompletionLog;
pub use shared::SharedStore;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::habit::{
    Completion, Habit, HabitPatch, HabitWithStats, NewHabit, DEFAULT_COLOR, DEFAULT_ICON,
};
use crate::streak::StreakSummary;

/// Icon and color applied when a new habit omits them, and whether input
/// tokens must come from the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDefaults {
    pub icon: String,
    pub color: String,
    pub strict_palette: bool,
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            strict_palette: false,
        }
    }
}

pub struct HabitStore {
    habits: IndexMap<i64, Habit>,
    completions: CompletionLog,
    next_habit_id: i64,
    defaults: HabitDefaults,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for HabitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HabitStore")
            .field("habits", &self.habits.len())
            .field("completions", &self.completions.len())
            .field("next_habit_id", &self.next_habit_id)
            .field("today", &self.today())
            .finish()
    }
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitStore {
    /// Empty store measuring "today" with the UTC system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            habits: IndexMap::new(),
            completions: CompletionLog::new(),
            next_habit_id: 1,
            defaults: HabitDefaults::default(),
            clock: Box::new(clock),
        }
    }

    pub fn with_defaults(mut self, defaults: HabitDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Rebuild a store from persisted state. Cached streak fields are taken
    /// as stored.
    pub fn restore(
        clock: impl Clock + 'static,
        habits: Vec<Habit>,
        completions: CompletionLog,
        next_habit_id: i64,
    ) -> Self {
        let max_id = habits.iter().map(|h| h.id).max().unwrap_or(0);
        Self {
            habits: habits.into_iter().map(|h| (h.id, h)).collect(),
            completions,
            next_habit_id: next_habit_id.max(max_id + 1),
            defaults: HabitDefaults::default(),
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn next_habit_id(&self) -> i64 {
        self.next_habit_id
    }

    pub fn completion_log(&self) -> &CompletionLog {
        &self.completions
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    // === Habits ===

    pub fn list_habits(&self) -> Vec<Habit> {
        self.habits.values().cloned().collect()
    }

    /// # Errors
    /// [`CoreError::NotFound`] if no habit has this id.
    pub fn get_habit(&self, id: i64) -> Result<Habit> {
        self.habits
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound { id })
    }

    /// Create a habit with the next sequential id and zero streaks.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank, or if a token is
    /// outside the palette while it is strict.
    pub fn create(&mut self, new: NewHabit) -> Result<Habit> {
        let new = new.validate_with(self.defaults.strict_palette)?;
        let habit = Habit {
            id: self.next_habit_id,
            name: new.name,
            description: new.description,
            icon: new.icon.unwrap_or_else(|| self.defaults.icon.clone()),
            color: new.color.unwrap_or_else(|| self.defaults.color.clone()),
            current_streak: 0,
            longest_streak: 0,
            created_at: self.today(),
        };
        self.next_habit_id += 1;
        self.habits.insert(habit.id, habit.clone());
        debug!(habit_id = habit.id, name = %habit.name, "habit created");
        Ok(habit)
    }

    /// Merge name/description/icon/color into an existing habit.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] for an unknown id, or a validation error.
    pub fn update(&mut self, id: i64, patch: HabitPatch) -> Result<Habit> {
        let patch = patch.validate_with(self.defaults.strict_palette)?;
        let habit = self
            .habits
            .get_mut(&id)
            .ok_or(CoreError::NotFound { id })?;
        habit.apply_patch(patch);
        debug!(habit_id = id, "habit updated");
        Ok(habit.clone())
    }

    /// Remove a habit and all of its completions. Returns whether it existed.
    pub fn delete(&mut self, id: i64) -> bool {
        if self.habits.shift_remove(&id).is_none() {
            return false;
        }
        let removed = self.completions.delete_by_habit(id);
        debug!(habit_id = id, removed_completions = removed, "habit deleted");
        true
    }

    // === Completions ===

    pub fn list_completions(
        &self,
        habit_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Vec<Completion> {
        self.completions.get(habit_id, date)
    }

    /// Toggle `(id, date)` and recompute the habit's streaks.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if the habit does not exist; nothing is
    /// logged in that case.
    pub fn toggle_completion(&mut self, id: i64, date: NaiveDate) -> Result<Completion> {
        if !self.habits.contains_key(&id) {
            return Err(CoreError::NotFound { id });
        }
        let completion = self.completions.toggle(id, date);
        debug!(
            habit_id = id,
            %date,
            completed = completion.completed,
            "completion toggled"
        );
        self.recompute_streaks(id)?;
        Ok(completion)
    }

    /// Recompute a habit's streaks against today and cache them.
    ///
    /// `longest_streak` only ever grows.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] if the habit does not exist.
    pub fn recompute_streaks(&mut self, id: i64) -> Result<StreakSummary> {
        let today = self.today();
        let records = self.completions.get(Some(id), None);
        let habit = self
            .habits
            .get_mut(&id)
            .ok_or(CoreError::NotFound { id })?;

        let summary = StreakSummary::from_completions(&records, today);
        habit.apply_streaks(&summary);
        debug!(
            habit_id = id,
            current = habit.current_streak,
            longest = habit.longest_streak,
            "streaks recomputed"
        );
        Ok(summary)
    }

    /// Recompute every habit, e.g. so lapsed streaks drop to zero.
    pub fn recompute_all(&mut self) -> Result<()> {
        let ids: Vec<i64> = self.habits.keys().copied().collect();
        for id in ids {
            self.recompute_streaks(id)?;
        }
        Ok(())
    }

    // === Statistics ===

    /// Every habit with its completion rate and whether `target` (default
    /// today) is completed. Streaks come from the cached fields.
    pub fn list_with_stats(&self, target: Option<NaiveDate>) -> Vec<HabitWithStats> {
        let target = target.unwrap_or_else(|| self.today());
        self.habits
            .values()
            .map(|habit| {
                let records = self.completions.get(Some(habit.id), None);
                let completed = records.iter().filter(|c| c.completed).count();
                HabitWithStats {
                    habit: habit.clone(),
                    completion_rate: crate::streak::completion_rate(records.len(), completed),
                    completed_today: self
                        .completions
                        .find(habit.id, target)
                        .map_or(false, |c| c.completed),
                }
            })
            .collect()
    }
}
