//! Thread-safe handle over a [`HabitStore`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::HabitStore;
use crate::error::Result;
use crate::habit::{Completion, Habit, HabitPatch, HabitWithStats, NewHabit};
use crate::streak::StreakSummary;

/// Cloneable handle sharing one store between callers.
///
/// Every mutation holds the single write lock for its whole duration, so
/// the `(habit_id, date)` key and the monotonic longest streak hold under
/// concurrent toggles. Reads share the read lock and never observe half of
/// a write.
#[derive(Debug, Clone)]
pub struct SharedStore(Arc<RwLock<HabitStore>>);

impl SharedStore {
    pub fn new(store: HabitStore) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, HabitStore>> {
        Ok(self.0.read()?)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, HabitStore>> {
        Ok(self.0.write()?)
    }

    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        Ok(self.read()?.list_habits())
    }

    pub fn get_habit(&self, id: i64) -> Result<Habit> {
        self.read()?.get_habit(id)
    }

    pub fn create_habit(&self, new: NewHabit) -> Result<Habit> {
        self.write()?.create(new)
    }

    pub fn update_habit(&self, id: i64, patch: HabitPatch) -> Result<Habit> {
        self.write()?.update(id, patch)
    }

    pub fn delete_habit(&self, id: i64) -> Result<bool> {
        Ok(self.write()?.delete(id))
    }

    pub fn list_completions(
        &self,
        habit_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Completion>> {
        Ok(self.read()?.list_completions(habit_id, date))
    }

    pub fn toggle_completion(&self, habit_id: i64, date: NaiveDate) -> Result<Completion> {
        self.write()?.toggle_completion(habit_id, date)
    }

    pub fn recompute_streaks(&self, habit_id: i64) -> Result<StreakSummary> {
        self.write()?.recompute_streaks(habit_id)
    }

    pub fn list_habits_with_stats(&self, target: Option<NaiveDate>) -> Result<Vec<HabitWithStats>> {
        Ok(self.read()?.list_with_stats(target))
    }

    /// Take the store back out if this is the last handle.
    pub fn into_inner(self) -> Option<HabitStore> {
        Arc::try_unwrap(self.0)
            .ok()
            .and_then(|lock| lock.into_inner().ok())
    }
}
