//! Demo habits with a few weeks of history.

use chrono::{Duration, NaiveDate};
use tracing::info;

use super::HabitStore;
use crate::error::Result;
use crate::habit::NewHabit;

const SAMPLE_HABITS: [(&str, &str, &str, &str); 4] = [
    ("Drink 8 glasses of water", "Stay hydrated throughout the day", "fas fa-tint", "blue"),
    ("Read for 20 minutes", "Any book or educational content", "fas fa-book", "green"),
    ("30 minutes of exercise", "Any form of physical activity", "fas fa-dumbbell", "orange"),
    ("Meditate for 10 minutes", "Mindfulness or breathing exercises", "fas fa-om", "purple"),
];

/// Days on which every sample habit was done.
const FULL_DAYS: [i64; 5] = [-7, -6, -5, -4, -3];
/// Days on which only the first two sample habits were done.
const PARTIAL_DAYS: [i64; 8] = [-14, -13, -12, -20, -18, -16, -2, -1];

/// Add the sample habits and their history relative to `today`, then
/// recompute streaks. Returns the ids of the created habits.
pub fn seed_sample_data(store: &mut HabitStore, today: NaiveDate) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(SAMPLE_HABITS.len());
    for (name, description, icon, color) in SAMPLE_HABITS {
        let habit = store.create(
            NewHabit::new(name)
                .with_description(description)
                .with_icon(icon)
                .with_color(color),
        )?;
        ids.push(habit.id);
    }

    for offset in FULL_DAYS {
        for &id in &ids {
            store.completions.toggle(id, today + Duration::days(offset));
        }
    }
    for offset in PARTIAL_DAYS {
        for &id in &ids[..2] {
            store.completions.toggle(id, today + Duration::days(offset));
        }
    }

    for &id in &ids {
        store.recompute_streaks(id)?;
    }
    info!(habits = ids.len(), "sample data seeded");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn seeds_four_habits_with_history() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut store = HabitStore::with_clock(FixedClock(today));
        let ids = seed_sample_data(&mut store, today).unwrap();

        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.list_completions(Some(1), None).len(), 13);
        assert_eq!(store.list_completions(Some(4), None).len(), 5);

        // Habits 1 and 2 run -7..=-1 without a gap; today is not done.
        let water = store.get_habit(1).unwrap();
        assert_eq!(water.current_streak, 0);
        assert_eq!(water.longest_streak, 7);
        assert_eq!(store.get_habit(4).unwrap().longest_streak, 5);
    }
}
