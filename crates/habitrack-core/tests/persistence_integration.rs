//! Integration tests for SQLite persistence of the habit store.

use chrono::{Duration, NaiveDate};
use habitrack_core::stats::{month_calendar, DayStatus};
use habitrack_core::store::sample::seed_sample_data;
use habitrack_core::{Database, FixedClock, HabitStore, NewHabit};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

#[test]
fn test_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitrack.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut store = db.load_store(FixedClock(today())).unwrap();
        let habit = store.create(NewHabit::new("Journal")).unwrap();
        store.toggle_completion(habit.id, today()).unwrap();
        store
            .toggle_completion(habit.id, today() - Duration::days(1))
            .unwrap();
        db.save_store(&store).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let store = db.load_store(FixedClock(today())).unwrap();
    let habits = store.list_habits();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Journal");
    assert_eq!(habits[0].current_streak, 2);
    assert_eq!(store.list_completions(Some(habits[0].id), None).len(), 2);
}

#[test]
fn test_toggle_after_reload_flips_existing_record() {
    let db = Database::open_memory().unwrap();
    let mut store = HabitStore::with_clock(FixedClock(today()));
    let habit = store.create(NewHabit::new("Walk")).unwrap();
    let first = store.toggle_completion(habit.id, today()).unwrap();
    db.save_store(&store).unwrap();

    let mut reloaded = db.load_store(FixedClock(today())).unwrap();
    let second = reloaded.toggle_completion(habit.id, today()).unwrap();
    assert_eq!(first.id, second.id);
    assert!(!second.completed);
    assert_eq!(reloaded.list_completions(None, None).len(), 1);
}

#[test]
fn test_seeded_store_calendar() {
    let db = Database::open_memory().unwrap();
    let mut store = db.load_store(FixedClock(today())).unwrap();
    seed_sample_data(&mut store, today()).unwrap();
    db.save_store(&store).unwrap();

    let store = db.load_store(FixedClock(today())).unwrap();
    let habit_count = store.list_habits().len();
    assert_eq!(habit_count, 4);

    let days = month_calendar(2025, 3, habit_count, &store.list_completions(None, None)).unwrap();
    let status_of = |d: u32| days[(d - 1) as usize].status;
    // -7..=-3 all four habits, -2/-1 only two.
    assert_eq!(status_of(13), DayStatus::Complete);
    assert_eq!(status_of(17), DayStatus::Complete);
    assert_eq!(status_of(18), DayStatus::Partial);
    assert_eq!(status_of(20), DayStatus::None);
}
