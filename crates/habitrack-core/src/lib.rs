//! # habitrack Core Library
//!
//! This library provides the core logic for the habitrack habit tracker.
//! Users define habits, mark daily completions, and read back streaks and
//! completion rates. Everything is available through the `habitrack-cli`
//! binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Completion log**: one record per `(habit, date)`, toggled in place
//! - **Streak calculator**: pure functions for current/longest streak and
//!   completion rate
//! - **Habit store**: owns habits and the log, recomputes cached streaks
//!   synchronously after every toggle
//! - **Storage**: SQLite persistence of the store and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: the single-owner store
//! - [`SharedStore`]: lock-guarded handle for concurrent callers
//! - [`Database`]: load/save of the store
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod habit;
pub mod palette;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use habit::{Completion, Habit, HabitPatch, HabitWithStats, NewHabit};
pub use stats::{CalendarDay, DayStatus, Overview, StreakPosition};
pub use storage::{Config, Database};
pub use store::{CompletionLog, HabitDefaults, HabitStore, SharedStore};
pub use streak::{completion_rate, current_streak, longest_streak, StreakSummary};
