//! SQLite persistence for habits and completions.
//!
//! The in-memory [`HabitStore`] is the working copy. [`Database::load_store`]
//! rebuilds it from disk and [`Database::save_store`] writes it back in a
//! single transaction, so a command either persists all of its effects or
//! none of them.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{data_dir, migrations};
use crate::clock::Clock;
use crate::error::{DatabaseError, Result};
use crate::habit::{Completion, Habit};
use crate::store::{CompletionLog, HabitStore};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NEXT_HABIT_ID_KEY: &str = "next_habit_id";
const NEXT_COMPLETION_ID_KEY: &str = "next_completion_id";

fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_habit(row: &rusqlite::Row) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
        current_streak: row.get(5)?,
        longest_streak: row.get(6)?,
        created_at: date_column(row, 7)?,
    })
}

fn row_to_completion(row: &rusqlite::Row) -> rusqlite::Result<Completion> {
    Ok(Completion {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date: date_column(row, 2)?,
        completed: row.get(3)?,
    })
}

/// SQLite database holding the persisted habit store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/habitrack.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("habitrack.db"))
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, icon, color, current_streak, longest_streak, created_at
             FROM habits ORDER BY id",
        )?;
        let habits = stmt
            .query_map([], row_to_habit)?
            .collect::<rusqlite::Result<Vec<Habit>>>()?;
        Ok(habits)
    }

    /// Completions in id order, which is the order they were first logged.
    pub fn list_completions(&self) -> Result<Vec<Completion>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, habit_id, date, completed FROM completions ORDER BY id")?;
        let completions = stmt
            .query_map([], row_to_completion)?
            .collect::<rusqlite::Result<Vec<Completion>>>()?;
        Ok(completions)
    }

    /// Rebuild the in-memory store, measuring "today" with `clock`.
    pub fn load_store(&self, clock: impl Clock + 'static) -> Result<HabitStore> {
        let habits = self.list_habits()?;
        let completions = self.list_completions()?;
        let next_habit_id = self.kv_get_i64(NEXT_HABIT_ID_KEY)?.unwrap_or(1);
        let next_completion_id = self.kv_get_i64(NEXT_COMPLETION_ID_KEY)?.unwrap_or(1);
        debug!(
            habits = habits.len(),
            completions = completions.len(),
            "habit store loaded"
        );

        let log = CompletionLog::from_records(completions, next_completion_id);
        Ok(HabitStore::restore(clock, habits, log, next_habit_id))
    }

    /// Replace the persisted habits and completions with `store`.
    pub fn save_store(&self, store: &HabitStore) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM completions", [])?;
        tx.execute("DELETE FROM habits", [])?;

        {
            let mut insert_habit = tx.prepare(
                "INSERT INTO habits (id, name, description, icon, color,
                     current_streak, longest_streak, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for habit in store.list_habits() {
                insert_habit.execute(params![
                    habit.id,
                    habit.name,
                    habit.description,
                    habit.icon,
                    habit.color,
                    habit.current_streak,
                    habit.longest_streak,
                    habit.created_at.format(DATE_FORMAT).to_string(),
                ])?;
            }

            let mut insert_completion = tx.prepare(
                "INSERT INTO completions (id, habit_id, date, completed) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for c in store.completion_log().iter() {
                insert_completion.execute(params![
                    c.id,
                    c.habit_id,
                    c.date.format(DATE_FORMAT).to_string(),
                    c.completed,
                ])?;
            }
        }

        // Same connection, so these writes commit with the transaction.
        self.kv_set(NEXT_HABIT_ID_KEY, &store.next_habit_id().to_string())?;
        self.kv_set(
            NEXT_COMPLETION_ID_KEY,
            &store.completion_log().next_id().to_string(),
        )?;

        tx.commit()?;
        debug!(
            habits = store.list_habits().len(),
            completions = store.completion_log().len(),
            "habit store saved"
        );
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn kv_get_i64(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.kv_get(key)?.and_then(|v| v.parse().ok()))
    }
}
