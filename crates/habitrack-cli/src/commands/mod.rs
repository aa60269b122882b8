pub mod completion;
pub mod config;
pub mod habit;
pub mod seed;
pub mod stats;

use chrono::NaiveDate;
use habitrack_core::store::sample::seed_sample_data;
use habitrack_core::validation::parse_date;
use habitrack_core::{Config, Database, FixedClock, HabitStore, Result, SystemClock};
use serde::Serialize;
use tracing::debug;

/// Database and loaded store for one command invocation.
pub struct Session {
    pub db: Database,
    pub store: HabitStore,
}

impl Session {
    /// Open the database and load the store. `today` pins the clock.
    pub fn open(today: Option<NaiveDate>) -> Result<Self> {
        let config = Config::load()?;
        let db = Database::open()?;
        let store = match today {
            Some(date) => db.load_store(FixedClock(date))?,
            None => db.load_store(SystemClock)?,
        };
        let mut store = store.with_defaults(config.habit_defaults());
        debug!(habits = store.list_habits().len(), today = %store.today(), "store loaded");

        // Only a database that never had a habit gets the demo data.
        if config.storage.seed_sample_data && store.next_habit_id() == 1 {
            let today = store.today();
            seed_sample_data(&mut store, today)?;
            db.save_store(&store)?;
        }

        Ok(Self { db, store })
    }

    pub fn save(&self) -> Result<()> {
        self.db.save_store(&self.store)
    }
}

pub fn parse_today(value: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(value.map(parse_date).transpose()?)
}

pub fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    parse_today(value.as_deref())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
