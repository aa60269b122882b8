use chrono::NaiveDate;
use habitrack_core::store::sample::seed_sample_data;
use habitrack_core::{CoreError, Result};

use super::{print_json, Session};

pub fn run(today: Option<NaiveDate>) -> Result<()> {
    let mut session = Session::open(today)?;
    if !session.store.is_empty() {
        return Err(CoreError::Custom(
            "database already has habits; seed only fills an empty store".into(),
        ));
    }

    let today = session.store.today();
    seed_sample_data(&mut session.store, today)?;
    session.save()?;
    print_json(&session.store.list_with_stats(None))
}
