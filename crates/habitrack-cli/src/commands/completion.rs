use chrono::NaiveDate;
use clap::Subcommand;
use habitrack_core::validation::parse_habit_id;
use habitrack_core::Result;

use super::{parse_optional_date, print_json, Session};

#[derive(Subcommand)]
pub enum CompletionAction {
    /// List completion records, optionally filtered
    List {
        #[arg(long)]
        habit_id: Option<String>,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: CompletionAction, today: Option<NaiveDate>) -> Result<()> {
    let session = Session::open(today)?;

    match action {
        CompletionAction::List { habit_id, date } => {
            let habit_id = habit_id.as_deref().map(parse_habit_id).transpose()?;
            let date = parse_optional_date(date)?;
            print_json(&session.store.list_completions(habit_id, date))?;
        }
    }
    Ok(())
}
