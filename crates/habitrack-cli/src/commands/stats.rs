use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use habitrack_core::stats::month_calendar;
use habitrack_core::validation::parse_month;
use habitrack_core::{Overview, Result};

use super::{parse_optional_date, print_json, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Habits with completion rate and completed-today flag
    List {
        /// Target date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Totals across all habits
    Overview {
        /// Target date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Day-by-day completion status for a month
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}

pub fn run(action: StatsAction, today: Option<NaiveDate>) -> Result<()> {
    let session = Session::open(today)?;

    match action {
        StatsAction::List { date } => {
            let date = parse_optional_date(date)?;
            print_json(&session.store.list_with_stats(date))?;
        }
        StatsAction::Overview { date } => {
            let date = parse_optional_date(date)?;
            let habits = session.store.list_with_stats(date);
            print_json(&Overview::from_habits(&habits))?;
        }
        StatsAction::Calendar { month } => {
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => {
                    let today = session.store.today();
                    (today.year(), today.month())
                }
            };
            let days = month_calendar(
                year,
                month,
                session.store.list_habits().len(),
                &session.store.list_completions(None, None),
            )?;
            print_json(&days)?;
        }
    }
    Ok(())
}
