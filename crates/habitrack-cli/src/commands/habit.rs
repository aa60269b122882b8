//! Habit management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use habitrack_core::validation::parse_habit_id;
use habitrack_core::{CoreError, HabitPatch, NewHabit, Result};

use super::{parse_optional_date, print_json, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List all habits
    List,
    /// Show one habit
    Get {
        /// Habit id
        id: String,
    },
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Icon token, e.g. "fas fa-book"
        #[arg(long)]
        icon: Option<String>,
        /// Color token, e.g. "green"
        #[arg(long)]
        color: Option<String>,
    },
    /// Update name, description, icon or color
    Update {
        /// Habit id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a habit and all of its completions
    Delete {
        /// Habit id
        id: String,
    },
    /// Toggle completion of a habit for a date
    Toggle {
        /// Habit id
        id: String,
        /// Date as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<String>,
    },
    /// Recompute cached streaks of every habit against today
    Recompute,
}

pub fn run(action: HabitAction, today: Option<NaiveDate>) -> Result<()> {
    let mut session = Session::open(today)?;

    match action {
        HabitAction::List => {
            print_json(&session.store.list_habits())?;
        }
        HabitAction::Get { id } => {
            let habit = session.store.get_habit(parse_habit_id(&id)?)?;
            print_json(&habit)?;
        }
        HabitAction::Create {
            name,
            description,
            icon,
            color,
        } => {
            let habit = session.store.create(NewHabit {
                name,
                description,
                icon,
                color,
            })?;
            session.save()?;
            print_json(&habit)?;
        }
        HabitAction::Update {
            id,
            name,
            description,
            clear_description,
            icon,
            color,
        } => {
            let id = parse_habit_id(&id)?;
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let habit = session.store.update(
                id,
                HabitPatch {
                    name,
                    description,
                    icon,
                    color,
                },
            )?;
            session.save()?;
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            let id = parse_habit_id(&id)?;
            if !session.store.delete(id) {
                return Err(CoreError::NotFound { id });
            }
            session.save()?;
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        HabitAction::Toggle { id, date } => {
            let id = parse_habit_id(&id)?;
            let date = parse_optional_date(date)?.unwrap_or_else(|| session.store.today());
            let completion = session.store.toggle_completion(id, date)?;
            session.save()?;
            print_json(&completion)?;
        }
        HabitAction::Recompute => {
            session.store.recompute_all()?;
            session.save()?;
            print_json(&session.store.list_habits())?;
        }
    }
    Ok(())
}
