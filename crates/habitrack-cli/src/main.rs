use clap::{Parser, Subcommand};
use habitrack_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitrack-cli", version, about = "habitrack CLI")]
struct Cli {
    /// Treat this UTC date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Completion records
    Completion {
        #[command(subcommand)]
        action: commands::completion::CompletionAction,
    },
    /// Streaks and completion rates
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// List the icon/color palette
    Palette,
    /// Load the sample habits into an empty database
    Seed,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::load_or_default().logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = commands::parse_today(cli.today.as_deref()).and_then(|today| match cli.command {
        Commands::Habit { action } => commands::habit::run(action, today),
        Commands::Completion { action } => commands::completion::run(action, today),
        Commands::Stats { action } => commands::stats::run(action, today),
        Commands::Config { action } => commands::config::run(action),
        Commands::Palette => commands::print_json(&habitrack_core::palette::DEFAULT_PALETTE),
        Commands::Seed => commands::seed::run(today),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}
