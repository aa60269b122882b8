mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, HabitsConfig, LoggingConfig, PaletteConfig, StorageConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the directory holding `habitrack.db` and `config.toml`.
///
/// `HABITRACK_DATA_DIR` wins when set. Otherwise `~/.config/habitrack`, or
/// `~/.config/habitrack-dev` with `HABITRACK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITRACK_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITRACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitrack-dev")
            } else {
                base_dir.join("habitrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
