mod config;
mod progress;

pub use config::Config;
pub use progress::{ProgressStore, SavedProgress};

use std::path::PathBuf;

/// Returns `~/.config/moodharbor[-dev]/` based on MOODHARBOR_ENV.
///
/// Set MOODHARBOR_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOODHARBOR_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("moodharbor-dev")
    } else {
        base_dir.join("moodharbor")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
