// Platform paths for macOS
// Config: ~/Library/Application Support/PanoramaGroups
// Data:   ~/Library/Application Support/PanoramaGroups

use std::env;
use std::path::PathBuf;

/// Returns the home directory on macOS.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory on macOS.
/// `~/Library/Application Support/PanoramaGroups`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("PanoramaGroups")
}

/// Returns the data directory on macOS.
/// `~/Library/Application Support/PanoramaGroups`
pub fn get_data_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("PanoramaGroups")
}
