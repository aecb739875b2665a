// Platform paths for Windows
// Config: %APPDATA%/PanoramaGroups
// Data:   %APPDATA%/PanoramaGroups

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory on Windows.
/// `%APPDATA%/PanoramaGroups`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("PanoramaGroups")
}

/// Returns the data directory on Windows.
/// `%APPDATA%/PanoramaGroups`
pub fn get_data_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("PanoramaGroups")
}
