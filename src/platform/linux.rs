// Platform paths for Linux
// Config: ~/.config/panorama-groups
// Data:   ~/.local/share/panorama-groups

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory on Linux.
/// Uses `$XDG_CONFIG_HOME/panorama-groups` if set, otherwise `~/.config/panorama-groups`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("panorama-groups")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("panorama-groups")
    }
}

/// Returns the data directory on Linux.
/// Uses `$XDG_DATA_HOME/panorama-groups` if set, otherwise `~/.local/share/panorama-groups`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("panorama-groups")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("panorama-groups")
    }
}
