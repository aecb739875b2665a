use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the extension icon click lands: a popup, or the full-page
/// management view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Popup,
    Tab,
}

/// Per-command shortcut configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortcutSetting {
    #[serde(default)]
    pub disabled: bool,
}

/// Bounded retry with exponential backoff for reads against the
/// eventually consistent session store. Absence within the budget is
/// retried; exhaustion is a terminal `RetryTimeout`, never a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub multiplier: u32,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Next backoff delay after `current`, capped at `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        current
            .saturating_mul(self.multiplier.max(1))
            .min(self.max_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            initial_delay_ms: 5,
            multiplier: 2,
            max_delay_ms: 200,
        }
    }
}

/// User-facing extension options, persisted as JSON at the platform
/// config path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub view: ViewMode,
    /// Keyed by command wire name, e.g. `activate-next-group`.
    pub shortcuts: HashMap<String, ShortcutSetting>,
    pub retry: RetryPolicy,
}

impl Options {
    /// Whether the command with the given wire name is enabled.
    /// Commands without an explicit setting are enabled.
    pub fn command_enabled(&self, name: &str) -> bool {
        self.shortcuts.get(name).map_or(true, |s| !s.disabled)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            view: ViewMode::Tab,
            shortcuts: HashMap::new(),
            retry: RetryPolicy::default(),
        }
    }
}
