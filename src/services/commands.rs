//! Keyboard-command collaborator.
//!
//! A single dispatcher maps wire command names to group-rotation
//! offsets. Whether a command is enabled is read from the current
//! options on every event, so reconfiguration never has to detach and
//! reattach listeners.

use crate::types::options::{Options, ViewMode};

/// Keyboard commands understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ActivateNextGroup,
    ActivatePreviousGroup,
}

impl Command {
    /// Parses a command wire name.
    pub fn parse(name: &str) -> Option<Command> {
        match name {
            "activate-next-group" => Some(Command::ActivateNextGroup),
            "activate-previous-group" => Some(Command::ActivatePreviousGroup),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Command::ActivateNextGroup => "activate-next-group",
            Command::ActivatePreviousGroup => "activate-previous-group",
        }
    }

    /// Group-rotation offset the command applies.
    pub fn offset(self) -> i64 {
        match self {
            Command::ActivateNextGroup => 1,
            Command::ActivatePreviousGroup => -1,
        }
    }
}

/// Dispatcher holding the active options.
pub struct CommandDispatcher {
    options: Options,
}

impl CommandDispatcher {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Swaps in freshly loaded options.
    pub fn update_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Resolves a wire command name to its rotation offset, or `None`
    /// when the name is unknown or the command is disabled.
    pub fn offset_for(&self, name: &str) -> Option<i64> {
        let command = Command::parse(name)?;
        if !self.options.command_enabled(command.wire_name()) {
            return None;
        }
        Some(command.offset())
    }

    /// Whether an icon click should open the popup rather than the
    /// full-page management view.
    pub fn popup_enabled(&self) -> bool {
        self.options.view == ViewMode::Popup
    }
}
