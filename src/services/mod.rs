// External collaborators of the group engine.
// The engine proper lives in managers; these modules cover options,
// the context-menu model, and keyboard-command dispatch.

pub mod commands;
pub mod menu;
pub mod options;
