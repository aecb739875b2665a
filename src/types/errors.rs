use std::fmt;

use super::group::GroupId;
use super::tab::{TabId, WindowId};

// === StoreError ===

/// Errors surfaced by the session key-value store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The tab's values are gone because the tab was closed.
    TabClosed(TabId),
    /// The window's values are gone because the window was closed.
    WindowClosed(WindowId),
    /// The storage backend failed.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::TabClosed(id) => write!(f, "Tab closed: {}", id),
            StoreError::WindowClosed(id) => write!(f, "Window closed: {}", id),
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === HostError ===

/// Errors surfaced by the browser host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// Tab with the given id was not found.
    TabNotFound(TabId),
    /// Window with the given id was not found.
    WindowNotFound(WindowId),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::TabNotFound(id) => write!(f, "Tab not found: {}", id),
            HostError::WindowNotFound(id) => write!(f, "Window not found: {}", id),
        }
    }
}

impl std::error::Error for HostError {}

// === GroupError ===

/// Errors related to group management operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupError {
    /// A retry-until-defined read exhausted its attempts without ever
    /// observing a value.
    RetryTimeout { key: String, attempts: u32 },
    /// The window has no group list at all.
    NoGroups(WindowId),
    /// The window's group list does not contain the given group.
    GroupNotFound(GroupId),
    /// A window must keep at least one group.
    LastGroup(WindowId),
    /// A stored value did not have the expected shape.
    BadValue { key: String, value: String },
    /// A store operation failed.
    Store(StoreError),
    /// A host operation failed.
    Host(HostError),
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::RetryTimeout { key, attempts } => {
                write!(f, "Value '{}' still undefined after {} attempts", key, attempts)
            }
            GroupError::NoGroups(id) => write!(f, "Window {} has no groups", id),
            GroupError::GroupNotFound(id) => write!(f, "Group not found: {}", id),
            GroupError::LastGroup(id) => {
                write!(f, "Cannot remove the last group of window {}", id)
            }
            GroupError::BadValue { key, value } => {
                write!(f, "Malformed value for '{}': {}", key, value)
            }
            GroupError::Store(e) => write!(f, "Store error: {}", e),
            GroupError::Host(e) => write!(f, "Host error: {}", e),
        }
    }
}

impl std::error::Error for GroupError {}

impl From<StoreError> for GroupError {
    fn from(e: StoreError) -> Self {
        GroupError::Store(e)
    }
}

impl From<HostError> for GroupError {
    fn from(e: HostError) -> Self {
        GroupError::Host(e)
    }
}

// === OptionsError ===

/// Errors related to loading and saving extension options.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// An I/O error occurred while reading or writing the options file.
    IoError(String),
    /// Failed to serialize or deserialize options.
    SerializationError(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::IoError(msg) => write!(f, "Options I/O error: {}", msg),
            OptionsError::SerializationError(msg) => {
                write!(f, "Options serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for OptionsError {}
