use serde::{Deserialize, Serialize};

/// Host-assigned tab identifier.
pub type TabId = u64;

/// Host-assigned window identifier.
pub type WindowId = u64;

/// Snapshot of a tab's host-level state, as returned by tab queries.
///
/// Group membership is deliberately absent: it lives in the session
/// store, keyed by tab id, not in the host's tab record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    /// Position in the tab strip.
    pub index: usize,
    pub pinned: bool,
    pub hidden: bool,
    /// Whether this is the window's focused tab.
    pub active: bool,
    /// Whether the tab is part of a multi-select highlight. The active
    /// tab is always highlighted.
    pub highlighted: bool,
    /// Monotone access stamp; larger means more recently focused.
    pub last_accessed: i64,
}
