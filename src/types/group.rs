use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Group identifier. Unique within a window, assigned from a monotonic
/// counter and never reused after deletion.
pub type GroupId = i64;

/// Reserved group id for the single management-view tab. A tab carrying
/// this id is excluded from group membership and never hidden or shown
/// by the visibility partition.
pub const SENTINEL_GROUP: GroupId = -1;

/// Container id used for groups that have no isolated browsing context.
pub const DEFAULT_CONTAINER: &str = "firefox-default";

/// Display name given to the group bootstrapped into a fresh window.
pub const DEFAULT_GROUP_NAME: &str = "Unnamed group";

/// A named partition of a window's tabs.
///
/// `rect` and `last_moved` are only consumed by the visual arrangement
/// view, but they are persisted with the group and backfilled by the
/// legacy-schema migration; records written before that migration carry
/// neither field, hence the `Option`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub container_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_moved: Option<i64>,
}

impl Group {
    /// Creates a group with the default container and an initial layout rect.
    pub fn new(id: GroupId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            container_id: DEFAULT_CONTAINER.to_string(),
            rect: Some(Rect::initial()),
            last_moved: Some(now_ms()),
        }
    }
}

/// Normalized layout rectangle in [0,1]×[0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Rect given to a freshly created group.
    pub fn initial() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 0.5,
            h: 0.5,
        }
    }
}

/// Why a tab is being created.
///
/// Passed explicitly into the creation handler so reentrant creation
/// paths (opening the management view, restoring a backup) do not need
/// process-wide flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationReason {
    /// An ordinary tab: inherits the window's active group.
    Normal,
    /// The management-view tab: gets the sentinel group id.
    OpeningManagementView,
    /// A tab recreated by a backup restore, which carries its own group
    /// data; the creation handler leaves it alone.
    RestoringBackup,
}

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
