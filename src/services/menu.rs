//! Menu collaborator.
//!
//! Builds the "send tab to group" context-menu model from a window's
//! group list and decides which tabs a menu click applies to. Actual
//! menu rendering belongs to the host UI and stays out of the engine.

use crate::types::group::{Group, GroupId};
use crate::types::tab::{TabId, TabInfo, WindowId};

/// One context-menu entry targeting a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Stable menu item id: `sendto-{window}-{group}`.
    pub id: String,
    pub title: String,
    pub window_id: WindowId,
    pub group_id: GroupId,
}

/// Builds the send-tab submenu entries for a window, in group display
/// order.
pub fn build_send_menu(window: WindowId, groups: &[Group]) -> Vec<MenuEntry> {
    groups
        .iter()
        .map(|g| MenuEntry {
            id: format!("sendto-{}-{}", window, g.id),
            title: format!("{}: {}", g.id, g.name),
            window_id: window,
            group_id: g.id,
        })
        .collect()
}

/// Parses a `sendto-{window}-{group}` menu item id back into its parts.
/// Menus of other windows produce ids too, so the caller compares the
/// window id before acting.
pub fn parse_entry_id(id: &str) -> Option<(WindowId, GroupId)> {
    let rest = id.strip_prefix("sendto-")?;
    let (window, group) = rest.split_once('-')?;
    Some((window.parse().ok()?, group.parse().ok()?))
}

/// Which tabs a context-menu click moves.
///
/// With a multi-select highlight, every highlighted tab except the
/// focused one (the focused tab is always highlighted, so it has to be
/// filtered out). A plain right click does not highlight the tab, so
/// the clicked tab alone is moved in that case.
pub fn tabs_to_send(tabs: &[TabInfo], clicked: TabId) -> Vec<TabId> {
    let active = tabs.iter().find(|t| t.active).map(|t| t.id);
    let highlighted: Vec<TabId> = tabs.iter().filter(|t| t.highlighted).map(|t| t.id).collect();
    if highlighted.len() > 1 {
        highlighted
            .into_iter()
            .filter(|id| Some(*id) != active)
            .collect()
    } else {
        vec![clicked]
    }
}
