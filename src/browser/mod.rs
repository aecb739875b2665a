//! Browser host seam.
//!
//! The engine never touches tabs directly: creation, hiding, showing,
//! focusing, strip reordering and the icon affordance all go through
//! this trait. The production implementation is the extension runtime;
//! `SimulatedBrowser` is a complete in-memory stand-in for the demo
//! binary and tests.

use crate::types::errors::HostError;
use crate::types::tab::{TabId, TabInfo, WindowId};

pub mod simulated;

pub use simulated::SimulatedBrowser;

/// Host-level tab and window operations consumed by the group engine.
#[allow(async_fn_in_trait)]
pub trait BrowserHost: Send + Sync {
    async fn all_windows(&self) -> Result<Vec<WindowId>, HostError>;

    async fn get_tab(&self, tab: TabId) -> Result<TabInfo, HostError>;

    /// All tabs of a window in strip order.
    async fn query_tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, HostError>;

    /// Hides the given tabs. Ids of tabs that no longer exist and
    /// pinned tabs are skipped, matching host behavior.
    async fn hide_tabs(&self, tabs: &[TabId]) -> Result<(), HostError>;

    /// Shows the given tabs. Ids of tabs that no longer exist are skipped.
    async fn show_tabs(&self, tabs: &[TabId]) -> Result<(), HostError>;

    /// Makes the tab its window's focused tab.
    async fn activate_tab(&self, tab: TabId) -> Result<(), HostError>;

    /// Moves the tab to the end of its window's strip.
    async fn move_tab_to_end(&self, tab: TabId) -> Result<(), HostError>;

    /// Sets the extension icon tooltip for a window.
    async fn set_action_title(&self, window: WindowId, title: &str) -> Result<(), HostError>;

    /// Sets the extension icon badge text for a window.
    async fn set_badge_text(&self, window: WindowId, text: &str) -> Result<(), HostError>;
}
