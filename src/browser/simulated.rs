//! In-memory browser host.
//!
//! Models just enough of a real tab strip for the engine: per-window
//! ordered tabs, one focused tab per window, hidden/pinned/highlighted
//! flags, a monotone access clock, and the per-window icon affordance.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::errors::HostError;
use crate::types::tab::{TabId, TabInfo, WindowId};

use super::BrowserHost;

#[derive(Debug, Clone)]
struct SimTab {
    window_id: WindowId,
    pinned: bool,
    hidden: bool,
    highlighted: bool,
    last_accessed: i64,
}

#[derive(Debug, Default)]
struct SimWindow {
    order: Vec<TabId>,
    active: Option<TabId>,
    action_title: String,
    badge_text: String,
}

#[derive(Debug, Default)]
struct SimState {
    windows: HashMap<WindowId, SimWindow>,
    tabs: HashMap<TabId, SimTab>,
    next_window: WindowId,
    next_tab: TabId,
    clock: i64,
}

/// In-memory `BrowserHost` implementation.
pub struct SimulatedBrowser {
    state: Mutex<SimState>,
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a new, empty window and returns its id.
    pub fn create_window(&self) -> WindowId {
        let mut state = self.lock();
        let id = state.next_window;
        state.next_window += 1;
        state.windows.insert(id, SimWindow::default());
        id
    }

    /// Opens a tab at the end of the window's strip.
    /// The first tab of a window always becomes the focused tab.
    pub fn create_tab(&self, window: WindowId, active: bool) -> Result<TabId, HostError> {
        let mut state = self.lock();
        if !state.windows.contains_key(&window) {
            return Err(HostError::WindowNotFound(window));
        }
        let id = state.next_tab;
        state.next_tab += 1;
        state.clock += 1;
        let stamp = state.clock;
        state.tabs.insert(
            id,
            SimTab {
                window_id: window,
                pinned: false,
                hidden: false,
                highlighted: false,
                last_accessed: stamp,
            },
        );
        let win = state
            .windows
            .get_mut(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        win.order.push(id);
        if active || win.active.is_none() {
            win.active = Some(id);
        }
        drop(state);
        if active {
            self.focus(id);
        }
        Ok(id)
    }

    /// Closes a tab. If it was the focused tab, focus moves to the
    /// nearest remaining neighbor in strip order.
    pub fn close_tab(&self, tab: TabId) -> Result<(), HostError> {
        let mut state = self.lock();
        let info = state.tabs.remove(&tab).ok_or(HostError::TabNotFound(tab))?;
        let win = state
            .windows
            .get_mut(&info.window_id)
            .ok_or(HostError::WindowNotFound(info.window_id))?;
        let order_idx = win.order.iter().position(|id| *id == tab);
        win.order.retain(|id| *id != tab);
        if win.active == Some(tab) {
            win.active = match order_idx {
                Some(idx) if !win.order.is_empty() => {
                    Some(win.order[idx.min(win.order.len() - 1)])
                }
                _ => None,
            };
        }
        Ok(())
    }

    pub fn pin_tab(&self, tab: TabId) -> Result<(), HostError> {
        let mut state = self.lock();
        let t = state.tabs.get_mut(&tab).ok_or(HostError::TabNotFound(tab))?;
        t.pinned = true;
        // Pinned tabs are never hidden.
        t.hidden = false;
        Ok(())
    }

    /// Adds or removes a tab from the multi-select highlight.
    pub fn set_highlighted(&self, tab: TabId, highlighted: bool) -> Result<(), HostError> {
        let mut state = self.lock();
        let t = state.tabs.get_mut(&tab).ok_or(HostError::TabNotFound(tab))?;
        t.highlighted = highlighted;
        Ok(())
    }

    /// Ids of the window's currently visible tabs, in strip order.
    pub fn visible_tabs(&self, window: WindowId) -> Result<Vec<TabId>, HostError> {
        let state = self.lock();
        let win = state
            .windows
            .get(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        Ok(win
            .order
            .iter()
            .filter(|id| state.tabs.get(id).map_or(false, |t| !t.hidden))
            .copied()
            .collect())
    }

    /// Current icon affordance of a window: (tooltip, badge text).
    pub fn action_badge(&self, window: WindowId) -> Result<(String, String), HostError> {
        let state = self.lock();
        let win = state
            .windows
            .get(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        Ok((win.action_title.clone(), win.badge_text.clone()))
    }

    /// Focuses a tab: sets it active, highlights it exclusively, and
    /// bumps its access stamp.
    fn focus(&self, tab: TabId) {
        let mut state = self.lock();
        state.clock += 1;
        let stamp = state.clock;
        let Some(window_id) = state.tabs.get(&tab).map(|t| t.window_id) else {
            return;
        };
        let siblings = match state.windows.get(&window_id) {
            Some(win) => win.order.clone(),
            None => return,
        };
        for id in siblings {
            if let Some(t) = state.tabs.get_mut(&id) {
                t.highlighted = id == tab;
            }
        }
        if let Some(t) = state.tabs.get_mut(&tab) {
            t.last_accessed = stamp;
        }
        if let Some(win) = state.windows.get_mut(&window_id) {
            win.active = Some(tab);
        }
    }

    fn tab_info(state: &SimState, id: TabId) -> Option<TabInfo> {
        let tab = state.tabs.get(&id)?;
        let win = state.windows.get(&tab.window_id)?;
        let index = win.order.iter().position(|t| *t == id)?;
        Some(TabInfo {
            id,
            window_id: tab.window_id,
            index,
            pinned: tab.pinned,
            hidden: tab.hidden,
            active: win.active == Some(id),
            highlighted: tab.highlighted || win.active == Some(id),
            last_accessed: tab.last_accessed,
        })
    }
}

impl Default for SimulatedBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserHost for SimulatedBrowser {
    async fn all_windows(&self) -> Result<Vec<WindowId>, HostError> {
        let state = self.lock();
        let mut ids: Vec<WindowId> = state.windows.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn get_tab(&self, tab: TabId) -> Result<TabInfo, HostError> {
        let state = self.lock();
        Self::tab_info(&state, tab).ok_or(HostError::TabNotFound(tab))
    }

    async fn query_tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, HostError> {
        let state = self.lock();
        let win = state
            .windows
            .get(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        Ok(win
            .order
            .iter()
            .filter_map(|id| Self::tab_info(&state, *id))
            .collect())
    }

    async fn hide_tabs(&self, tabs: &[TabId]) -> Result<(), HostError> {
        let mut state = self.lock();
        for id in tabs {
            if let Some(t) = state.tabs.get_mut(id) {
                if !t.pinned {
                    t.hidden = true;
                }
            }
        }
        Ok(())
    }

    async fn show_tabs(&self, tabs: &[TabId]) -> Result<(), HostError> {
        let mut state = self.lock();
        for id in tabs {
            if let Some(t) = state.tabs.get_mut(id) {
                t.hidden = false;
            }
        }
        Ok(())
    }

    async fn activate_tab(&self, tab: TabId) -> Result<(), HostError> {
        {
            let state = self.lock();
            if !state.tabs.contains_key(&tab) {
                return Err(HostError::TabNotFound(tab));
            }
        }
        self.focus(tab);
        Ok(())
    }

    async fn move_tab_to_end(&self, tab: TabId) -> Result<(), HostError> {
        let mut state = self.lock();
        let window_id = state
            .tabs
            .get(&tab)
            .map(|t| t.window_id)
            .ok_or(HostError::TabNotFound(tab))?;
        let win = state
            .windows
            .get_mut(&window_id)
            .ok_or(HostError::WindowNotFound(window_id))?;
        win.order.retain(|id| *id != tab);
        win.order.push(tab);
        Ok(())
    }

    async fn set_action_title(&self, window: WindowId, title: &str) -> Result<(), HostError> {
        let mut state = self.lock();
        let win = state
            .windows
            .get_mut(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        win.action_title = title.to_string();
        Ok(())
    }

    async fn set_badge_text(&self, window: WindowId, text: &str) -> Result<(), HostError> {
        let mut state = self.lock();
        let win = state
            .windows
            .get_mut(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        win.badge_text = text.to_string();
        Ok(())
    }
}
