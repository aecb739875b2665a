//! In-memory session store with configurable write propagation delay.
//!
//! Each write becomes visible only after the configured delay, which
//! reproduces the eventual consistency of the real session store: a
//! read issued right after a write can still return `None`. A zero
//! delay gives an ordinary strongly consistent map.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::types::errors::StoreError;
use crate::types::tab::{TabId, WindowId};

use super::SessionStore;

/// A pending or visible write. `value: None` records a removal.
#[derive(Debug, Clone)]
struct Slot {
    visible_at: Instant,
    value: Option<Value>,
}

#[derive(Debug, Default)]
struct StoreState {
    window_values: HashMap<(WindowId, String), Vec<Slot>>,
    tab_values: HashMap<(TabId, String), Vec<Slot>>,
    closed_tabs: HashSet<TabId>,
    closed_windows: HashSet<WindowId>,
}

/// In-memory `SessionStore` implementation.
pub struct MemoryStore {
    state: Mutex<StoreState>,
    propagation_delay: Duration,
}

impl MemoryStore {
    /// Strongly consistent store: writes are visible immediately.
    pub fn new() -> Self {
        Self::with_propagation_delay(Duration::ZERO)
    }

    /// Store whose writes become visible only after `delay`.
    pub fn with_propagation_delay(delay: Duration) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            propagation_delay: delay,
        }
    }

    /// Drops all values of a closed tab. Subsequent operations on that
    /// tab fail with `StoreError::TabClosed`, which callers treat as an
    /// expected race.
    pub fn forget_tab(&self, tab: TabId) {
        let mut state = self.lock();
        state.tab_values.retain(|(id, _), _| *id != tab);
        state.closed_tabs.insert(tab);
    }

    /// Drops all values of a closed window.
    pub fn forget_window(&self, window: WindowId) {
        let mut state = self.lock();
        state.window_values.retain(|(id, _), _| *id != window);
        state.closed_windows.insert(window);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        // The store is internal state with no panicking critical sections.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(slots: &[Slot]) -> Option<Value> {
        let now = Instant::now();
        slots
            .iter()
            .rev()
            .find(|s| s.visible_at <= now)
            .and_then(|s| s.value.clone())
    }

    fn push(&self, slots: &mut Vec<Slot>, value: Option<Value>) {
        let now = Instant::now();
        slots.push(Slot {
            visible_at: now + self.propagation_delay,
            value,
        });
        // Keep only the newest already-visible slot plus pending ones.
        if let Some(last_visible) = slots.iter().rposition(|s| s.visible_at <= now) {
            slots.drain(..last_visible);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    async fn get_window_value(
        &self,
        window: WindowId,
        key: &str,
    ) -> Result<Option<Value>, StoreError> {
        let state = self.lock();
        if state.closed_windows.contains(&window) {
            return Err(StoreError::WindowClosed(window));
        }
        Ok(state
            .window_values
            .get(&(window, key.to_string()))
            .and_then(|slots| Self::read(slots)))
    }

    async fn set_window_value(
        &self,
        window: WindowId,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.closed_windows.contains(&window) {
            return Err(StoreError::WindowClosed(window));
        }
        let slots = state
            .window_values
            .entry((window, key.to_string()))
            .or_default();
        self.push(slots, Some(value));
        Ok(())
    }

    async fn remove_window_value(&self, window: WindowId, key: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.closed_windows.contains(&window) {
            return Err(StoreError::WindowClosed(window));
        }
        let slots = state
            .window_values
            .entry((window, key.to_string()))
            .or_default();
        self.push(slots, None);
        Ok(())
    }

    async fn get_tab_value(&self, tab: TabId, key: &str) -> Result<Option<Value>, StoreError> {
        let state = self.lock();
        if state.closed_tabs.contains(&tab) {
            return Err(StoreError::TabClosed(tab));
        }
        Ok(state
            .tab_values
            .get(&(tab, key.to_string()))
            .and_then(|slots| Self::read(slots)))
    }

    async fn set_tab_value(&self, tab: TabId, key: &str, value: Value) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.closed_tabs.contains(&tab) {
            return Err(StoreError::TabClosed(tab));
        }
        let slots = state.tab_values.entry((tab, key.to_string())).or_default();
        self.push(slots, Some(value));
        Ok(())
    }

    async fn remove_tab_value(&self, tab: TabId, key: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.closed_tabs.contains(&tab) {
            return Err(StoreError::TabClosed(tab));
        }
        let slots = state.tab_values.entry((tab, key.to_string())).or_default();
        self.push(slots, None);
        Ok(())
    }
}
