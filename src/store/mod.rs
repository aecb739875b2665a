//! Session key-value store seam.
//!
//! The browser keeps durable per-window and per-tab values that survive
//! restarts. Writes propagate asynchronously: a read shortly after a
//! write may still observe the old state, which is why callers use the
//! retry-until-defined pattern instead of treating absence as "unset".

use serde_json::Value;

use crate::types::errors::StoreError;
use crate::types::tab::{TabId, WindowId};

pub mod memory;

pub use memory::MemoryStore;

/// Store keys used by the group engine.
pub mod keys {
    /// Window value: ordered `Vec<Group>`.
    pub const GROUPS: &str = "groups";
    /// Window value: id of the currently visible group.
    pub const ACTIVE_GROUP: &str = "activeGroup";
    /// Window value: next group uid, monotone, never decremented.
    pub const GROUP_INDEX: &str = "groupIndex";
    /// Tab value: the group the tab belongs to, or the sentinel.
    pub const GROUP_ID: &str = "groupId";
}

/// Persistent per-window / per-tab key-value store.
///
/// Tab values are independent per tab and are not cleared automatically
/// when a tab moves between windows; the detach handler removes them
/// explicitly.
#[allow(async_fn_in_trait)]
pub trait SessionStore: Send + Sync {
    async fn get_window_value(
        &self,
        window: WindowId,
        key: &str,
    ) -> Result<Option<Value>, StoreError>;

    async fn set_window_value(
        &self,
        window: WindowId,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    async fn remove_window_value(&self, window: WindowId, key: &str) -> Result<(), StoreError>;

    async fn get_tab_value(&self, tab: TabId, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set_tab_value(&self, tab: TabId, key: &str, value: Value) -> Result<(), StoreError>;

    async fn remove_tab_value(&self, tab: TabId, key: &str) -> Result<(), StoreError>;
}
