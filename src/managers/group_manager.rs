//! Group Manager.
//!
//! Owns per-window group lists and per-tab group assignment, and keeps
//! tab visibility reconciled with the active group. All durable state
//! lives in the session store; all tab work goes through the browser
//! host. The store is eventually consistent, so reads of values that
//! another in-flight event is writing use a bounded retry-until-defined
//! loop instead of treating absence as "unset".

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::{json, Value};

use crate::browser::BrowserHost;
use crate::store::{keys, SessionStore};
use crate::types::errors::{GroupError, HostError, StoreError};
use crate::types::group::{
    now_ms, CreationReason, Group, GroupId, Rect, DEFAULT_GROUP_NAME, SENTINEL_GROUP,
};
use crate::types::options::RetryPolicy;
use crate::types::tab::{TabId, TabInfo, WindowId};

/// Grid pitch (columns, rows) used when backfilling layout rects for
/// legacy group records: denser grids for larger group counts.
pub fn grid_pitch(group_count: usize) -> (usize, usize) {
    if group_count > 18 {
        (8, 4)
    } else if group_count > 8 {
        (6, 3)
    } else {
        (4, 2)
    }
}

/// Index of the group `offset` steps away from `current`, wrapping
/// cyclically in both directions. True mathematical modulo: the result
/// is always in `[0, len)`, even for large negative offsets, unlike the
/// sign-following `%` operator.
pub fn rotated_index(current: usize, offset: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let n = len as i64;
    (((current as i64 + offset) % n + n) % n) as usize
}

/// Core group-membership and visibility engine, generic over the
/// session store and the browser host.
pub struct GroupManager<S, H> {
    store: Arc<S>,
    host: Arc<H>,
    retry: RetryPolicy,
}

impl<S: SessionStore, H: BrowserHost> GroupManager<S, H> {
    pub fn new(store: Arc<S>, host: Arc<H>) -> Self {
        Self::with_retry_policy(store, host, RetryPolicy::default())
    }

    pub fn with_retry_policy(store: Arc<S>, host: Arc<H>, retry: RetryPolicy) -> Self {
        Self { store, host, retry }
    }

    pub fn set_retry_policy(&mut self, retry: RetryPolicy) {
        self.retry = retry;
    }

    // ─── Store access helpers ───

    /// The window's group list, or `None` when never initialized.
    async fn groups_opt(&self, window: WindowId) -> Result<Option<Vec<Group>>, GroupError> {
        match self.store.get_window_value(window, keys::GROUPS).await? {
            Some(v) => {
                let groups: Vec<Group> =
                    serde_json::from_value(v.clone()).map_err(|_| GroupError::BadValue {
                        key: keys::GROUPS.to_string(),
                        value: v.to_string(),
                    })?;
                Ok(Some(groups))
            }
            None => Ok(None),
        }
    }

    /// The window's group list; initialization must have produced a
    /// non-empty one.
    pub async fn groups(&self, window: WindowId) -> Result<Vec<Group>, GroupError> {
        match self.groups_opt(window).await? {
            Some(groups) if !groups.is_empty() => Ok(groups),
            _ => Err(GroupError::NoGroups(window)),
        }
    }

    async fn write_groups(&self, window: WindowId, groups: &[Group]) -> Result<(), GroupError> {
        let value = serde_json::to_value(groups).map_err(|e| GroupError::BadValue {
            key: keys::GROUPS.to_string(),
            value: e.to_string(),
        })?;
        self.store
            .set_window_value(window, keys::GROUPS, value)
            .await?;
        Ok(())
    }

    /// Retry-until-defined read of a window value. Absence is retried
    /// with backoff because the writer may simply not have propagated
    /// yet; only exhaustion of the budget is an error.
    async fn window_value_with_retry(
        &self,
        window: WindowId,
        key: &str,
    ) -> Result<Value, GroupError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut delay = self.retry.initial_delay();
        for attempt in 0..attempts {
            if let Some(v) = self.store.get_window_value(window, key).await? {
                return Ok(v);
            }
            if attempt + 1 < attempts {
                tokio::time::sleep(delay).await;
                delay = self.retry.next_delay(delay);
            }
        }
        Err(GroupError::RetryTimeout {
            key: key.to_string(),
            attempts,
        })
    }

    /// Retry-until-defined read of a tab value.
    async fn tab_value_with_retry(&self, tab: TabId, key: &str) -> Result<Value, GroupError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut delay = self.retry.initial_delay();
        for attempt in 0..attempts {
            if let Some(v) = self.store.get_tab_value(tab, key).await? {
                return Ok(v);
            }
            if attempt + 1 < attempts {
                tokio::time::sleep(delay).await;
                delay = self.retry.next_delay(delay);
            }
        }
        Err(GroupError::RetryTimeout {
            key: key.to_string(),
            attempts,
        })
    }

    /// The window's active group id, waiting out propagation if needed.
    pub async fn active_group(&self, window: WindowId) -> Result<GroupId, GroupError> {
        let v = self
            .window_value_with_retry(window, keys::ACTIVE_GROUP)
            .await?;
        as_group_id(keys::ACTIVE_GROUP, &v)
    }

    /// The tab's group id, waiting out propagation if needed.
    pub async fn tab_group(&self, tab: TabId) -> Result<GroupId, GroupError> {
        let v = self.tab_value_with_retry(tab, keys::GROUP_ID).await?;
        as_group_id(keys::GROUP_ID, &v)
    }

    // ─── Event handlers ───

    /// A tab appeared in a window.
    ///
    /// Ordinary tabs without a group yet inherit the window's active
    /// group. The active-group value may still be propagating (a brand
    /// new window's bootstrap write, for instance), hence the retry
    /// read. Backup restores carry their own group data and are left
    /// untouched; the management-view tab gets the sentinel.
    pub async fn handle_tab_created(
        &self,
        tab: &TabInfo,
        reason: CreationReason,
    ) -> Result<(), GroupError> {
        match reason {
            CreationReason::RestoringBackup => Ok(()),
            CreationReason::OpeningManagementView => {
                self.store
                    .set_tab_value(tab.id, keys::GROUP_ID, json!(SENTINEL_GROUP))
                    .await?;
                Ok(())
            }
            CreationReason::Normal => {
                if self
                    .store
                    .get_tab_value(tab.id, keys::GROUP_ID)
                    .await?
                    .is_some()
                {
                    return Ok(());
                }
                let active = self.active_group(tab.window_id).await?;
                match self
                    .store
                    .set_tab_value(tab.id, keys::GROUP_ID, json!(active))
                    .await
                {
                    Ok(()) => Ok(()),
                    // Closed before the assignment landed.
                    Err(StoreError::TabClosed(_)) => Ok(()),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// A tab was attached to a window: same handling as creation.
    pub async fn handle_tab_attached(&self, tab: TabId) -> Result<(), GroupError> {
        let tab = match self.host.get_tab(tab).await {
            Ok(t) => t,
            Err(HostError::TabNotFound(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        self.handle_tab_created(&tab, CreationReason::Normal).await
    }

    /// A tab was detached from its window: its group assignment is
    /// cleared explicitly, since the store does not do it for us.
    pub async fn handle_tab_detached(&self, tab: TabId) -> Result<(), GroupError> {
        match self.store.remove_tab_value(tab, keys::GROUP_ID).await {
            Ok(()) => Ok(()),
            Err(StoreError::TabClosed(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The user switched tabs.
    ///
    /// Pinned tabs are outside group logic entirely. The management tab
    /// keeps the active group unchanged but still resyncs visibility.
    /// Any other tab drags the window's active group along with it.
    pub async fn handle_tab_activated(&self, tab: TabId) -> Result<(), GroupError> {
        let tab = match self.host.get_tab(tab).await {
            Ok(t) => t,
            Err(HostError::TabNotFound(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        if tab.pinned {
            return Ok(());
        }
        // A freshly created tab may not have its assignment visible yet.
        let group = match self.tab_group(tab.id).await {
            Ok(g) => g,
            Err(GroupError::Store(StoreError::TabClosed(_))) => return Ok(()),
            Err(e) => return Err(e),
        };
        if group == SENTINEL_GROUP {
            let active = self.active_group(tab.window_id).await?;
            return self.sync_visibility(tab.window_id, active, false).await;
        }
        self.store
            .set_window_value(tab.window_id, keys::ACTIVE_GROUP, json!(group))
            .await?;
        self.sync_visibility(tab.window_id, group, false).await
    }

    // ─── Operations ───

    /// Shifts the window's active group by `offset` in display order,
    /// wrapping in both directions, then resyncs visibility and focuses
    /// a tab of the new group.
    pub async fn change_active_group_by(
        &self,
        window: WindowId,
        offset: i64,
    ) -> Result<(), GroupError> {
        let groups = self.groups(window).await?;
        let active = self.active_group(window).await?;
        let current = groups.iter().position(|g| g.id == active).unwrap_or(0);
        let next = groups[rotated_index(current, offset, groups.len())].id;
        self.store
            .set_window_value(window, keys::ACTIVE_GROUP, json!(next))
            .await?;
        self.sync_visibility(window, next, true).await
    }

    /// Reconciles tab visibility with the given active group.
    ///
    /// Every tab is partitioned on its stored group id, concurrently;
    /// tabs whose value cannot be read (closed mid-operation) are
    /// skipped as an expected race, and management tabs are never
    /// touched. When `select_tab` is set, the most recently accessed
    /// member becomes the focused tab, unless the group has no member.
    pub async fn sync_visibility(
        &self,
        window: WindowId,
        active_group: GroupId,
        select_tab: bool,
    ) -> Result<(), GroupError> {
        let tabs = self.host.query_tabs(window).await?;
        let reads = tabs
            .iter()
            .map(|tab| async move { (tab, self.store.get_tab_value(tab.id, keys::GROUP_ID).await) });

        let mut show: Vec<TabId> = Vec::new();
        let mut hide: Vec<TabId> = Vec::new();
        let mut members: Vec<&TabInfo> = Vec::new();
        for (tab, read) in join_all(reads).await {
            match read {
                Ok(Some(v)) => match v.as_i64() {
                    Some(gid) if gid == SENTINEL_GROUP => {}
                    Some(gid) if gid == active_group => {
                        show.push(tab.id);
                        members.push(tab);
                    }
                    _ => hide.push(tab.id),
                },
                Ok(None) | Err(_) => {
                    log::debug!("tab {} group unreadable, skipped", tab.id);
                }
            }
        }

        if select_tab {
            if let Some(best) = members.iter().max_by_key(|t| t.last_accessed) {
                self.host.activate_tab(best.id).await?;
            }
        }

        self.host.hide_tabs(&hide).await?;
        self.host.show_tabs(&show).await?;

        if active_group != SENTINEL_GROUP {
            self.update_action_badge(window, Some(active_group)).await?;
        }
        Ok(())
    }

    /// Moves the given tabs into `target_group` and resyncs visibility
    /// for the previously active group, so the moved tabs disappear
    /// from view.
    ///
    /// The caller (the menu collaborator) decides which tabs are in the
    /// set. If the focused tab is among them, focus first moves to the
    /// nearest visible neighbor that is staying, preferring the
    /// preceding one, so the window keeps a focused tab.
    pub async fn send_tabs_to_group(
        &self,
        window: WindowId,
        target_group: GroupId,
        tab_ids: &[TabId],
    ) -> Result<(), GroupError> {
        if tab_ids.is_empty() {
            return Ok(());
        }
        let previous = self.active_group(window).await?;
        if previous == target_group {
            return Ok(());
        }

        let tabs = self.host.query_tabs(window).await?;
        if let Some(active) = tabs.iter().find(|t| t.active) {
            if tab_ids.contains(&active.id) {
                let visible: Vec<&TabInfo> = tabs.iter().filter(|t| !t.hidden).collect();
                if let Some(pos) = visible.iter().position(|t| t.id == active.id) {
                    let preceding = visible[..pos]
                        .iter()
                        .rev()
                        .find(|t| !tab_ids.contains(&t.id));
                    let following = visible[pos + 1..].iter().find(|t| !tab_ids.contains(&t.id));
                    if let Some(next_active) = preceding.or(following) {
                        self.host.activate_tab(next_active.id).await?;
                    }
                }
            }
        }

        for &tab in tab_ids {
            log::debug!("sending tab {} to group {}", tab, target_group);
            match self
                .store
                .set_tab_value(tab, keys::GROUP_ID, json!(target_group))
                .await
            {
                Ok(()) => {}
                Err(StoreError::TabClosed(_)) => continue,
                Err(e) => return Err(e.into()),
            }
            // Strip reordering on a tab that just closed is ignorable.
            let _ = self.host.move_tab_to_end(tab).await;
        }

        self.sync_visibility(window, previous, false).await
    }

    /// Reconciliation pass: reassigns every tab whose group id does not
    /// reference an existing group (the sentinel counts as valid) to
    /// the window's first group, then resyncs visibility. Run at
    /// startup to heal state left by a crash, an update, or a restored
    /// session.
    pub async fn validate_window(&self, window: WindowId) -> Result<(), GroupError> {
        let groups = self.groups(window).await?;
        let first = groups[0].id;
        let mut valid: HashSet<GroupId> = groups.iter().map(|g| g.id).collect();
        valid.insert(SENTINEL_GROUP);
        log::debug!("valid groups for window {}: {:?}", window, valid);

        let tabs = self.host.query_tabs(window).await?;
        let valid = &valid;
        let repairs = tabs.iter().map(|tab| async move {
            match self.store.get_tab_value(tab.id, keys::GROUP_ID).await {
                Ok(Some(v)) if v.as_i64().map_or(false, |gid| valid.contains(&gid)) => {}
                Ok(_) => {
                    log::debug!("tab {} has an invalid group, moving to {}", tab.id, first);
                    let _ = self
                        .store
                        .set_tab_value(tab.id, keys::GROUP_ID, json!(first))
                        .await;
                }
                // Closed mid-validation.
                Err(_) => {}
            }
        });
        join_all(repairs).await;

        let active = self.active_group(window).await?;
        self.sync_visibility(window, active, false).await
    }

    /// Runs the reconciliation pass over every window, concurrently.
    pub async fn validate_all(&self) -> Result<(), GroupError> {
        let windows = self.host.all_windows().await?;
        let passes = windows.iter().map(|w| self.validate_window(*w));
        for result in join_all(passes).await {
            result?;
        }
        Ok(())
    }

    // ─── Bootstrap ───

    /// Fresh group uid from the window's monotonic counter.
    pub async fn new_group_uid(&self, window: WindowId) -> Result<GroupId, GroupError> {
        let uid = self
            .store
            .get_window_value(window, keys::GROUP_INDEX)
            .await?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        self.store
            .set_window_value(window, keys::GROUP_INDEX, json!(uid + 1))
            .await?;
        Ok(uid)
    }

    /// Creates the window's first group unless a non-empty group list
    /// already exists. Restored windows trigger window-created events
    /// too but still carry their group data, so existence of the list
    /// is the test, not window age. Returns whether a group was created.
    pub async fn ensure_window_has_group(&self, window: WindowId) -> Result<bool, GroupError> {
        if let Some(groups) = self.groups_opt(window).await? {
            if !groups.is_empty() {
                self.update_action_badge(window, None).await?;
                return Ok(false);
            }
        }
        log::info!("no groups found for window {}, creating one", window);
        let id = self.new_group_uid(window).await?;
        let group = Group::new(id, DEFAULT_GROUP_NAME);
        self.write_groups(window, std::slice::from_ref(&group))
            .await?;
        self.store
            .set_window_value(window, keys::ACTIVE_GROUP, json!(id))
            .await?;
        self.update_action_badge(window, Some(id)).await?;
        Ok(true)
    }

    /// Makes sure every window has at least one group.
    pub async fn setup_windows(&self) -> Result<(), GroupError> {
        for window in self.host.all_windows().await? {
            self.ensure_window_has_group(window).await?;
        }
        Ok(())
    }

    // ─── Legacy migration ───

    /// Backfills grid-layout rects on group records written before the
    /// layout schema existed. No-op once every group carries a
    /// `last_moved` stamp, so running it again is harmless.
    pub async fn migrate_window(&self, window: WindowId) -> Result<(), GroupError> {
        let Some(mut groups) = self.groups_opt(window).await? else {
            return Ok(());
        };
        if groups.iter().all(|g| g.last_moved.is_some()) {
            return Ok(());
        }
        let (pitch_x, pitch_y) = grid_pitch(groups.len());
        let stamp = now_ms();
        for (i, group) in groups.iter_mut().enumerate() {
            if group.last_moved.is_some() {
                continue;
            }
            group.rect = Some(Rect {
                x: (i % pitch_x) as f64 / pitch_x as f64,
                y: (i / pitch_x) as f64 / pitch_y as f64,
                w: 1.0 / pitch_x as f64,
                h: 1.0 / pitch_y as f64,
            });
            group.last_moved = Some(stamp);
        }
        log::info!("migrated legacy group records for window {}", window);
        self.write_groups(window, &groups).await
    }

    /// Runs the legacy migration over every window. One window's state
    /// never short-circuits the others.
    pub async fn migrate_all(&self) -> Result<(), GroupError> {
        for window in self.host.all_windows().await? {
            self.migrate_window(window).await?;
        }
        Ok(())
    }

    // ─── Group list maintenance (menu-driven) ───

    /// Appends a new group with a fresh uid.
    pub async fn create_group(&self, window: WindowId, name: &str) -> Result<Group, GroupError> {
        let mut groups = self.groups_opt(window).await?.unwrap_or_default();
        let id = self.new_group_uid(window).await?;
        let group = Group::new(id, name);
        groups.push(group.clone());
        self.write_groups(window, &groups).await?;
        self.update_action_badge(window, None).await?;
        Ok(group)
    }

    pub async fn rename_group(
        &self,
        window: WindowId,
        group: GroupId,
        name: &str,
    ) -> Result<(), GroupError> {
        let mut groups = self.groups(window).await?;
        let target = groups
            .iter_mut()
            .find(|g| g.id == group)
            .ok_or(GroupError::GroupNotFound(group))?;
        target.name = name.to_string();
        self.write_groups(window, &groups).await?;
        self.update_action_badge(window, None).await
    }

    /// Removes a group. Its tabs fall back to the first remaining group
    /// rather than being dropped, and the active group is repaired if
    /// it pointed at the removed one. The last group cannot be removed.
    pub async fn remove_group(&self, window: WindowId, group: GroupId) -> Result<(), GroupError> {
        let mut groups = self.groups(window).await?;
        if !groups.iter().any(|g| g.id == group) {
            return Err(GroupError::GroupNotFound(group));
        }
        if groups.len() == 1 {
            return Err(GroupError::LastGroup(window));
        }
        groups.retain(|g| g.id != group);
        self.write_groups(window, &groups).await?;
        let first = groups[0].id;

        let tabs = self.host.query_tabs(window).await?;
        let reassigns = tabs.iter().map(|tab| async move {
            if let Ok(Some(v)) = self.store.get_tab_value(tab.id, keys::GROUP_ID).await {
                if v.as_i64() == Some(group) {
                    let _ = self
                        .store
                        .set_tab_value(tab.id, keys::GROUP_ID, json!(first))
                        .await;
                }
            }
        });
        join_all(reassigns).await;

        let active = self.active_group(window).await?;
        let changed = active == group;
        let active = if changed {
            self.store
                .set_window_value(window, keys::ACTIVE_GROUP, json!(first))
                .await?;
            first
        } else {
            active
        };
        self.sync_visibility(window, active, changed).await
    }

    // ─── Icon affordance ───

    /// Icon tooltip shows the active group's name; badge shows the
    /// window's group count.
    async fn update_action_badge(
        &self,
        window: WindowId,
        active: Option<GroupId>,
    ) -> Result<(), GroupError> {
        let groups = match self.groups_opt(window).await? {
            Some(groups) if !groups.is_empty() => groups,
            _ => return Ok(()),
        };
        let active = match active {
            Some(id) => id,
            None => match self
                .store
                .get_window_value(window, keys::ACTIVE_GROUP)
                .await?
                .and_then(|v| v.as_i64())
            {
                Some(id) => id,
                None => return Ok(()),
            },
        };
        if let Some(group) = groups.iter().find(|g| g.id == active) {
            self.host
                .set_action_title(window, &format!("Active Group: {}", group.name))
                .await?;
        }
        self.host
            .set_badge_text(window, &groups.len().to_string())
            .await?;
        Ok(())
    }
}

fn as_group_id(key: &str, v: &Value) -> Result<GroupId, GroupError> {
    v.as_i64().ok_or_else(|| GroupError::BadValue {
        key: key.to_string(),
        value: v.to_string(),
    })
}
