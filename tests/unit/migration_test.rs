use std::sync::Arc;

use panorama_groups::browser::SimulatedBrowser;
use panorama_groups::managers::group_manager::{grid_pitch, GroupManager};
use panorama_groups::store::{keys, MemoryStore, SessionStore};
use panorama_groups::types::group::Rect;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(1, (4, 2))]
#[case(5, (4, 2))]
#[case(8, (4, 2))]
#[case(9, (6, 3))]
#[case(12, (6, 3))]
#[case(18, (6, 3))]
#[case(19, (8, 4))]
#[case(40, (8, 4))]
fn test_grid_pitch_widens_with_group_count(#[case] count: usize, #[case] expected: (usize, usize)) {
    assert_eq!(grid_pitch(count), expected);
}

fn engine() -> (
    Arc<MemoryStore>,
    Arc<SimulatedBrowser>,
    GroupManager<MemoryStore, SimulatedBrowser>,
) {
    let store = Arc::new(MemoryStore::new());
    let browser = Arc::new(SimulatedBrowser::new());
    let manager = GroupManager::new(store.clone(), browser.clone());
    (store, browser, manager)
}

/// A group record as written before the layout schema existed: no rect,
/// no lastMoved.
fn legacy_record(id: i64, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "containerId": "firefox-default" })
}

#[tokio::test]
async fn test_migration_backfills_grid_rects() {
    let (store, browser, manager) = engine();
    let w = browser.create_window();

    let legacy = json!([
        legacy_record(0, "a"),
        legacy_record(1, "b"),
        legacy_record(2, "c"),
        legacy_record(3, "d"),
        legacy_record(4, "e"),
    ]);
    store.set_window_value(w, keys::GROUPS, legacy).await.unwrap();

    manager.migrate_window(w).await.unwrap();

    let groups = manager.groups(w).await.unwrap();
    // Five groups lay out on the 4x2 grid: four across the top row,
    // one starting the second.
    assert_eq!(
        groups[0].rect,
        Some(Rect { x: 0.0, y: 0.0, w: 0.25, h: 0.5 })
    );
    assert_eq!(
        groups[3].rect,
        Some(Rect { x: 0.75, y: 0.0, w: 0.25, h: 0.5 })
    );
    assert_eq!(
        groups[4].rect,
        Some(Rect { x: 0.0, y: 0.5, w: 0.25, h: 0.5 })
    );
    assert!(groups.iter().all(|g| g.last_moved.is_some()));
}

#[tokio::test]
async fn test_migration_uses_wider_grid_for_many_groups() {
    let (store, browser, manager) = engine();
    let w = browser.create_window();

    let legacy: Vec<_> = (0..20).map(|i| legacy_record(i, "g")).collect();
    store
        .set_window_value(w, keys::GROUPS, json!(legacy))
        .await
        .unwrap();

    manager.migrate_window(w).await.unwrap();

    let groups = manager.groups(w).await.unwrap();
    let rect = groups[0].rect.unwrap();
    assert_eq!(rect.w, 0.125);
    assert_eq!(rect.h, 0.25);
    // Index 8 wraps to the second row of the 8x4 grid.
    let rect = groups[8].rect.unwrap();
    assert_eq!(rect.x, 0.0);
    assert_eq!(rect.y, 0.25);
}

#[tokio::test]
async fn test_migration_preserves_already_placed_groups() {
    let (store, browser, manager) = engine();
    let w = browser.create_window();

    let placed = json!({
        "id": 0,
        "name": "placed",
        "containerId": "firefox-default",
        "rect": { "x": 0.1, "y": 0.2, "w": 0.3, "h": 0.4 },
        "lastMoved": 42,
    });
    let mixed = json!([placed, legacy_record(1, "legacy")]);
    store.set_window_value(w, keys::GROUPS, mixed).await.unwrap();

    manager.migrate_window(w).await.unwrap();

    let groups = manager.groups(w).await.unwrap();
    assert_eq!(
        groups[0].rect,
        Some(Rect { x: 0.1, y: 0.2, w: 0.3, h: 0.4 })
    );
    assert_eq!(groups[0].last_moved, Some(42));
    // The legacy record got its grid slot.
    assert_eq!(
        groups[1].rect,
        Some(Rect { x: 0.25, y: 0.0, w: 0.25, h: 0.5 })
    );
}

#[tokio::test]
async fn test_migration_is_idempotent() {
    let (store, browser, manager) = engine();
    let w = browser.create_window();

    let legacy = json!([legacy_record(0, "a"), legacy_record(1, "b")]);
    store.set_window_value(w, keys::GROUPS, legacy).await.unwrap();

    manager.migrate_window(w).await.unwrap();
    let first = manager.groups(w).await.unwrap();
    manager.migrate_window(w).await.unwrap();
    assert_eq!(manager.groups(w).await.unwrap(), first);
}

#[tokio::test]
async fn test_migration_skips_windows_without_groups() {
    let (_store, browser, manager) = engine();
    let w = browser.create_window();
    manager.migrate_window(w).await.unwrap();
}

#[tokio::test]
async fn test_migrate_all_reaches_every_window() {
    let (store, browser, manager) = engine();
    let done = browser.create_window();
    let pending = browser.create_window();

    store
        .set_window_value(
            done,
            keys::GROUPS,
            json!([{
                "id": 0,
                "name": "done",
                "containerId": "firefox-default",
                "rect": { "x": 0.0, "y": 0.0, "w": 0.5, "h": 0.5 },
                "lastMoved": 1,
            }]),
        )
        .await
        .unwrap();
    store
        .set_window_value(pending, keys::GROUPS, json!([legacy_record(0, "old")]))
        .await
        .unwrap();

    // A window that is already migrated must not stop later ones from
    // being processed.
    manager.migrate_all().await.unwrap();
    assert!(manager.groups(pending).await.unwrap()[0].rect.is_some());
}
