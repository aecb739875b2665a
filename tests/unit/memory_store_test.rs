use std::time::Duration;

use panorama_groups::store::{MemoryStore, SessionStore};
use panorama_groups::types::errors::StoreError;
use serde_json::json;

#[tokio::test]
async fn test_zero_delay_write_is_immediately_visible() {
    let store = MemoryStore::new();
    store.set_window_value(1, "activeGroup", json!(3)).await.unwrap();
    let v = store.get_window_value(1, "activeGroup").await.unwrap();
    assert_eq!(v, Some(json!(3)));
}

#[tokio::test]
async fn test_unwritten_key_reads_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get_window_value(1, "groups").await.unwrap(), None);
    assert_eq!(store.get_tab_value(1, "groupId").await.unwrap(), None);
}

#[tokio::test]
async fn test_delayed_write_is_initially_invisible() {
    let store = MemoryStore::with_propagation_delay(Duration::from_millis(40));
    store.set_tab_value(5, "groupId", json!(0)).await.unwrap();

    // Too early: the write has not propagated yet.
    assert_eq!(store.get_tab_value(5, "groupId").await.unwrap(), None);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(store.get_tab_value(5, "groupId").await.unwrap(), Some(json!(0)));
}

#[tokio::test]
async fn test_delayed_overwrite_keeps_old_value_visible() {
    let store = MemoryStore::with_propagation_delay(Duration::from_millis(40));
    store.set_window_value(1, "activeGroup", json!(0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    store.set_window_value(1, "activeGroup", json!(7)).await.unwrap();
    // The overwrite is pending; the old value still reads back.
    assert_eq!(
        store.get_window_value(1, "activeGroup").await.unwrap(),
        Some(json!(0))
    );

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(
        store.get_window_value(1, "activeGroup").await.unwrap(),
        Some(json!(7))
    );
}

#[tokio::test]
async fn test_latest_visible_write_wins() {
    let store = MemoryStore::new();
    store.set_tab_value(2, "groupId", json!(1)).await.unwrap();
    store.set_tab_value(2, "groupId", json!(4)).await.unwrap();
    assert_eq!(store.get_tab_value(2, "groupId").await.unwrap(), Some(json!(4)));
}

#[tokio::test]
async fn test_remove_tab_value() {
    let store = MemoryStore::new();
    store.set_tab_value(2, "groupId", json!(1)).await.unwrap();
    store.remove_tab_value(2, "groupId").await.unwrap();
    assert_eq!(store.get_tab_value(2, "groupId").await.unwrap(), None);
}

#[tokio::test]
async fn test_window_and_tab_values_are_independent() {
    let store = MemoryStore::new();
    store.set_window_value(1, "groupId", json!(10)).await.unwrap();
    store.set_tab_value(1, "groupId", json!(20)).await.unwrap();
    assert_eq!(store.get_window_value(1, "groupId").await.unwrap(), Some(json!(10)));
    assert_eq!(store.get_tab_value(1, "groupId").await.unwrap(), Some(json!(20)));
}

#[tokio::test]
async fn test_forget_tab_turns_operations_into_closed_errors() {
    let store = MemoryStore::new();
    store.set_tab_value(3, "groupId", json!(0)).await.unwrap();
    store.forget_tab(3);

    assert_eq!(
        store.get_tab_value(3, "groupId").await,
        Err(StoreError::TabClosed(3))
    );
    assert_eq!(
        store.set_tab_value(3, "groupId", json!(1)).await,
        Err(StoreError::TabClosed(3))
    );
    // Other tabs are unaffected.
    assert_eq!(store.get_tab_value(4, "groupId").await.unwrap(), None);
}

#[tokio::test]
async fn test_forget_window_turns_operations_into_closed_errors() {
    let store = MemoryStore::new();
    store.set_window_value(9, "groups", json!([])).await.unwrap();
    store.forget_window(9);

    assert_eq!(
        store.get_window_value(9, "groups").await,
        Err(StoreError::WindowClosed(9))
    );
}

#[tokio::test]
async fn test_remove_window_value() {
    let store = MemoryStore::new();
    store.set_window_value(1, "groupIndex", json!(2)).await.unwrap();
    store.remove_window_value(1, "groupIndex").await.unwrap();
    assert_eq!(store.get_window_value(1, "groupIndex").await.unwrap(), None);
}

#[tokio::test]
async fn test_delayed_removal_keeps_old_value_visible() {
    let store = MemoryStore::with_propagation_delay(Duration::from_millis(40));
    store.set_window_value(1, "activeGroup", json!(0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    store.remove_window_value(1, "activeGroup").await.unwrap();
    assert_eq!(
        store.get_window_value(1, "activeGroup").await.unwrap(),
        Some(json!(0))
    );

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(store.get_window_value(1, "activeGroup").await.unwrap(), None);
}
