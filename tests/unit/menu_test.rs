use panorama_groups::services::menu::{build_send_menu, parse_entry_id, tabs_to_send};
use panorama_groups::types::group::Group;
use panorama_groups::types::tab::TabInfo;

fn tab(id: u64, active: bool, highlighted: bool) -> TabInfo {
    TabInfo {
        id,
        window_id: 1,
        index: id as usize,
        pinned: false,
        hidden: false,
        active,
        highlighted: highlighted || active,
        last_accessed: 0,
    }
}

#[test]
fn test_menu_entries_follow_display_order() {
    let groups = vec![Group::new(3, "Work"), Group::new(0, "Home")];
    let entries = build_send_menu(7, &groups);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "sendto-7-3");
    assert_eq!(entries[0].title, "3: Work");
    assert_eq!(entries[0].group_id, 3);
    assert_eq!(entries[1].id, "sendto-7-0");
    assert_eq!(entries[1].window_id, 7);
}

#[test]
fn test_entry_id_round_trips() {
    let groups = vec![Group::new(12, "x")];
    let entries = build_send_menu(4, &groups);
    assert_eq!(parse_entry_id(&entries[0].id), Some((4, 12)));
}

#[test]
fn test_entry_id_parses_negative_group() {
    assert_eq!(parse_entry_id("sendto-2--1"), Some((2, -1)));
}

#[test]
fn test_malformed_entry_ids_are_rejected() {
    assert_eq!(parse_entry_id("sendto-abc"), None);
    assert_eq!(parse_entry_id("sendto-1-x"), None);
    assert_eq!(parse_entry_id("other-1-2"), None);
    assert_eq!(parse_entry_id(""), None);
}

#[test]
fn test_plain_click_sends_only_the_clicked_tab() {
    let tabs = vec![tab(1, true, false), tab(2, false, false), tab(3, false, false)];
    // A right click on tab 3 does not highlight it.
    assert_eq!(tabs_to_send(&tabs, 3), vec![3]);
}

#[test]
fn test_multi_select_sends_highlighted_without_the_focused_tab() {
    let tabs = vec![tab(1, true, false), tab(2, false, true), tab(3, false, true)];
    assert_eq!(tabs_to_send(&tabs, 2), vec![2, 3]);
}

#[test]
fn test_focused_tab_alone_counts_as_plain_click() {
    // The focused tab is always highlighted; a single highlight is not
    // a multi-select.
    let tabs = vec![tab(1, true, false), tab(2, false, false)];
    assert_eq!(tabs_to_send(&tabs, 1), vec![1]);
}
