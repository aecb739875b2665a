//! Demo binary: drives the group engine against the simulated browser.

use std::error::Error;

use panorama_groups::app::App;
use panorama_groups::services::menu;
use panorama_groups::types::group::SENTINEL_GROUP;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut app = App::new(None);
    let window = app.browser.create_window();
    app.init().await?;

    // A window starts with a single bootstrapped group.
    let groups = app.groups.groups(window).await?;
    println!("window {} groups after init: {:?}", window, group_names(&groups));

    let first = app.open_tab(window, true).await?;
    let second = app.open_tab(window, false).await?;
    let third = app.open_tab(window, false).await?;
    println!("opened tabs {:?}", [first, second, third]);

    // A second group, then send two tabs over to it.
    let work = app.groups.create_group(window, "Work").await?;
    app.groups
        .send_tabs_to_group(window, work.id, &[second, third])
        .await?;
    println!(
        "visible after sending to '{}': {:?}",
        work.name,
        app.browser.visible_tabs(window)?
    );

    // Rotate forward into the new group.
    app.handle_command(window, "activate-next-group").await?;
    println!(
        "visible after activate-next-group: {:?}",
        app.browser.visible_tabs(window)?
    );

    let (title, badge) = app.browser.action_badge(window)?;
    println!("icon: {:?} badge: {:?}", title, badge);

    // The context-menu model the UI would render.
    let groups = app.groups.groups(window).await?;
    for entry in menu::build_send_menu(window, &groups) {
        println!("menu entry {} -> {}", entry.id, entry.title);
    }

    // The management view stays out of group membership.
    let view = app.open_management_view(window).await?;
    let view_group = app.groups.tab_group(view).await?;
    assert_eq!(view_group, SENTINEL_GROUP);
    println!("management view tab {} carries the sentinel group", view);

    Ok(())
}

fn group_names(groups: &[panorama_groups::types::group::Group]) -> Vec<String> {
    groups.iter().map(|g| format!("{}: {}", g.id, g.name)).collect()
}
