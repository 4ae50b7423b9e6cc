//! Saved Searches Example
//!
//! Drives a sidebar of saved searches through a scripted pointer session and
//! prints the events a rendering layer would receive:
//! - clicking to select
//! - press-and-hold to reorder
//! - double clicking to open
//! - hovering a compact item to show its label
//!
//! Run with: RUST_LOG=fat_sidebar=debug cargo run -p fat-sidebar --example saved_searches

use std::time::{Duration, Instant};

use fat_sidebar::prelude::*;
use tracing_subscriber::EnvFilter;

/// A saved search as the host application stores it.
struct SavedSearch {
    name: &'static str,
    query: &'static str,
    pinned: bool,
}

impl From<&SavedSearch> for ItemConfig {
    fn from(search: &SavedSearch) -> Self {
        let config = ItemConfig::new(search.name).with_icon("magnifyingglass");
        if search.pinned {
            config
        } else {
            config.with_style(ItemStyle::Small {
                icon_size: 16.0,
                padding: 8.0,
            })
        }
    }
}

const SEARCHES: &[SavedSearch] = &[
    SavedSearch {
        name: "Inbox",
        query: "tag:inbox",
        pinned: true,
    },
    SavedSearch {
        name: "Drafts",
        query: "tag:draft",
        pinned: true,
    },
    SavedSearch {
        name: "Receipts",
        query: "from:billing OR subject:receipt",
        pinned: false,
    },
    SavedSearch {
        name: "Travel",
        query: "tag:travel after:2026-01-01",
        pinned: false,
    },
];

/// Regular items are tall; compact items are as tall as their icon.
fn extent(item: &Item) -> f32 {
    match item.style() {
        ItemStyle::Regular => 64.0,
        ItemStyle::Small { icon_size, padding } => icon_size + 2.0 * padding,
    }
}

fn centre_of(sidebar: &Sidebar, id: ItemId) -> Point {
    let index = sidebar.index_of(id).unwrap_or_default();
    let y = sidebar
        .item_spans()
        .get(index)
        .map_or(0.0, |span| span.mid());
    Point::new(40.0, y)
}

fn print_order(sidebar: &Sidebar) {
    let titles: Vec<&str> = sidebar.iter().map(Item::title).collect();
    println!("  order: {}", titles.join(", "));
}

fn main() -> fat_sidebar::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SidebarConfig::from_toml_str(
        r#"
        selection_mode = "select_one"
        hold_threshold_ms = 400
        "#,
    )?;
    let mut sidebar = Sidebar::new(config)?.with_metrics(extent);

    let ids: Vec<ItemId> = SEARCHES
        .iter()
        .map(|search| sidebar.append(search.into()))
        .collect();

    sidebar.register_observer(|event: &SidebarEvent| {
        println!("  event: {event:?}");
    });

    let start = Instant::now();
    let hold = sidebar.config().hold_threshold();

    println!("Click \"Drafts\":");
    let drafts = centre_of(&sidebar, ids[1]);
    sidebar.on_press(ids[1], drafts, start);
    sidebar.on_release(drafts);

    println!("Hold \"Inbox\" and drag it below \"Drafts\":");
    let inbox = centre_of(&sidebar, ids[0]);
    sidebar.on_press(ids[0], inbox, start);
    if let Some(wait) = sidebar.time_until_next_timer(start) {
        sidebar.process_timers(start + wait);
    }
    for step in 1..=5 {
        sidebar.on_pointer_move(Point::new(inbox.x, inbox.y + 15.0 * step as f32));
    }
    sidebar.on_release(Point::new(inbox.x, inbox.y + 75.0));
    print_order(&sidebar);

    println!("Double click \"Receipts\":");
    let receipts = centre_of(&sidebar, ids[2]);
    sidebar.on_press(ids[2], receipts, start + hold * 2);
    sidebar.on_release(receipts);
    sidebar.on_press(ids[2], receipts, start + hold * 2 + Duration::from_millis(150));
    sidebar.on_double_click(ids[2]);
    if let Some(index) = sidebar.index_of(ids[2]) {
        println!("  open search: {}", SEARCHES[2].query);
        tracing::info!(index, "opened saved search");
    }

    println!("Hover the compact items:");
    sidebar.on_pointer_enter(ids[2]);
    sidebar.on_pointer_enter(ids[3]);
    sidebar.on_overlay_exit(ids[3]);

    println!("Remove \"Travel\":");
    sidebar.remove(ids[3]);
    print_order(&sidebar);

    Ok(())
}
