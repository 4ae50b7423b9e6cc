//! Fat Sidebar - a headless engine for a reorderable, selectable icon sidebar.
//!
//! The engine owns the ordered item collection, the selection-mode state
//! machine, the press-and-hold drag-to-reorder gesture and the hover overlay
//! lifecycle. A rendering layer draws the items, forwards pointer input and
//! reacts to the [`SidebarEvent`]s it observes.
//!
//! # Example
//!
//! ```
//! use fat_sidebar::prelude::*;
//!
//! let config = SidebarConfig::default().with_selection_mode(SelectionMode::ToggleMany);
//! let mut sidebar = Sidebar::new(config)?;
//! let log = EventLog::new();
//! sidebar.register_observer(log.clone());
//!
//! let inbox = sidebar.append(ItemConfig::new("Inbox").with_icon("tray"));
//! let flagged = sidebar.append("Flagged".into());
//!
//! sidebar.toggle(inbox);
//! sidebar.toggle(flagged);
//! assert_eq!(sidebar.selected_indexes(), vec![0, 1]);
//! assert_eq!(log.len(), 4);
//! # Ok::<(), SidebarError>(())
//! ```

pub use fat_sidebar_core::*;

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod prelude;
mod sidebar;

pub use config::SidebarConfig;
pub use error::{Result, SidebarError};
pub use event::{EventLog, EventSink, SidebarEvent, SidebarObserver};
pub use sidebar::Sidebar;
