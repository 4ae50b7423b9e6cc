//! Item model for the sidebar.
//!
//! This module holds the data side of the engine, kept apart from any
//! rendering concern:
//!
//! - [`Item`]: one entry's display attributes plus its selection and
//!   highlight flags
//! - [`ItemStore`]: the ordered collection that owns every item
//! - [`SelectionController`]: applies a [`SelectionMode`] to the store
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────────┐     ┌─────────────┐
//! │  ItemStore  │<────│ SelectionController │────>│  EventSink  │
//! │ (arena +    │     │  (SelectionPolicy)  │     │             │
//! │  order)     │     └─────────────────────┘     └─────────────┘
//! └─────────────┘                                        │
//!       │ ItemId                                         v
//!       └──────────────> rendering layer <──────── observer
//! ```
//!
//! The rendering layer keeps one view per [`ItemId`] and redraws it when the
//! observer reports a change.

mod item;
mod selection;
mod store;

pub use item::{Item, ItemConfig, ItemId, ItemStyle, VisualState};
pub use selection::{PeerDeselection, SelectionController, SelectionMode, SelectionPolicy};
pub use store::ItemStore;
