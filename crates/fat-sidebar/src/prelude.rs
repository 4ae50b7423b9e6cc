//! Prelude module for Fat Sidebar.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use fat_sidebar::prelude::*;
//! ```

// ============================================================================
// Facade and Configuration
// ============================================================================

pub use crate::config::SidebarConfig;
pub use crate::error::SidebarError;
pub use crate::sidebar::Sidebar;

// ============================================================================
// Items and Selection
// ============================================================================

pub use crate::model::{
    Item, ItemConfig, ItemId, ItemStore, ItemStyle, PeerDeselection, SelectionController,
    SelectionMode, SelectionPolicy, VisualState,
};

// ============================================================================
// Events
// ============================================================================

pub use crate::event::{EventLog, EventSink, SidebarEvent, SidebarObserver};

// ============================================================================
// Interaction
// ============================================================================

pub use crate::geometry::{Point, Span};
pub use crate::interaction::{DragPhase, HoverChange, ItemMetrics, ReleaseOutcome, UniformExtent};
