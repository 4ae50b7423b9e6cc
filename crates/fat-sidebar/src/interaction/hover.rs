//! Hover overlay lifecycle.
//!
//! Items in the small style show only their icon; hovering one opens an
//! overlay with the full label. At most one overlay is open at a time, and no
//! overlay opens while a press is in progress so that dragging across items
//! does not flash their overlays.

use fat_sidebar_core::logging::targets;

use crate::model::{ItemId, ItemStyle};

/// Overlay changes produced by one hover event.
///
/// When both are set, `hidden` happens first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    /// Item whose overlay closed.
    pub hidden: Option<ItemId>,
    /// Item whose overlay opened.
    pub shown: Option<ItemId>,
}

impl HoverChange {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_none() && self.shown.is_none()
    }
}

/// Tracks which item, if any, shows its hover overlay.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<ItemId>,
}

impl HoverTracker {
    /// Creates a tracker with no overlay open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The item whose overlay is open.
    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    /// The pointer entered `item`.
    ///
    /// Ignored while `pressed` or if `item` already shows its overlay.
    /// Otherwise any other overlay closes, and `item` opens one if its style
    /// supports hovering.
    pub fn pointer_entered(&mut self, item: ItemId, style: ItemStyle, pressed: bool) -> HoverChange {
        if pressed || self.current == Some(item) {
            return HoverChange::default();
        }

        let hidden = self.current.take();
        let shown = style.supports_hovering().then_some(item);
        self.current = shown;

        let change = HoverChange { hidden, shown };
        if !change.is_empty() {
            tracing::debug!(target: targets::HOVER, ?hidden, ?shown, "hover changed");
        }
        change
    }

    /// The pointer left the overlay of `item`.
    ///
    /// Returns `true` if that overlay was open and is now closed.
    pub fn overlay_exited(&mut self, item: ItemId) -> bool {
        if self.current != Some(item) {
            return false;
        }
        self.current = None;
        tracing::debug!(target: targets::HOVER, ?item, "overlay closed");
        true
    }

    /// Drops the overlay of a removed item without reporting it.
    pub fn forget(&mut self, item: ItemId) {
        if self.current == Some(item) {
            self.current = None;
        }
    }

    /// Drops any overlay without reporting it.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
