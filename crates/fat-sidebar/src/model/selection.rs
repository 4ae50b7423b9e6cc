//! Selection policy for sidebar items.
//!
//! This module provides [`SelectionController`], which applies a
//! [`SelectionMode`] on top of an [`ItemStore`] and reports every change
//! through an [`EventSink`].
//!
//! # Example
//!
//! ```
//! use fat_sidebar::event::{EventLog, EventSink, SidebarEvent};
//! use fat_sidebar::model::{ItemStore, SelectionController, SelectionMode, SelectionPolicy};
//!
//! let mut store = ItemStore::new();
//! let a = store.append("A".into());
//! let b = store.append("B".into());
//!
//! let sink = EventSink::new();
//! let log = EventLog::new();
//! sink.register_observer(log.clone());
//!
//! let policy = SelectionPolicy::new(SelectionMode::ToggleMany);
//! let mut selection = SelectionController::new(&mut store, &sink, policy);
//! selection.toggle(a);
//! selection.toggle(b);
//! assert_eq!(selection.selected_indexes(), vec![0, 1]);
//! assert_eq!(log.len(), 4);
//! ```

use fat_sidebar_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};
use super::store::ItemStore;
use crate::event::{EventSink, SidebarEvent};

/// How a click on an item affects the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Clicks only activate; the selection is left alone.
    Push,
    /// A click selects the item and deselects every other item (default).
    #[default]
    SelectOne,
    /// A click flips the item; at most one item is selected.
    ToggleOne,
    /// A click flips the item; any subset may be selected.
    ToggleMany,
}

impl SelectionMode {
    /// Whether more than one item may be selected at a time.
    pub fn allows_multiple(self) -> bool {
        matches!(self, Self::ToggleMany)
    }
}

/// When peers are deselected relative to the target of a single-selection
/// toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerDeselection {
    /// Peers are deselected before the target flips (default).
    #[default]
    BeforeTarget,
    /// Peers are deselected after the target flips.
    AfterTarget,
}

/// Selection settings read on every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPolicy {
    /// Selection mode.
    pub mode: SelectionMode,
    /// Ordering of forced peer deselection in single-selection toggles.
    pub peer_deselection: PeerDeselection,
}

impl SelectionPolicy {
    /// Creates a policy with the given mode and the default peer ordering.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            peer_deselection: PeerDeselection::default(),
        }
    }

    /// Sets the peer ordering.
    pub fn with_peer_deselection(mut self, peer_deselection: PeerDeselection) -> Self {
        self.peer_deselection = peer_deselection;
        self
    }
}

/// Applies a [`SelectionPolicy`] to the items of a store.
///
/// The controller borrows the store for the duration of a batch of
/// operations. Every method that changes a selection flag emits the matching
/// event before returning.
pub struct SelectionController<'a> {
    store: &'a mut ItemStore,
    sink: &'a EventSink,
    policy: SelectionPolicy,
}

impl<'a> SelectionController<'a> {
    /// Creates a controller over `store` reporting to `sink`.
    pub fn new(store: &'a mut ItemStore, sink: &'a EventSink, policy: SelectionPolicy) -> Self {
        Self {
            store,
            sink,
            policy,
        }
    }

    /// The policy in effect.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// First selected item in display order.
    pub fn selected_item(&self) -> Option<&Item> {
        self.store.selected_item()
    }

    /// All selected items in display order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.store.selected_items()
    }

    /// Indexes of all selected items in display order.
    pub fn selected_indexes(&self) -> Vec<usize> {
        self.store.selected_indexes()
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Selects an item.
    ///
    /// Returns `false` if the item is not in the store. Unless the mode
    /// allows multiple selection, every other selected item is deselected
    /// first. `Selected` is emitted even if the item already was selected.
    pub fn select(&mut self, id: ItemId) -> bool {
        let Some(index) = self.store.index_of(id) else {
            return false;
        };

        if !self.policy.mode.allows_multiple() {
            self.deselect_peers(id);
        }
        self.set_flag(id, true);
        self.sink.emit(SidebarEvent::Selected { index });

        tracing::debug!(target: targets::SELECTION, index, mode = ?self.policy.mode, "selected");
        true
    }

    /// Selects the item at `index`. Returns `false` if out of range.
    pub fn select_at(&mut self, index: usize) -> bool {
        match self.store.id_at(index) {
            Some(id) => self.select(id),
            None => false,
        }
    }

    /// Deselects an item.
    ///
    /// Returns `false`, emitting nothing, if the item is unknown or was not
    /// selected.
    pub fn deselect(&mut self, id: ItemId) -> bool {
        let Some(index) = self.store.index_of(id) else {
            return false;
        };
        if !self.is_selected(id) {
            return false;
        }

        self.set_flag(id, false);
        self.sink.emit(SidebarEvent::Deselected { index });
        true
    }

    /// Deselects every selected item, one `Deselected` each in display order.
    pub fn deselect_all(&mut self) {
        for index in self.store.selected_indexes() {
            if let Some(id) = self.store.id_at(index) {
                self.set_flag(id, false);
                self.sink.emit(SidebarEvent::Deselected { index });
            }
        }
    }

    /// Flips an item's selection.
    ///
    /// Returns `false` if the item is unknown. In single-selection modes the
    /// other selected items are deselected, before or after the target as
    /// the policy's [`PeerDeselection`] says. The target emits `Selected` or
    /// `Deselected`, followed by `Toggled`.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        let Some(index) = self.store.index_of(id) else {
            return false;
        };
        let single = !self.policy.mode.allows_multiple();

        if single && self.policy.peer_deselection == PeerDeselection::BeforeTarget {
            self.deselect_peers(id);
        }

        let selected = !self.is_selected(id);
        self.set_flag(id, selected);
        self.sink.emit(if selected {
            SidebarEvent::Selected { index }
        } else {
            SidebarEvent::Deselected { index }
        });
        self.sink.emit(SidebarEvent::Toggled { index });

        if single && self.policy.peer_deselection == PeerDeselection::AfterTarget {
            self.deselect_peers(id);
        }

        tracing::debug!(target: targets::SELECTION, index, selected, "toggled");
        true
    }

    /// Emits `Pushed` for an item without touching the selection.
    ///
    /// Returns `false` if the item is unknown.
    pub fn push(&mut self, id: ItemId) -> bool {
        let Some(index) = self.store.index_of(id) else {
            return false;
        };
        self.sink.emit(SidebarEvent::Pushed { index });
        true
    }

    /// Handles a plain click on an item according to the selection mode.
    ///
    /// | Mode | Effect |
    /// |---|---|
    /// | `Push` | push |
    /// | `SelectOne` | select, then push |
    /// | `ToggleOne` | toggle (single), then push |
    /// | `ToggleMany` | toggle (multiple), then push |
    ///
    /// Returns `false` if the item is unknown.
    pub fn click(&mut self, id: ItemId) -> bool {
        if !self.store.contains(id) {
            return false;
        }

        match self.policy.mode {
            SelectionMode::Push => {}
            SelectionMode::SelectOne => {
                self.select(id);
            }
            SelectionMode::ToggleOne | SelectionMode::ToggleMany => {
                self.toggle(id);
            }
        }
        self.push(id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn is_selected(&self, id: ItemId) -> bool {
        self.store.get(id).is_some_and(Item::is_selected)
    }

    fn set_flag(&mut self, id: ItemId, selected: bool) {
        if let Some(item) = self.store.get_mut(id) {
            item.set_selected(selected);
        }
    }

    fn deselect_peers(&mut self, keep: ItemId) {
        for index in self.store.selected_indexes() {
            match self.store.id_at(index) {
                Some(id) if id != keep => {
                    self.set_flag(id, false);
                    self.sink.emit(SidebarEvent::Deselected { index });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;

    struct Fixture {
        store: ItemStore,
        sink: EventSink,
        log: EventLog,
        ids: Vec<ItemId>,
    }

    impl Fixture {
        fn new(count: usize) -> Self {
            let mut store = ItemStore::new();
            let ids = (0..count)
                .map(|i| store.append(i.to_string().into()))
                .collect();
            let sink = EventSink::new();
            let log = EventLog::new();
            sink.register_observer(log.clone());
            Self {
                store,
                sink,
                log,
                ids,
            }
        }

        fn controller(&mut self, mode: SelectionMode) -> SelectionController<'_> {
            SelectionController::new(&mut self.store, &self.sink, SelectionPolicy::new(mode))
        }

        fn selected(&self) -> Vec<ItemId> {
            self.store.selected_items().iter().map(|item| item.id()).collect()
        }
    }

    fn unknown_id() -> ItemId {
        ItemId::default()
    }

    #[test]
    fn test_select_unknown_item() {
        let mut fx = Fixture::new(1);
        assert!(!fx.controller(SelectionMode::SelectOne).select(unknown_id()));
        assert!(fx.selected().is_empty());
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_select_one_replaces_selection() {
        let mut fx = Fixture::new(3);
        let (b, c) = (fx.ids[1], fx.ids[2]);

        let mut selection = fx.controller(SelectionMode::SelectOne);
        assert!(selection.select(b));
        assert_eq!(selection.selected_item().map(Item::id), Some(b));
        assert!(selection.select(c));
        assert_eq!(selection.selected_item().map(Item::id), Some(c));

        assert!(!fx.store.get(b).unwrap().is_selected());
        assert_eq!(
            fx.log.drain(),
            vec![
                SidebarEvent::Selected { index: 1 },
                SidebarEvent::Deselected { index: 1 },
                SidebarEvent::Selected { index: 2 },
            ]
        );
    }

    #[test]
    fn test_select_in_toggle_many_keeps_others() {
        let mut fx = Fixture::new(3);
        let ids = fx.ids.clone();

        let mut selection = fx.controller(SelectionMode::ToggleMany);
        selection.select(ids[0]);
        selection.select(ids[2]);

        assert_eq!(fx.selected(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_select_at() {
        let mut fx = Fixture::new(2);
        let mut selection = fx.controller(SelectionMode::SelectOne);
        assert!(selection.select_at(1));
        assert!(!selection.select_at(2));
        assert_eq!(selection.selected_indexes(), vec![1]);
    }

    #[test]
    fn test_deselect_never_selected_emits_nothing() {
        let mut fx = Fixture::new(2);
        let a = fx.ids[0];

        assert!(!fx.controller(SelectionMode::SelectOne).deselect(a));
        assert!(!fx.controller(SelectionMode::SelectOne).deselect(unknown_id()));
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_deselect_only_target() {
        let mut fx = Fixture::new(2);
        let (a, b) = (fx.ids[0], fx.ids[1]);

        let mut selection = fx.controller(SelectionMode::ToggleMany);
        selection.select(a);
        selection.select(b);
        assert!(selection.deselect(a));

        assert_eq!(fx.selected(), vec![b]);
        assert_eq!(fx.log.drain().last(), Some(&SidebarEvent::Deselected { index: 0 }));
    }

    #[test]
    fn test_deselect_all() {
        let mut fx = Fixture::new(4);
        let ids = fx.ids.clone();

        let mut selection = fx.controller(SelectionMode::ToggleMany);
        selection.toggle(ids[1]);
        selection.toggle(ids[3]);
        fx.log.drain();

        fx.controller(SelectionMode::ToggleMany).deselect_all();

        assert!(fx.selected().is_empty());
        assert_eq!(
            fx.log.drain(),
            vec![
                SidebarEvent::Deselected { index: 1 },
                SidebarEvent::Deselected { index: 3 },
            ]
        );
    }

    #[test]
    fn test_toggle_many_scenario() {
        let mut fx = Fixture::new(2);
        let (a, b) = (fx.ids[0], fx.ids[1]);

        fx.controller(SelectionMode::ToggleMany).toggle(a);
        assert_eq!(fx.selected(), vec![a]);
        fx.controller(SelectionMode::ToggleMany).toggle(b);
        assert_eq!(fx.selected(), vec![a, b]);
        fx.controller(SelectionMode::ToggleMany).toggle(a);
        assert_eq!(fx.selected(), vec![b]);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut fx = Fixture::new(3);
        let ids = fx.ids.clone();

        let mut selection = fx.controller(SelectionMode::ToggleMany);
        selection.toggle(ids[2]);
        let before: Vec<usize> = selection.selected_indexes();

        selection.toggle(ids[0]);
        selection.toggle(ids[0]);
        assert_eq!(selection.selected_indexes(), before);
    }

    #[test]
    fn test_toggle_events() {
        let mut fx = Fixture::new(2);
        let a = fx.ids[0];

        let mut selection = fx.controller(SelectionMode::ToggleMany);
        selection.toggle(a);
        selection.toggle(a);

        assert_eq!(
            fx.log.drain(),
            vec![
                SidebarEvent::Selected { index: 0 },
                SidebarEvent::Toggled { index: 0 },
                SidebarEvent::Deselected { index: 0 },
                SidebarEvent::Toggled { index: 0 },
            ]
        );
    }

    #[test]
    fn test_toggle_one_deselects_peers_first() {
        let mut fx = Fixture::new(2);
        let (a, b) = (fx.ids[0], fx.ids[1]);

        let mut selection = fx.controller(SelectionMode::ToggleOne);
        selection.toggle(a);
        selection.toggle(b);

        assert_eq!(fx.selected(), vec![b]);
        assert_eq!(
            fx.log.drain(),
            vec![
                SidebarEvent::Selected { index: 0 },
                SidebarEvent::Toggled { index: 0 },
                SidebarEvent::Deselected { index: 0 },
                SidebarEvent::Selected { index: 1 },
                SidebarEvent::Toggled { index: 1 },
            ]
        );
    }

    #[test]
    fn test_toggle_one_peers_after_target() {
        let mut fx = Fixture::new(2);
        let (a, b) = (fx.ids[0], fx.ids[1]);
        let policy = SelectionPolicy::new(SelectionMode::ToggleOne)
            .with_peer_deselection(PeerDeselection::AfterTarget);

        let mut selection = SelectionController::new(&mut fx.store, &fx.sink, policy);
        selection.toggle(a);
        selection.toggle(b);

        assert_eq!(fx.selected(), vec![b]);
        assert_eq!(
            fx.log.drain()[2..],
            [
                SidebarEvent::Selected { index: 1 },
                SidebarEvent::Toggled { index: 1 },
                SidebarEvent::Deselected { index: 0 },
            ]
        );
    }

    #[test]
    fn test_single_modes_never_exceed_one() {
        for mode in [SelectionMode::SelectOne, SelectionMode::ToggleOne] {
            let mut fx = Fixture::new(4);
            let ids = fx.ids.clone();
            let script = [0, 2, 2, 1, 3, 3, 0, 1, 2, 0];

            for (step, &i) in script.iter().enumerate() {
                let mut selection = fx.controller(mode);
                if step % 3 == 0 {
                    selection.select(ids[i]);
                } else {
                    selection.toggle(ids[i]);
                }
                assert!(selection.selected_items().len() <= 1, "{mode:?} step {step}");
            }
        }
    }

    #[test]
    fn test_push_does_not_change_selection() {
        let mut fx = Fixture::new(2);
        let a = fx.ids[0];

        assert!(fx.controller(SelectionMode::Push).push(a));
        assert!(fx.selected().is_empty());
        assert_eq!(fx.log.drain(), vec![SidebarEvent::Pushed { index: 0 }]);
        assert!(!fx.controller(SelectionMode::Push).push(unknown_id()));
    }

    #[test]
    fn test_click_dispatch_by_mode() {
        let cases = [
            (SelectionMode::Push, vec![SidebarEvent::Pushed { index: 1 }]),
            (
                SelectionMode::SelectOne,
                vec![
                    SidebarEvent::Selected { index: 1 },
                    SidebarEvent::Pushed { index: 1 },
                ],
            ),
            (
                SelectionMode::ToggleOne,
                vec![
                    SidebarEvent::Selected { index: 1 },
                    SidebarEvent::Toggled { index: 1 },
                    SidebarEvent::Pushed { index: 1 },
                ],
            ),
            (
                SelectionMode::ToggleMany,
                vec![
                    SidebarEvent::Selected { index: 1 },
                    SidebarEvent::Toggled { index: 1 },
                    SidebarEvent::Pushed { index: 1 },
                ],
            ),
        ];

        for (mode, expected) in cases {
            let mut fx = Fixture::new(2);
            let b = fx.ids[1];
            assert!(fx.controller(mode).click(b));
            assert_eq!(fx.log.drain(), expected, "{mode:?}");
        }
    }

    #[test]
    fn test_click_unknown_item() {
        let mut fx = Fixture::new(1);
        assert!(!fx.controller(SelectionMode::SelectOne).click(unknown_id()));
        assert!(fx.log.is_empty());
    }
}
