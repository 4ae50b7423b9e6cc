//! The sidebar facade.
//!
//! [`Sidebar`] ties the item store, the selection policy, the drag session,
//! the hover tracker and the hold timer together behind the operations a
//! rendering layer needs. The host forwards raw pointer input and calls
//! [`Sidebar::process_timers`] from its event loop; everything the rendering
//! layer must react to arrives through the registered observer.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use fat_sidebar::event::{EventLog, SidebarEvent};
//! use fat_sidebar::geometry::Point;
//! use fat_sidebar::{Sidebar, SidebarConfig};
//!
//! let mut sidebar = Sidebar::new(SidebarConfig::default())?;
//! let log = EventLog::new();
//! sidebar.register_observer(log.clone());
//!
//! let a = sidebar.append("A".into());
//! sidebar.append("B".into());
//!
//! // Press A and hold it past the threshold, then drag it below B.
//! let start = Instant::now();
//! sidebar.on_press(a, Point::new(10.0, 32.0), start);
//! sidebar.process_timers(start + Duration::from_millis(400));
//! sidebar.on_pointer_move(Point::new(10.0, 100.0));
//! sidebar.on_release(Point::new(10.0, 100.0));
//!
//! assert_eq!(sidebar.index_of(a), Some(1));
//! assert_eq!(log.drain(), vec![SidebarEvent::Moved { from: 0, to: 1 }]);
//! # Ok::<(), fat_sidebar::SidebarError>(())
//! ```

use std::time::{Duration, Instant};

use fat_sidebar_core::logging::targets;
use fat_sidebar_core::{PerfSpan, TimerId, TimerManager};

use crate::config::SidebarConfig;
use crate::error::Result;
use crate::event::{EventSink, SidebarEvent, SidebarObserver};
use crate::geometry::{Point, Span};
use crate::interaction::{
    DragPhase, DragReorderSession, HoverTracker, ItemMetrics, ReleaseOutcome, UniformExtent,
    index_at, stacked_spans,
};
use crate::model::{
    Item, ItemConfig, ItemId, ItemStore, SelectionController, SelectionMode, SelectionPolicy,
    VisualState,
};

/// A reorderable, selectable list of icon items.
pub struct Sidebar {
    config: SidebarConfig,
    policy: SelectionPolicy,
    store: ItemStore,
    drag: DragReorderSession,
    hover: HoverTracker,
    timers: TimerManager,
    events: EventSink,
    metrics: Box<dyn ItemMetrics>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::from_valid_config(SidebarConfig::default())
    }
}

impl Sidebar {
    /// Creates an empty sidebar.
    ///
    /// Items are measured with [`UniformExtent`] of `config.item_extent`
    /// until [`with_metrics`](Self::with_metrics) installs something else.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::InvalidConfig`](crate::SidebarError::InvalidConfig)
    /// if `config` fails [`SidebarConfig::validate`].
    pub fn new(config: SidebarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SidebarConfig) -> Self {
        Self {
            policy: config.selection_policy(),
            metrics: Box::new(UniformExtent(config.item_extent)),
            config,
            store: ItemStore::new(),
            drag: DragReorderSession::new(),
            hover: HoverTracker::new(),
            timers: TimerManager::new(),
            events: EventSink::new(),
        }
    }

    /// Replaces the item metrics.
    pub fn with_metrics(mut self, metrics: impl ItemMetrics + 'static) -> Self {
        self.set_metrics(metrics);
        self
    }

    /// Replaces the item metrics.
    pub fn set_metrics(&mut self, metrics: impl ItemMetrics + 'static) {
        self.metrics = Box::new(metrics);
    }

    /// The configuration the sidebar was created with.
    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    // =========================================================================
    // Selection Mode
    // =========================================================================

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.policy.mode
    }

    /// Changes the selection mode.
    ///
    /// The current selection is kept as is; the new mode applies from the
    /// next selection change.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.policy.mode != mode {
            tracing::debug!(target: targets::SELECTION, from = ?self.policy.mode, to = ?mode, "selection mode changed");
            self.policy.mode = mode;
        }
    }

    /// The full selection policy.
    pub fn selection_policy(&self) -> SelectionPolicy {
        self.policy
    }

    // =========================================================================
    // Observer
    // =========================================================================

    /// Installs the observer, replacing any previous one.
    pub fn register_observer(&self, observer: impl SidebarObserver) {
        self.events.register_observer(observer);
    }

    /// Removes the observer.
    pub fn clear_observer(&self) {
        self.events.clear_observer();
    }

    // =========================================================================
    // Item Queries
    // =========================================================================

    /// The underlying store.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether `id` refers to an item of this sidebar.
    pub fn contains(&self, id: ItemId) -> bool {
        self.store.contains(id)
    }

    /// Looks up an item.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    /// Looks up an item to change its title, icon or style.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.store.get_mut(id)
    }

    /// The item at `index`.
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        self.store.item_at(index)
    }

    /// Position of an item.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.store.index_of(id)
    }

    /// Items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.store.iter()
    }

    /// How the rendering layer should draw an item.
    pub fn visual_state(&self, id: ItemId) -> Option<VisualState> {
        self.store.get(id).map(Item::visual_state)
    }

    /// Layout of every item, top to bottom.
    pub fn item_spans(&self) -> Vec<Span> {
        stacked_spans(&self.store, self.metrics.as_ref())
    }

    /// Index of the item under `y`, for hit testing.
    pub fn index_at(&self, y: f32) -> Option<usize> {
        index_at(&self.store, self.metrics.as_ref(), y)
    }

    // =========================================================================
    // Item Mutation
    // =========================================================================

    /// Adds an item at the end.
    pub fn append(&mut self, config: ItemConfig) -> ItemId {
        let id = self.store.append(config);
        self.drag.item_inserted_at(self.store.len() - 1);
        id
    }

    /// Inserts an item right after `anchor`. Returns `None` if `anchor` is
    /// unknown.
    pub fn insert_after(&mut self, anchor: ItemId, config: ItemConfig) -> Option<ItemId> {
        let id = self.store.insert_after(anchor, config)?;
        if let Some(index) = self.store.index_of(id) {
            self.drag.item_inserted_at(index);
        }
        Some(id)
    }

    /// Removes an item and emits `Removed`.
    ///
    /// A press or drag on the item ends without an outcome and its overlay
    /// goes away silently. Returns `None` if the item is unknown.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        if self.drag.item() == Some(id) {
            self.abandon_press();
        }
        self.hover.forget(id);

        let (index, item) = self.store.remove(id)?;
        self.drag.item_removed_at(index);
        self.events.emit(SidebarEvent::Removed { index });
        Some(item)
    }

    /// Removes every item and returns them in their prior order.
    ///
    /// Emits one `Removed` per item, last index first, so every reported
    /// index is valid at the time it is emitted.
    pub fn remove_all(&mut self) -> Vec<Item> {
        self.abandon_press();
        self.hover.clear();

        let items = self.store.remove_all();
        for index in (0..items.len()).rev() {
            self.events.emit(SidebarEvent::Removed { index });
        }
        items
    }

    /// Moves an item by `offset` positions, clamped to the ends.
    ///
    /// Emits `Moved` if the index changed. Moving the pressed item ends the
    /// press without an outcome. Returns the new index, or `None` if the item
    /// is unknown.
    pub fn move_item(&mut self, id: ItemId, offset: isize) -> Option<usize> {
        let from = self.store.index_of(id)?;
        if self.drag.item() == Some(id) {
            self.abandon_press();
        }
        let to = self.store.move_by(id, offset)?;
        if from != to {
            self.drag.item_removed_at(from);
            self.drag.item_inserted_at(to);
            self.events.emit(SidebarEvent::Moved { from, to });
        }
        Some(to)
    }

    /// Emits `EditRequested` for an item. Returns `false` if it is unknown.
    pub fn request_edit(&mut self, id: ItemId) -> bool {
        let Some(index) = self.store.index_of(id) else {
            return false;
        };
        self.events.emit(SidebarEvent::EditRequested { index });
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// A selection controller over this sidebar's items.
    pub fn selection(&mut self) -> SelectionController<'_> {
        SelectionController::new(&mut self.store, &self.events, self.policy)
    }

    /// See [`SelectionController::select`].
    pub fn select(&mut self, id: ItemId) -> bool {
        self.selection().select(id)
    }

    /// See [`SelectionController::select_at`].
    pub fn select_at(&mut self, index: usize) -> bool {
        self.selection().select_at(index)
    }

    /// See [`SelectionController::deselect`].
    pub fn deselect(&mut self, id: ItemId) -> bool {
        self.selection().deselect(id)
    }

    /// See [`SelectionController::deselect_all`].
    pub fn deselect_all(&mut self) {
        self.selection().deselect_all();
    }

    /// See [`SelectionController::toggle`].
    pub fn toggle(&mut self, id: ItemId) -> bool {
        self.selection().toggle(id)
    }

    /// See [`SelectionController::push`].
    pub fn push(&mut self, id: ItemId) -> bool {
        self.selection().push(id)
    }

    /// First selected item in display order.
    pub fn selected_item(&self) -> Option<&Item> {
        self.store.selected_item()
    }

    /// All selected items in display order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.store.selected_items()
    }

    /// Indexes of all selected items.
    pub fn selected_indexes(&self) -> Vec<usize> {
        self.store.selected_indexes()
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Current phase of the press gesture.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// The pointer went down on `item` at time `now`.
    ///
    /// Highlights the item and starts the hold timer. Returns `false` if the
    /// item is unknown or another press is still in progress.
    pub fn on_press(&mut self, item: ItemId, pointer: Point, now: Instant) -> bool {
        let Some(index) = self.store.index_of(item) else {
            return false;
        };
        if self.drag.is_active() {
            tracing::warn!(target: targets::DRAG, ?item, "press ignored: previous press not released");
            return false;
        }

        self.set_highlighted(item, true);
        let timer = self.timers.start_one_shot(now, self.config.hold_threshold());
        self.drag.press(item, pointer, index, timer);
        true
    }

    /// The pointer moved while a button is down.
    ///
    /// Returns `true` if a drag reordered the items; the rendering layer
    /// should lay them out again. Moves with no press in progress are
    /// ignored.
    pub fn on_pointer_move(&mut self, pointer: Point) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        self.drag
            .pointer_moved(pointer, &mut self.store, self.metrics.as_ref())
    }

    /// The pointer went up.
    ///
    /// Clears the highlight and stops the hold timer. A release before the
    /// threshold is a click and goes through the selection mode; a release
    /// after a drag that changed the order emits `Moved`. Returns `None` if
    /// no press was in progress.
    pub fn on_release(&mut self, pointer: Point) -> Option<ReleaseOutcome> {
        let (Some(item), Some(timer)) = (self.drag.item(), self.drag.timer()) else {
            tracing::trace!(target: targets::DRAG, "release without press");
            return None;
        };

        if self.drag.is_dragging() {
            self.on_pointer_move(pointer);
        }
        self.stop_timer(timer);
        self.set_highlighted(item, false);

        let outcome = self.drag.release()?;
        match outcome {
            ReleaseOutcome::Click(item) => {
                self.selection().click(item);
            }
            ReleaseOutcome::Moved { from, to, .. } => {
                self.events.emit(SidebarEvent::Moved { from, to });
            }
            ReleaseOutcome::Dropped { .. } => {}
        }
        Some(outcome)
    }

    /// The second click of a double click landed on `item`.
    ///
    /// Ends the pending press without a click or drag and emits
    /// `DoubleClicked`. Returns `false` if the item is unknown.
    pub fn on_double_click(&mut self, item: ItemId) -> bool {
        self.abandon_press();

        let Some(index) = self.store.index_of(item) else {
            return false;
        };
        self.events.emit(SidebarEvent::DoubleClicked { index });
        true
    }

    /// The pointer entered `item`.
    ///
    /// Opens the item's hover overlay if its style has one, closing any
    /// other. Nothing happens while a press is in progress. Returns `true` if
    /// an overlay opened or closed.
    pub fn on_pointer_enter(&mut self, item: ItemId) -> bool {
        let Some(style) = self.store.get(item).map(Item::style) else {
            return false;
        };

        let change = self
            .hover
            .pointer_entered(item, style, self.drag.is_active());
        if let Some(index) = change.hidden.and_then(|id| self.store.index_of(id)) {
            self.events.emit(SidebarEvent::OverlayHidden { index });
        }
        if let Some(index) = change.shown.and_then(|id| self.store.index_of(id)) {
            self.events.emit(SidebarEvent::OverlayShown { index });
        }
        !change.is_empty()
    }

    /// The pointer left the hover overlay of `item`.
    ///
    /// Returns `true` if that overlay was open.
    pub fn on_overlay_exit(&mut self, item: ItemId) -> bool {
        if !self.hover.overlay_exited(item) {
            return false;
        }
        if let Some(index) = self.store.index_of(item) {
            self.events.emit(SidebarEvent::OverlayHidden { index });
        }
        true
    }

    /// The item whose hover overlay is open.
    pub fn hovered_item(&self) -> Option<ItemId> {
        self.hover.current()
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fires every timer due at `now`.
    ///
    /// Returns `true` if a press turned into a drag.
    pub fn process_timers(&mut self, now: Instant) -> bool {
        let _perf = PerfSpan::new("sidebar::process_timers");

        let mut started = false;
        for timer in self.timers.process_expired(now) {
            started |= self.drag.hold_elapsed(timer);
        }
        started
    }

    /// Time until the next timer is due, for the host's event loop timeout.
    pub fn time_until_next_timer(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_highlighted(&mut self, id: ItemId, highlighted: bool) {
        if let Some(item) = self.store.get_mut(id) {
            item.set_highlighted(highlighted);
        }
    }

    fn stop_timer(&mut self, timer: TimerId) {
        // Fired timers are already gone.
        if self.timers.is_active(timer) {
            let _ = self.timers.stop(timer);
        }
    }

    fn abandon_press(&mut self) {
        let item = self.drag.item();
        if let Some(timer) = self.drag.abandon() {
            self.stop_timer(timer);
        }
        if let Some(item) = item {
            self.set_highlighted(item, false);
        }
    }
}

impl std::fmt::Debug for Sidebar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sidebar")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("store", &self.store)
            .field("drag", &self.drag)
            .field("hover", &self.hover)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Sidebar: Send, Sync);
