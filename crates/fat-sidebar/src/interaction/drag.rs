//! Press-and-hold drag-to-reorder.
//!
//! A press starts a session in the [`DragPhase::Pressed`] phase together with
//! a one-shot hold timer owned by the caller. If the timer fires while the
//! pointer is still down the session becomes a drag; releasing before that is
//! an ordinary click.
//!
//! ```text
//! Idle ──press──> Pressed ──hold_elapsed──> Dragging
//!  ^                 │                         │
//!  └────release──────┴────────release──────────┘
//! ```
//!
//! While dragging, the dragged item follows the pointer. Each time its centre
//! passes the midline of the neighbour in the direction of motion, the two
//! swap places in the store.

use fat_sidebar_core::TimerId;
use fat_sidebar_core::logging::targets;

use super::metrics::{ItemMetrics, stacked_spans};
use crate::geometry::Point;
use crate::model::{ItemId, ItemStore};

/// The phase of a [`DragReorderSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No pointer is down.
    #[default]
    Idle,
    /// The pointer is down and the hold threshold has not elapsed.
    Pressed,
    /// The item is being dragged.
    Dragging,
}

/// What a release means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Released before the hold threshold; treat as a click.
    Click(ItemId),
    /// A drag moved the item.
    Moved { item: ItemId, from: usize, to: usize },
    /// A drag ended where it started.
    Dropped { item: ItemId },
}

#[derive(Debug, Clone)]
struct DragState {
    item: ItemId,
    origin_index: usize,
    offset: isize,
    dragging: bool,
    timer: TimerId,
    press_pos: Point,
    last_pos: Point,
    /// Centre of the item when the drag began, resolved on the first move.
    press_centre: Option<f32>,
}

impl DragState {
    /// Where the item sits in the store now.
    fn current_index(&self) -> usize {
        self.origin_index.saturating_add_signed(self.offset)
    }

    fn rebase(&mut self, origin_index: usize, current_index: usize) {
        self.origin_index = origin_index;
        self.offset = current_index as isize - origin_index as isize;
    }
}

/// Tracks one press from pointer-down to pointer-up.
#[derive(Debug, Default)]
pub struct DragReorderSession {
    state: Option<DragState>,
}

impl DragReorderSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        match &self.state {
            None => DragPhase::Idle,
            Some(state) if state.dragging => DragPhase::Dragging,
            Some(_) => DragPhase::Pressed,
        }
    }

    /// Whether a press or drag is in progress.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the hold threshold has elapsed.
    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// The pressed or dragged item.
    pub fn item(&self) -> Option<ItemId> {
        self.state.as_ref().map(|state| state.item)
    }

    /// The hold timer of the current press.
    pub fn timer(&self) -> Option<TimerId> {
        self.state.as_ref().map(|state| state.timer)
    }

    /// Signed displacement from the origin index so far.
    pub fn offset(&self) -> isize {
        self.state.as_ref().map_or(0, |state| state.offset)
    }

    /// Starts a session for `item`, which sits at `origin_index`.
    ///
    /// `timer` is the hold timer the caller started for this press.
    pub fn press(&mut self, item: ItemId, pointer: Point, origin_index: usize, timer: TimerId) {
        if let Some(existing) = &self.state {
            debug_assert!(false, "press while a session for {:?} is active", existing.item);
            tracing::warn!(target: targets::DRAG, ?item, active = ?existing.item, "press ignored: session already active");
            return;
        }

        self.state = Some(DragState {
            item,
            origin_index,
            offset: 0,
            dragging: false,
            timer,
            press_pos: pointer,
            last_pos: pointer,
            press_centre: None,
        });
        tracing::debug!(target: targets::DRAG, ?item, origin_index, "pressed");
    }

    /// Handles the firing of a hold timer.
    ///
    /// Returns `true` if the session was pressed with `timer` and is now
    /// dragging. Timers from earlier presses are ignored.
    pub fn hold_elapsed(&mut self, timer: TimerId) -> bool {
        match &mut self.state {
            Some(state) if state.timer == timer && !state.dragging => {
                state.dragging = true;
                tracing::debug!(target: targets::DRAG, item = ?state.item, "drag started");
                true
            }
            _ => false,
        }
    }

    /// Follows the pointer.
    ///
    /// While pressed only the position is recorded. While dragging, the item
    /// moves one slot for every neighbour midline its centre crosses in the
    /// direction of motion. Returns `true` if the store order changed.
    pub fn pointer_moved(
        &mut self,
        pointer: Point,
        store: &mut ItemStore,
        metrics: &dyn ItemMetrics,
    ) -> bool {
        let Some(state) = self.state.as_mut() else {
            debug_assert!(false, "pointer moved without a session");
            tracing::warn!(target: targets::DRAG, "pointer move ignored: no session");
            return false;
        };

        let previous = std::mem::replace(&mut state.last_pos, pointer);
        if !state.dragging {
            return false;
        }

        let Some(mut index) = store.index_of(state.item) else {
            tracing::warn!(target: targets::DRAG, item = ?state.item, "dragged item is no longer in the store");
            return false;
        };

        let press_centre = match state.press_centre {
            Some(centre) => centre,
            None => {
                let spans = stacked_spans(store, metrics);
                let centre = spans[index].mid();
                state.press_centre = Some(centre);
                centre
            }
        };
        let centre = press_centre + (pointer.y - state.press_pos.y);
        let step: isize = if pointer.y > previous.y {
            1
        } else if pointer.y < previous.y {
            -1
        } else {
            return false;
        };

        let mut changed = false;
        loop {
            let spans = stacked_spans(store, metrics);
            let crossed = match step {
                1 => spans.get(index + 1).is_some_and(|next| centre > next.mid()),
                _ => index
                    .checked_sub(1)
                    .and_then(|prev| spans.get(prev))
                    .is_some_and(|prev| centre < prev.mid()),
            };
            if !crossed {
                break;
            }

            let Some(to) = store.move_by(state.item, step) else {
                break;
            };
            index = to;
            state.offset += step;
            changed = true;
            tracing::trace!(target: targets::DRAG, item = ?state.item, index, offset = state.offset, "reordered");
        }
        changed
    }

    /// Keeps the session consistent after another item left the store.
    ///
    /// `index` is the position the removed item had. The origin is tracked as
    /// a position among the other items, so it only shifts when the removed
    /// item came before it.
    pub fn item_removed_at(&mut self, index: usize) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let current = state.current_index();
        if index == current {
            debug_assert!(false, "pressed item removed without abandoning the session");
            tracing::warn!(target: targets::DRAG, item = ?state.item, "removal of the pressed item ignored");
            return;
        }

        let (current, among_others) = if index < current {
            (current - 1, index)
        } else {
            (current, index - 1)
        };
        let origin = if among_others < state.origin_index {
            state.origin_index - 1
        } else {
            state.origin_index
        };
        state.rebase(origin, current);
        tracing::trace!(target: targets::DRAG, index, origin, current, "rebased after removal");
    }

    /// Keeps the session consistent after an item was inserted at `index`.
    pub fn item_inserted_at(&mut self, index: usize) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let current = state.current_index();
        let before_item = index <= current;
        let (current, among_others) = if before_item {
            (current + 1, index)
        } else {
            (current, index - 1)
        };
        // A new item landing in the origin's slot counts as before the origin
        // only if it was also placed before the pressed item.
        let origin = if among_others < state.origin_index
            || (among_others == state.origin_index && before_item)
        {
            state.origin_index + 1
        } else {
            state.origin_index
        };
        state.rebase(origin, current);
        tracing::trace!(target: targets::DRAG, index, origin, current, "rebased after insertion");
    }

    /// Ends the session.
    ///
    /// Returns `None` if there was no session.
    pub fn release(&mut self) -> Option<ReleaseOutcome> {
        let Some(state) = self.state.take() else {
            debug_assert!(false, "release without a session");
            tracing::warn!(target: targets::DRAG, "release ignored: no session");
            return None;
        };

        let outcome = if !state.dragging {
            ReleaseOutcome::Click(state.item)
        } else if state.offset == 0 {
            ReleaseOutcome::Dropped { item: state.item }
        } else {
            ReleaseOutcome::Moved {
                item: state.item,
                from: state.origin_index,
                to: state.current_index(),
            }
        };

        tracing::debug!(target: targets::DRAG, ?outcome, "released");
        Some(outcome)
    }

    /// Ends the session without producing an outcome.
    ///
    /// Used when the press turns into a double click or the item goes away.
    /// Returns the hold timer so the caller can stop it.
    pub fn abandon(&mut self) -> Option<TimerId> {
        let state = self.state.take()?;
        tracing::debug!(target: targets::DRAG, item = ?state.item, "session abandoned");
        Some(state.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::UniformExtent;
    use crate::model::{Item, ItemConfig, ItemStyle};
    use fat_sidebar_core::TimerManager;
    use std::time::{Duration, Instant};

    const EXTENT: UniformExtent = UniformExtent(64.0);

    struct Fixture {
        store: ItemStore,
        ids: Vec<ItemId>,
        timers: TimerManager,
        session: DragReorderSession,
    }

    impl Fixture {
        fn new(titles: &[&str]) -> Self {
            let mut store = ItemStore::new();
            let ids = titles.iter().map(|&t| store.append(t.into())).collect();
            Self {
                store,
                ids,
                timers: TimerManager::new(),
                session: DragReorderSession::new(),
            }
        }

        fn press(&mut self, index: usize, y: f32) -> TimerId {
            let timer = self
                .timers
                .start_one_shot(Instant::now(), Duration::from_millis(400));
            self.session
                .press(self.ids[index], Point::new(10.0, y), index, timer);
            timer
        }

        fn start_drag(&mut self, index: usize, y: f32) {
            let timer = self.press(index, y);
            assert!(self.session.hold_elapsed(timer));
        }

        fn move_to(&mut self, y: f32) -> bool {
            self.session
                .pointer_moved(Point::new(10.0, y), &mut self.store, &EXTENT)
        }

        fn titles(&self) -> Vec<&str> {
            self.store.iter().map(Item::title).collect()
        }
    }

    #[test]
    fn test_phases() {
        let mut fx = Fixture::new(&["A"]);
        assert_eq!(fx.session.phase(), DragPhase::Idle);

        let timer = fx.press(0, 32.0);
        assert_eq!(fx.session.phase(), DragPhase::Pressed);
        assert_eq!(fx.session.timer(), Some(timer));

        assert!(fx.session.hold_elapsed(timer));
        assert_eq!(fx.session.phase(), DragPhase::Dragging);
        assert!(!fx.session.hold_elapsed(timer));

        fx.session.release();
        assert_eq!(fx.session.phase(), DragPhase::Idle);
        assert!(!fx.session.is_active());
    }

    #[test]
    fn test_release_before_threshold_is_click() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.press(1, 96.0);
        assert!(!fx.move_to(10.0));

        assert_eq!(fx.session.release(), Some(ReleaseOutcome::Click(fx.ids[1])));
        assert_eq!(fx.titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut fx = Fixture::new(&["A"]);
        let first = fx.press(0, 32.0);
        fx.session.release();

        fx.press(0, 32.0);
        assert!(!fx.session.hold_elapsed(first));
        assert_eq!(fx.session.phase(), DragPhase::Pressed);
    }

    #[test]
    fn test_drag_past_next_midline() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(0, 32.0);

        assert!(!fx.move_to(90.0));
        assert_eq!(fx.titles(), vec!["A", "B", "C"]);

        assert!(fx.move_to(100.0));
        assert_eq!(fx.titles(), vec!["B", "A", "C"]);
        assert_eq!(fx.session.offset(), 1);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Moved {
                item: fx.ids[0],
                from: 0,
                to: 1
            })
        );
    }

    #[test]
    fn test_drag_up() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(2, 160.0);

        assert!(fx.move_to(80.0));
        assert_eq!(fx.titles(), vec!["A", "C", "B"]);
        assert!(fx.move_to(20.0));
        assert_eq!(fx.titles(), vec!["C", "A", "B"]);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Moved {
                item: fx.ids[2],
                from: 2,
                to: 0
            })
        );
    }

    #[test]
    fn test_single_move_crosses_several_neighbours() {
        let mut fx = Fixture::new(&["A", "B", "C", "D"]);
        fx.start_drag(0, 32.0);

        assert!(fx.move_to(240.0));
        assert_eq!(fx.titles(), vec!["B", "C", "D", "A"]);
        assert_eq!(fx.session.offset(), 3);
    }

    #[test]
    fn test_edges_are_noops() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.start_drag(0, 32.0);
        assert!(!fx.move_to(-200.0));
        assert_eq!(fx.titles(), vec!["A", "B"]);

        assert!(fx.move_to(120.0));
        assert!(!fx.move_to(1000.0));
        assert_eq!(fx.titles(), vec!["B", "A"]);
        assert_eq!(fx.session.offset(), 1);
    }

    #[test]
    fn test_drag_back_to_origin_is_dropped() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(1, 96.0);

        assert!(fx.move_to(170.0));
        assert_eq!(fx.titles(), vec!["A", "C", "B"]);
        assert!(fx.move_to(90.0));
        assert_eq!(fx.titles(), vec!["A", "B", "C"]);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Dropped { item: fx.ids[1] })
        );
    }

    #[test]
    fn test_motion_direction_decides() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(1, 96.0);

        // Moving up while still below the previous midline changes nothing.
        assert!(!fx.move_to(80.0));
        assert!(!fx.move_to(85.0));
        assert_eq!(fx.titles(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unequal_extents() {
        let mut store = ItemStore::new();
        let big = store.append("big".into());
        store.append(ItemConfig::new("small").with_style(ItemStyle::Small {
            icon_size: 16.0,
            padding: 4.0,
        }));
        let metrics = |item: &Item| match item.style() {
            ItemStyle::Regular => 100.0,
            ItemStyle::Small { icon_size, padding } => icon_size + 2.0 * padding,
        };

        let mut timers = TimerManager::new();
        let timer = timers.start_one_shot(Instant::now(), Duration::from_millis(400));
        let mut session = DragReorderSession::new();
        session.press(big, Point::new(0.0, 50.0), 0, timer);
        session.hold_elapsed(timer);

        // Small spans 100..124, midline 112; big's centre starts at 50.
        assert!(!session.pointer_moved(Point::new(0.0, 111.0), &mut store, &metrics));
        assert!(session.pointer_moved(Point::new(0.0, 113.0), &mut store, &metrics));
        assert_eq!(store.index_of(big), Some(1));

        // Small now spans 0..24, midline 12.
        assert!(!session.pointer_moved(Point::new(0.0, 70.0), &mut store, &metrics));
        assert!(session.pointer_moved(Point::new(0.0, 11.0), &mut store, &metrics));
        assert_eq!(store.index_of(big), Some(0));
    }

    #[test]
    fn test_removal_above_rebases_origin() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(1, 96.0);
        assert!(fx.move_to(170.0));
        assert_eq!(fx.titles(), vec!["A", "C", "B"]);

        let (index, _) = fx.store.remove(fx.ids[0]).unwrap();
        fx.session.item_removed_at(index);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Moved {
                item: fx.ids[1],
                from: 0,
                to: 1
            })
        );
        assert_eq!(fx.store.index_of(fx.ids[1]), Some(1));
    }

    #[test]
    fn test_removal_below_keeps_indexes() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(0, 32.0);
        assert!(fx.move_to(100.0));

        let (index, _) = fx.store.remove(fx.ids[2]).unwrap();
        fx.session.item_removed_at(index);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Moved {
                item: fx.ids[0],
                from: 0,
                to: 1
            })
        );
    }

    #[test]
    fn test_insertion_between_origin_and_item() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(0, 32.0);
        assert!(fx.move_to(100.0));

        let x = fx.store.insert_after(fx.ids[1], "X".into()).unwrap();
        fx.session.item_inserted_at(fx.store.index_of(x).unwrap());
        assert_eq!(fx.titles(), vec!["B", "X", "A", "C"]);

        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Moved {
                item: fx.ids[0],
                from: 0,
                to: 2
            })
        );
    }

    #[test]
    fn test_insertion_next_to_resting_item() {
        let mut fx = Fixture::new(&["A", "B", "C"]);
        fx.start_drag(1, 96.0);

        let x = fx.store.insert_after(fx.ids[1], "X".into()).unwrap();
        fx.session.item_inserted_at(fx.store.index_of(x).unwrap());
        assert_eq!(fx.session.offset(), 0);

        let w = fx.store.insert_after(fx.ids[0], "W".into()).unwrap();
        fx.session.item_inserted_at(fx.store.index_of(w).unwrap());
        assert_eq!(fx.session.offset(), 0);
        assert_eq!(
            fx.session.release(),
            Some(ReleaseOutcome::Dropped { item: fx.ids[1] })
        );
    }

    #[test]
    fn test_rebase_without_session_is_noop() {
        let mut session = DragReorderSession::new();
        session.item_removed_at(0);
        session.item_inserted_at(3);
        assert_eq!(session.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_abandon_returns_timer() {
        let mut fx = Fixture::new(&["A"]);
        let timer = fx.press(0, 32.0);

        assert_eq!(fx.session.abandon(), Some(timer));
        assert!(!fx.session.is_active());
        assert_eq!(fx.session.abandon(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "release without a session")]
    fn test_release_without_session_asserts() {
        let mut session = DragReorderSession::new();
        session.release();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "press while a session")]
    fn test_double_press_asserts() {
        let mut fx = Fixture::new(&["A", "B"]);
        fx.press(0, 32.0);
        fx.press(1, 96.0);
    }
}
