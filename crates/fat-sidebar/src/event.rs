//! Domain events and their delivery to an observer.
//!
//! Every mutation that changes what the sidebar shows produces exactly one
//! [`SidebarEvent`], delivered synchronously to the registered observer
//! before the mutating call returns. There is no buffering or coalescing.
//!
//! # Example
//!
//! ```
//! use fat_sidebar::event::{EventLog, EventSink, SidebarEvent};
//!
//! let sink = EventSink::new();
//! let log = EventLog::new();
//! sink.register_observer(log.clone());
//!
//! sink.emit(SidebarEvent::Selected { index: 1 });
//! assert_eq!(log.drain(), vec![SidebarEvent::Selected { index: 1 }]);
//! ```

use std::sync::Arc;

use fat_sidebar_core::logging::targets;
use fat_sidebar_core::{ConnectionId, Signal};
use parking_lot::Mutex;

/// Something that happened to the sidebar's items.
///
/// Indexes refer to display order at the moment the event is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidebarEvent {
    /// The item became selected.
    Selected { index: usize },
    /// The item stopped being selected.
    Deselected { index: usize },
    /// The item's selection was flipped by a toggle.
    Toggled { index: usize },
    /// The item was activated.
    Pushed { index: usize },
    /// The item was moved from one position to another.
    Moved { from: usize, to: usize },
    /// The item was removed.
    Removed { index: usize },
    /// The item was double-clicked.
    DoubleClicked { index: usize },
    /// Editing the item was requested.
    EditRequested { index: usize },
    /// The item's hover overlay should be shown.
    OverlayShown { index: usize },
    /// The item's hover overlay should be dismissed.
    OverlayHidden { index: usize },
}

/// Receives sidebar events.
///
/// Implemented for any `Fn(&SidebarEvent)` closure that is `Send + Sync`.
pub trait SidebarObserver: Send + Sync + 'static {
    /// Called once per event, in emission order.
    fn on_event(&self, event: &SidebarEvent);
}

impl<F> SidebarObserver for F
where
    F: Fn(&SidebarEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &SidebarEvent) {
        self(event)
    }
}

/// Fan-out point for sidebar events with at most one observer.
pub struct EventSink {
    signal: Signal<SidebarEvent>,
    observer: Mutex<Option<ConnectionId>>,
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink {
    /// Creates a sink with no observer.
    pub fn new() -> Self {
        Self {
            signal: Signal::new(),
            observer: Mutex::new(None),
        }
    }

    /// Installs `observer`, replacing any previously registered one.
    pub fn register_observer(&self, observer: impl SidebarObserver) {
        let mut current = self.observer.lock();
        if let Some(previous) = current.take() {
            self.signal.disconnect(previous);
        }
        *current = Some(self.signal.connect(move |event| observer.on_event(event)));
    }

    /// Removes the observer. Subsequent events are dropped.
    pub fn clear_observer(&self) {
        if let Some(previous) = self.observer.lock().take() {
            self.signal.disconnect(previous);
        }
    }

    /// Whether an observer is registered.
    pub fn has_observer(&self) -> bool {
        self.observer.lock().is_some()
    }

    /// Delivers `event` to the observer, if any.
    pub fn emit(&self, event: SidebarEvent) {
        tracing::trace!(target: targets::EVENTS, ?event, "emit");
        self.signal.emit(event);
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("has_observer", &self.has_observer())
            .finish()
    }
}

/// An observer that records events for hosts that poll instead of reacting.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SidebarEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every recorded event, oldest first.
    pub fn drain(&self) -> Vec<SidebarEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Copies the recorded events without clearing them.
    pub fn snapshot(&self) -> Vec<SidebarEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl SidebarObserver for EventLog {
    fn on_event(&self, event: &SidebarEvent) {
        self.events.lock().push(*event);
    }
}

static_assertions::assert_impl_all!(EventSink: Send, Sync);
