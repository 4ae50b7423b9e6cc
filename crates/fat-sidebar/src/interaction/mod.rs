//! Pointer interaction: press-and-hold reordering and hover overlays.
//!
//! The types here are driven by discrete pointer events forwarded from the
//! rendering layer. None of them block or run their own event loop; the hold
//! threshold is a one-shot timer the host fires through
//! [`Sidebar::process_timers`](crate::Sidebar::process_timers).

mod drag;
mod hover;
mod metrics;

pub use drag::{DragPhase, DragReorderSession, ReleaseOutcome};
pub use hover::{HoverChange, HoverTracker};
pub use metrics::{ItemMetrics, UniformExtent, index_at, stacked_spans};
