//! Logging facilities for Fat Sidebar.
//!
//! Fat Sidebar uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("fat_sidebar::drag=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "fat_sidebar_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "fat_sidebar_core::timer";
    /// Item store mutations.
    pub const STORE: &str = "fat_sidebar::store";
    /// Selection policy decisions.
    pub const SELECTION: &str = "fat_sidebar::selection";
    /// Press, hold and drag-to-reorder gesture.
    pub const DRAG: &str = "fat_sidebar::drag";
    /// Hover overlay lifecycle.
    pub const HOVER: &str = "fat_sidebar::hover";
    /// Domain event fan-out.
    pub const EVENTS: &str = "fat_sidebar::events";
    /// Configuration loading.
    pub const CONFIG: &str = "fat_sidebar::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a unit of work such as one host event-loop tick.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "fat_sidebar::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
