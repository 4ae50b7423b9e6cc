//! Core systems for Fat Sidebar.
//!
//! This crate provides the foundation the sidebar engine is built on:
//!
//! - **Signal/Slot System**: Synchronous fan-out of notifications to callbacks
//! - **Timers**: One-shot timers driven by a caller-supplied clock
//! - **Logging**: `tracing` targets shared by every subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use fat_sidebar_core::Signal;
//!
//! let item_selected = Signal::<usize>::new();
//!
//! let conn_id = item_selected.connect(|index| {
//!     println!("Item {} selected", index);
//! });
//!
//! item_selected.emit(2);
//! item_selected.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use fat_sidebar_core::TimerManager;
//! use std::time::{Duration, Instant};
//!
//! let mut timers = TimerManager::new();
//! let start = Instant::now();
//! let hold = timers.start_one_shot(start, Duration::from_millis(400));
//!
//! assert!(timers.process_expired(start).is_empty());
//! assert_eq!(timers.process_expired(start + Duration::from_millis(400)), vec![hold]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{TimerError, TimerResult};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
