//! Item geometry along the sidebar axis.
//!
//! The engine never measures views. The rendering layer supplies an
//! [`ItemMetrics`] implementation that reports how tall each item is, and the
//! engine stacks items from `y = 0` in display order.

use crate::geometry::Span;
use crate::model::{Item, ItemStore};

/// Reports the extent of each item along the sidebar's main axis.
///
/// Implemented for any `Fn(&Item) -> f32` closure that is `Send + Sync`.
///
/// # Example
///
/// ```
/// use fat_sidebar::interaction::{ItemMetrics, UniformExtent};
/// use fat_sidebar::model::{ItemStore, ItemStyle};
///
/// let mut store = ItemStore::new();
/// let id = store.append("Inbox".into());
/// let item = store.get(id).unwrap();
///
/// assert_eq!(UniformExtent(64.0).extent(item), 64.0);
///
/// let by_style = |item: &fat_sidebar::model::Item| match item.style() {
///     ItemStyle::Regular => 64.0,
///     ItemStyle::Small { icon_size, padding } => icon_size + 2.0 * padding,
/// };
/// assert_eq!(by_style.extent(item), 64.0);
/// ```
pub trait ItemMetrics: Send + Sync {
    /// Height of `item`. Must be positive and finite.
    fn extent(&self, item: &Item) -> f32;
}

impl<F> ItemMetrics for F
where
    F: Fn(&Item) -> f32 + Send + Sync,
{
    fn extent(&self, item: &Item) -> f32 {
        self(item)
    }
}

/// Every item has the same extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformExtent(pub f32);

impl ItemMetrics for UniformExtent {
    fn extent(&self, _item: &Item) -> f32 {
        self.0
    }
}

/// Lays out every item in display order and returns one span per index.
pub fn stacked_spans(store: &ItemStore, metrics: &dyn ItemMetrics) -> Vec<Span> {
    let mut top = 0.0;
    store
        .iter()
        .map(|item| {
            let span = Span::new(top, metrics.extent(item));
            top = span.end();
            span
        })
        .collect()
}

/// Index of the item under `y`, if any.
pub fn index_at(store: &ItemStore, metrics: &dyn ItemMetrics, y: f32) -> Option<usize> {
    stacked_spans(store, metrics)
        .iter()
        .position(|span| span.contains(y))
}
