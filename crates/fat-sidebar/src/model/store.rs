//! Ordered item collection.
//!
//! [`ItemStore`] owns every [`Item`] in an arena keyed by [`ItemId`] and keeps
//! a separate order vector. The order is the display order and the source of
//! truth for drag reordering; only the mutating methods here change it.

use fat_sidebar_core::logging::targets;
use slotmap::SlotMap;

use super::item::{Item, ItemConfig, ItemId};

/// Ordered collection of sidebar items.
///
/// All lookups are safe: unknown ids and out-of-range indexes yield `None`
/// instead of panicking.
///
/// # Example
///
/// ```
/// use fat_sidebar::model::ItemStore;
///
/// let mut store = ItemStore::new();
/// let inbox = store.append("Inbox".into());
/// let sent = store.append("Sent".into());
///
/// assert_eq!(store.index_of(sent), Some(1));
/// store.move_by(sent, -1);
/// assert_eq!(store.id_at(0), Some(sent));
/// assert_eq!(store.id_at(1), Some(inbox));
/// ```
#[derive(Debug, Default)]
pub struct ItemStore {
    items: SlotMap<ItemId, Item>,
    order: Vec<ItemId>,
}

impl ItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` refers to an item in this store.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Looks up an item by identity.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Looks up an item by identity for editing its display attributes.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// Position of an item in display order.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.order.iter().position(|&candidate| candidate == id)
    }

    /// Identity of the item at `index`.
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.order.get(index).copied()
    }

    /// The item at `index`.
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        self.id_at(index).and_then(|id| self.items.get(id))
    }

    /// Item identities in display order.
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|&id| self.items.get(id))
    }

    /// First selected item in display order.
    pub fn selected_item(&self) -> Option<&Item> {
        self.iter().find(|item| item.is_selected())
    }

    /// All selected items in display order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.iter().filter(|item| item.is_selected()).collect()
    }

    /// Indexes of all selected items, parallel to [`selected_items`](Self::selected_items).
    pub fn selected_indexes(&self) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, item)| item.is_selected())
            .map(|(index, _)| index)
            .collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds an item at the end and returns its identity.
    pub fn append(&mut self, config: ItemConfig) -> ItemId {
        let index = self.order.len();
        self.insert_at(index, config)
    }

    /// Inserts an item directly after `anchor`.
    ///
    /// Returns `None` without inserting anything if `anchor` is unknown.
    pub fn insert_after(&mut self, anchor: ItemId, config: ItemConfig) -> Option<ItemId> {
        let anchor_index = self.index_of(anchor)?;
        Some(self.insert_at(anchor_index + 1, config))
    }

    fn insert_at(&mut self, index: usize, config: ItemConfig) -> ItemId {
        let id = self
            .items
            .insert_with_key(|id| Item::from_config(id, config));
        // Keys are minted here, so the order vector can never hold a duplicate.
        debug_assert!(!self.order.contains(&id), "duplicate item identity {id:?}");
        self.order.insert(index, id);

        tracing::debug!(target: targets::STORE, ?id, index, "item inserted");
        id
    }

    /// Removes an item.
    ///
    /// Returns the index it occupied and the item record, or `None` if the
    /// item was not part of the store.
    pub fn remove(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let index = self.index_of(id)?;
        self.order.remove(index);
        let item = self.items.remove(id)?;

        tracing::debug!(target: targets::STORE, ?id, index, "item removed");
        Some((index, item))
    }

    /// Removes every item and returns them in their prior display order.
    pub fn remove_all(&mut self) -> Vec<Item> {
        let order = std::mem::take(&mut self.order);
        let removed: Vec<Item> = order
            .into_iter()
            .filter_map(|id| self.items.remove(id))
            .collect();
        debug_assert!(self.items.is_empty());

        tracing::debug!(target: targets::STORE, count = removed.len(), "all items removed");
        removed
    }

    /// Moves an item by `offset` positions.
    ///
    /// The item is taken out and reinserted at `original + offset`, clamped to
    /// the valid range, so moving past either end stops at that end. Returns
    /// the new index, or `None` (and changes nothing) if the item is unknown.
    pub fn move_by(&mut self, id: ItemId, offset: isize) -> Option<usize> {
        let from = self.index_of(id)?;
        self.order.remove(from);

        let target = from as isize + offset;
        let to = target.clamp(0, self.order.len() as isize) as usize;
        self.order.insert(to, id);

        tracing::trace!(target: targets::STORE, ?id, from, to, "item moved");
        Some(to)
    }
}
