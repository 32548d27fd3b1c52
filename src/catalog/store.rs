use thiserror::Error;

use super::item::{Item, ItemId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Item {0} is already in the catalog")]
    Duplicate(ItemId),

    #[error("Item {0} is not in the catalog")]
    NotFound(ItemId),
}

/// In-memory, ordered view of the persisted catalog.
///
/// Insertion order is display order. Derived partitions are computed on every
/// call and never cached, so `collected()` and `remaining()` always partition
/// the current contents.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded items, rejecting duplicate ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.replace_all(items)?;
        Ok(store)
    }

    /// Replace the contents wholesale. Used only when (re)loading from storage.
    ///
    /// On a duplicate id the store is left unchanged.
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<(), StoreError> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(StoreError::Duplicate(item.id));
            }
        }
        self.items = items;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Display position of an item.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    // ========================================================================
    // Derived Queries
    // ========================================================================

    pub fn collected(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.collected).collect()
    }

    pub fn remaining(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| !item.collected).collect()
    }

    /// `(collected, remaining)` counts in a single pass.
    pub fn counts(&self) -> (usize, usize) {
        let collected = self.items.iter().filter(|item| item.collected).count();
        (collected, self.items.len() - collected)
    }

    /// First item whose volume matches. Later duplicates are unreachable by volume.
    pub fn find_by_volume(&self, volume: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.matches_volume(volume))
    }

    /// Items whose id is in `ids`, in store order.
    pub fn filter_by_ids(&self, ids: &[ItemId]) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert at `index` (clamped to the end). Used to restore an item whose
    /// delete failed to persist.
    pub fn insert(&mut self, index: usize, item: Item) -> Result<(), StoreError> {
        if self.get(item.id).is_some() {
            return Err(StoreError::Duplicate(item.id));
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    pub fn push(&mut self, item: Item) -> Result<(), StoreError> {
        let end = self.items.len();
        self.insert(end, item)
    }

    /// Flip an item's collected flag, returning the new value.
    pub fn toggle(&mut self, id: ItemId) -> Result<bool, StoreError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .map(Item::toggle)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn set_collected(&mut self, id: ItemId, collected: bool) -> Result<(), StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        item.collected = collected;
        Ok(())
    }

    /// Remove an item, returning its former position alongside it.
    pub fn remove(&mut self, id: ItemId) -> Result<(usize, Item), StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        Ok((index, self.items.remove(index)))
    }
}
