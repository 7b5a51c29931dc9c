//! Per-session memoization of catalog calls.
//!
//! [`MemoCache`] is owned by one [`CatalogClient`](crate::CatalogClient) and
//! lives exactly as long as the session. Values are immutable once stored;
//! only successful lookups are recorded, so a failed call is retried the next
//! time it is asked for.
//!
//! Lookups clone out of the map and never hand out guards, so no lock is held
//! across an `.await`.

use std::sync::Arc;

use bv_core::SetMetadata;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::client::Inventory;

/// Read-through cache keyed by call arguments.
#[derive(Debug, Default)]
pub struct MemoCache {
    metadata: Mutex<FxHashMap<String, SetMetadata>>,
    themes: Mutex<FxHashMap<u32, String>>,
    inventories: Mutex<FxHashMap<String, Arc<Inventory>>>,
}

impl MemoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached metadata for `set_num`.
    #[must_use]
    pub fn metadata(&self, set_num: &str) -> Option<SetMetadata> {
        self.metadata.lock().get(set_num).cloned()
    }

    /// Stores metadata under the set id it was requested with.
    pub fn insert_metadata(&self, set_num: &str, metadata: SetMetadata) {
        self.metadata.lock().insert(set_num.to_owned(), metadata);
    }

    /// Returns a cached theme name.
    #[must_use]
    pub fn theme(&self, theme_id: u32) -> Option<String> {
        self.themes.lock().get(&theme_id).cloned()
    }

    /// Stores a theme name.
    pub fn insert_theme(&self, theme_id: u32, name: String) {
        self.themes.lock().insert(theme_id, name);
    }

    /// Returns a cached inventory.
    #[must_use]
    pub fn inventory(&self, set_num: &str) -> Option<Arc<Inventory>> {
        self.inventories.lock().get(set_num).map(Arc::clone)
    }

    /// Stores an inventory and returns the shared handle.
    pub fn insert_inventory(&self, set_num: &str, inventory: Inventory) -> Arc<Inventory> {
        let inventory = Arc::new(inventory);
        self.inventories
            .lock()
            .insert(set_num.to_owned(), Arc::clone(&inventory));
        inventory
    }

    /// Forgets everything cached for `set_num`.
    ///
    /// Theme names are shared between sets and kept.
    pub fn invalidate_set(&self, set_num: &str) -> bool {
        let had_meta = self.metadata.lock().remove(set_num).is_some();
        let had_parts = self.inventories.lock().remove(set_num).is_some();
        had_meta || had_parts
    }

    /// Number of cached sets (metadata or inventory).
    #[must_use]
    pub fn cached_sets(&self) -> usize {
        let metadata = self.metadata.lock();
        let inventories = self.inventories.lock();
        metadata.len() + inventories.keys().filter(|k| !metadata.contains_key(*k)).count()
    }
}

#[cfg(test)]
mod tests {
    use bv_core::PartRecord;

    use super::*;

    #[test]
    fn test_metadata_roundtrip() {
        let cache = MemoCache::new();
        assert!(cache.metadata("75192-1").is_none());

        cache.insert_metadata(
            "75192-1",
            SetMetadata::new("75192-1", "Millennium Falcon", 2017, 7541, 171),
        );
        assert_eq!(cache.metadata("75192-1").map(|m| m.year), Some(2017));
        assert_eq!(cache.cached_sets(), 1);
    }

    #[test]
    fn test_inventory_is_shared() {
        let cache = MemoCache::new();
        let stored = cache.insert_inventory(
            "1-1",
            Inventory::complete(vec![PartRecord::new("A", "3001", "Brick", "Red", 1)]),
        );
        let fetched = cache.inventory("1-1").unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
    }

    #[test]
    fn test_invalidate_keeps_themes() {
        let cache = MemoCache::new();
        cache.insert_metadata("1-1", SetMetadata::new("1-1", "One", 2000, 1, 5));
        cache.insert_inventory("1-1", Inventory::complete(Vec::new()));
        cache.insert_theme(5, "Town".to_owned());

        assert!(cache.invalidate_set("1-1"));
        assert!(!cache.invalidate_set("1-1"));
        assert!(cache.metadata("1-1").is_none());
        assert!(cache.inventory("1-1").is_none());
        assert_eq!(cache.theme(5).as_deref(), Some("Town"));
        assert_eq!(cache.cached_sets(), 0);
    }
}
