//! Hash map aliases and an insertion-ordered map keyed by string ids.
//!
//! [`FxHashMap`] and [`FxHashSet`] alias the `rustc-hash` collections. Keys in
//! this crate are short catalog identifiers, and none of them come from an
//! adversary, so the Fx hasher is a safe choice.
//!
//! [`InsertionMap`] is the ordered mapping used by the grouping engine: values
//! live in a `Vec` in first-seen order and an Fx index maps each key to its
//! slot.
//!
//! # Examples
//!
//! ```
//! use bv_core::InsertionMap;
//!
//! let mut map: InsertionMap<u32> = InsertionMap::new();
//! *map.entry_or_insert_with("b", || 0) += 2;
//! *map.entry_or_insert_with("a", || 0) += 1;
//! *map.entry_or_insert_with("b", || 0) += 3;
//!
//! assert_eq!(map.into_values(), vec![5, 1]);
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// A string-keyed map that remembers the order keys were first inserted.
///
/// Lookups are O(1) through the index; iteration and [`into_values`](Self::into_values)
/// follow first-insertion order. Re-inserting an existing key never moves it.
#[derive(Debug, Clone)]
pub struct InsertionMap<V> {
    index: FxHashMap<String, usize>,
    values: Vec<V>,
}

impl<V> Default for InsertionMap<V> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            values: Vec::new(),
        }
    }
}

impl<V> InsertionMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            index,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Returns the value for `key`, inserting the result of `make` first if
    /// the key has not been seen.
    pub fn entry_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let slot = if let Some(&slot) = self.index.get(key) {
            slot
        } else {
            let slot = self.values.len();
            self.values.push(make());
            self.index.insert(key.to_owned(), slot);
            slot
        };
        &mut self.values[slot]
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).and_then(|&slot| self.values.get(slot))
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no key has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over values in first-insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }

    /// Consumes the map, returning values in first-insertion order.
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}
