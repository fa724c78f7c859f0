// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Size-bounded memo used by the calendar and solar layers.
//!
//! Once the map reaches its capacity it is cleared wholesale before the
//! next insertion.  There is no partial eviction.

use std::collections::HashMap;
use std::hash::Hash;

/// Default capacity for every cache in the crate.
pub const DEFAULT_CACHE_CAPACITY: usize = 2000;

/// A `HashMap` that empties itself when it grows past `capacity`.
#[derive(Debug, Clone)]
pub(crate) struct BoundedCache<K, V> {
    label: &'static str,
    capacity: usize,
    map: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> BoundedCache<K, V> {
    pub(crate) fn new(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            capacity,
            map: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).cloned()
    }

    pub(crate) fn insert(&mut self, key: K, value: V) {
        if self.map.len() >= self.capacity {
            log::debug!(
                "{} cache reached {} entries; clearing",
                self.label,
                self.map.len()
            );
            self.map.clear();
        }
        self.map.insert(key, value);
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// Failed computations are not cached.
    pub(crate) fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = self.get(&key) {
            log::trace!("{} cache hit", self.label);
            return Ok(hit);
        }
        log::trace!("{} cache miss", self.label);
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
