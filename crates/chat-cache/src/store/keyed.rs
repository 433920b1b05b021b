//! Single-level cache keyed by entity ID.

use std::collections::HashMap;

use chat_core::{Cacheable, Ulid};

use super::capacity::{CacheConfig, Capacity};

/// Bounded, best-effort map of entities keyed by their own ID
///
/// No operation ever fails: a rejected insert, a missing key or an update of
/// an absent entry is simply a no-op. Eviction picks an arbitrary entry and
/// is not LRU.
#[derive(Debug)]
pub struct KeyedCache<V> {
    config: CacheConfig<V>,
    entries: HashMap<Ulid, V>,
}

impl<V: Cacheable> KeyedCache<V> {
    #[must_use]
    pub fn new(config: CacheConfig<V>) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &CacheConfig<V> {
        &self.config
    }

    /// Look up an entity
    pub fn get(&self, id: &Ulid) -> Option<&V> {
        self.entries.get(id)
    }

    /// Check if an entity is cached
    pub fn contains(&self, id: &Ulid) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert or overwrite an entity
    ///
    /// Returns `false` when the capacity policy rejected it.
    pub fn set(&mut self, value: V) -> bool {
        if !self.admit(&value) {
            return false;
        }
        self.entries.insert(value.cache_key().clone(), value);
        true
    }

    /// Remove an entity if present
    pub fn del(&mut self, id: &Ulid) -> Option<V> {
        self.entries.remove(id)
    }

    /// Mutate a cached entity in place
    ///
    /// The mutator is only invoked when the entity exists. Returns whether it
    /// was invoked.
    pub fn partially_update<F>(&mut self, id: &Ulid, mutate: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        match self.entries.get_mut(id) {
            Some(value) => {
                mutate(value);
                true
            }
            None => false,
        }
    }

    /// Number of cached entities
    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over cached entities
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn admit(&mut self, value: &V) -> bool {
        if !self.config.max_size.is_enabled() {
            return false;
        }
        let key = value.cache_key();
        if key.is_empty() {
            tracing::trace!("refusing to cache entity with empty id");
            return false;
        }
        if let Some(check) = &self.config.admission {
            if !check(value) {
                return false;
            }
        }
        if let Capacity::Bounded(max) = self.config.max_size {
            if !self.entries.contains_key(key) && self.entries.len() >= max {
                if self.config.reject_on_overflow {
                    return false;
                }
                self.evict_one();
            }
        }
        true
    }

    fn evict_one(&mut self) {
        if let Some(victim) = self.entries.keys().next().cloned() {
            tracing::trace!(id = %victim, "evicting cached entity");
            self.entries.remove(&victim);
        }
    }
}

impl<V: Cacheable> Default for KeyedCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
