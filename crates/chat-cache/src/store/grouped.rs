//! Two-level cache keyed by (parent ID, entity ID).

use std::collections::HashMap;

use chat_core::{Cacheable, Ulid};

use super::capacity::GroupedCacheConfig;

/// Bounded, best-effort map of parent-scoped entities
///
/// Messages are grouped by channel; members and roles by server. A running
/// total of entries across all groups is maintained and always equals the
/// number of reachable entries. Groups that become empty are dropped.
#[derive(Debug)]
pub struct GroupedCache<V> {
    config: GroupedCacheConfig<V>,
    groups: HashMap<Ulid, HashMap<Ulid, V>>,
    total: usize,
}

impl<V: Cacheable> GroupedCache<V> {
    #[must_use]
    pub fn new(config: GroupedCacheConfig<V>) -> Self {
        Self {
            config,
            groups: HashMap::new(),
            total: 0,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &GroupedCacheConfig<V> {
        &self.config
    }

    /// Look up an entity under a parent
    pub fn get(&self, parent: &Ulid, id: &Ulid) -> Option<&V> {
        self.groups.get(parent).and_then(|group| group.get(id))
    }

    /// Check if an entity is cached under a parent
    pub fn contains(&self, parent: &Ulid, id: &Ulid) -> bool {
        self.get(parent, id).is_some()
    }

    /// Iterate over the entities of one parent
    pub fn group(&self, parent: &Ulid) -> impl Iterator<Item = &V> {
        self.groups.get(parent).into_iter().flat_map(HashMap::values)
    }

    /// Insert or overwrite an entity under a parent
    ///
    /// Returns `false` when the capacity policy rejected it.
    pub fn set(&mut self, parent: &Ulid, value: V) -> bool {
        if !self.admit(parent, &value) {
            return false;
        }
        let key = value.cache_key().clone();
        let previous = self.groups.entry(parent.clone()).or_default().insert(key, value);
        if previous.is_none() {
            self.total += 1;
        }
        true
    }

    /// Remove an entity if present
    pub fn del(&mut self, parent: &Ulid, id: &Ulid) -> Option<V> {
        let group = self.groups.get_mut(parent)?;
        let removed = group.remove(id)?;
        self.total -= 1;
        if group.is_empty() {
            self.groups.remove(parent);
        }
        Some(removed)
    }

    /// Remove every entity under a parent
    ///
    /// Returns the number of entities removed.
    pub fn del_group(&mut self, parent: &Ulid) -> usize {
        match self.groups.remove(parent) {
            Some(group) => {
                self.total -= group.len();
                group.len()
            }
            None => 0,
        }
    }

    /// Mutate a cached entity in place
    ///
    /// The mutator is only invoked when the entity exists. Returns whether it
    /// was invoked.
    pub fn partially_update<F>(&mut self, parent: &Ulid, id: &Ulid, mutate: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        match self.groups.get_mut(parent).and_then(|group| group.get_mut(id)) {
            Some(value) => {
                mutate(value);
                true
            }
            None => false,
        }
    }

    /// Number of entities across all parents
    #[inline]
    pub fn size(&self) -> usize {
        self.total
    }

    /// Number of entities under one parent
    pub fn group_size(&self, parent: &Ulid) -> usize {
        self.groups.get(parent).map_or(0, HashMap::len)
    }

    /// Number of distinct parents
    #[inline]
    pub fn groups_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.groups.clear();
        self.total = 0;
    }

    /// Capacity policy, evaluated in order:
    /// 1. nothing configured rejects, then the admission predicate may veto
    /// 2. a full parent (new key) loses one of its entries
    /// 3. else a full cache loses one entry from anywhere
    /// 4. else a new parent beyond the group limit evicts a whole group
    fn admit(&mut self, parent: &Ulid, value: &V) -> bool {
        if !self.config.is_enabled() {
            return false;
        }
        let key = value.cache_key();
        if key.is_empty() || parent.is_empty() {
            tracing::trace!("refusing to cache entity with empty id");
            return false;
        }
        if let Some(check) = &self.config.admission {
            if !check(parent, value) {
                return false;
            }
        }

        let group = self.groups.get(parent);
        if group.is_some_and(|g| g.contains_key(key)) {
            // Overwrites never grow the cache
            return true;
        }
        let group_len = group.map(HashMap::len);
        let reject = self.config.reject_on_overflow;

        if let (Some(max), Some(len)) = (self.config.max_per_group.limit(), group_len) {
            if len >= max {
                if reject {
                    return false;
                }
                self.evict_from_group(parent);
                return true;
            }
        }
        if let Some(max) = self.config.max_total.limit() {
            if self.total >= max {
                if reject {
                    return false;
                }
                self.evict_any();
                return true;
            }
        }
        if let Some(max) = self.config.max_groups.limit() {
            if group_len.is_none() && self.groups.len() >= max {
                if reject {
                    return false;
                }
                self.evict_group();
            }
        }
        true
    }

    fn evict_from_group(&mut self, parent: &Ulid) {
        let victim = self
            .groups
            .get(parent)
            .and_then(|group| group.keys().next().cloned());
        if let Some(victim) = victim {
            tracing::trace!(parent = %parent, id = %victim, "evicting cached entity");
            self.del(parent, &victim);
        }
    }

    fn evict_any(&mut self) {
        let victim = self
            .groups
            .iter()
            .find_map(|(parent, group)| group.keys().next().map(|id| (parent.clone(), id.clone())));
        if let Some((parent, id)) = victim {
            tracing::trace!(parent = %parent, id = %id, "evicting cached entity");
            self.del(&parent, &id);
        }
    }

    fn evict_group(&mut self) {
        if let Some(parent) = self.groups.keys().next().cloned() {
            tracing::trace!(parent = %parent, "evicting cached group");
            self.del_group(&parent);
        }
    }
}

impl<V: Cacheable> Default for GroupedCache<V> {
    fn default() -> Self {
        Self::new(GroupedCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Capacity;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Ulid,
        value: u32,
    }

    impl Cacheable for Item {
        fn cache_key(&self) -> &Ulid {
            &self.id
        }
    }

    fn id(s: &str) -> Ulid {
        Ulid::from_raw(s)
    }

    fn item(s: &str) -> Item {
        Item { id: id(s), value: 0 }
    }

    fn reachable<V: Cacheable>(cache: &GroupedCache<V>) -> usize {
        cache.groups.values().map(HashMap::len).sum()
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let mut cache: GroupedCache<Item> = GroupedCache::default();
        assert!(!cache.set(&id("p"), item("a")));
        assert!(cache.get(&id("p"), &id("a")).is_none());
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.groups_count(), 0);
    }

    #[test]
    fn test_set_get_and_overwrite() {
        let mut cache = GroupedCache::new(GroupedCacheConfig::unlimited());
        cache.set(&id("p"), item("a"));
        cache.set(&id("p"), Item { id: id("a"), value: 7 });
        cache.set(&id("q"), item("a"));

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.groups_count(), 2);
        assert_eq!(cache.get(&id("p"), &id("a")).unwrap().value, 7);
        assert_eq!(cache.get(&id("q"), &id("a")).unwrap().value, 0);
    }

    #[test]
    fn test_per_group_cap_evicts_within_group() {
        let config = GroupedCacheConfig::disabled().with_max_per_group(Capacity::bounded(2));
        let mut cache = GroupedCache::new(config);
        cache.set(&id("other"), item("x"));
        for name in ["a", "b", "c", "d"] {
            cache.set(&id("p"), item(name));
            assert!(cache.group_size(&id("p")) <= 2);
        }

        assert_eq!(cache.group_size(&id("p")), 2);
        assert!(cache.contains(&id("p"), &id("d")));
        // Other groups are never touched by a per-group eviction
        assert!(cache.contains(&id("other"), &id("x")));
        assert_eq!(cache.size(), reachable(&cache));
    }

    #[test]
    fn test_total_cap_evicts_anywhere() {
        let config = GroupedCacheConfig::disabled().with_max_total(Capacity::bounded(3));
        let mut cache = GroupedCache::new(config);
        for (parent, name) in [("p", "a"), ("q", "b"), ("r", "c"), ("s", "d"), ("t", "e")] {
            cache.set(&id(parent), item(name));
            assert!(cache.size() <= 3);
        }
        assert_eq!(cache.size(), 3);
        assert!(cache.contains(&id("t"), &id("e")));
        assert_eq!(cache.size(), reachable(&cache));
        // Groups emptied by eviction are dropped
        assert_eq!(cache.groups_count(), 3);
    }

    #[test]
    fn test_max_groups_evicts_whole_group() {
        let config = GroupedCacheConfig::unlimited().with_max_groups(Capacity::bounded(2));
        let mut cache = GroupedCache::new(config);
        cache.set(&id("p"), item("a"));
        cache.set(&id("p"), item("b"));
        cache.set(&id("q"), item("c"));
        cache.set(&id("r"), item("d"));

        assert_eq!(cache.groups_count(), 2);
        assert!(cache.contains(&id("r"), &id("d")));
        assert_eq!(cache.size(), reachable(&cache));
    }

    #[test]
    fn test_reject_on_overflow() {
        let config = GroupedCacheConfig::disabled()
            .with_max_per_group(Capacity::bounded(1))
            .reject_on_overflow();
        let mut cache = GroupedCache::new(config);
        assert!(cache.set(&id("p"), item("a")));
        assert!(!cache.set(&id("p"), item("b")));
        assert!(cache.contains(&id("p"), &id("a")));
        assert!(!cache.contains(&id("p"), &id("b")));
    }

    #[test]
    fn test_admission_predicate_sees_parent() {
        let allowed = id("mine");
        let config = GroupedCacheConfig::unlimited()
            .with_admission(move |parent: &Ulid, _: &Item| *parent == allowed);
        let mut cache = GroupedCache::new(config);
        assert!(cache.set(&id("mine"), item("a")));
        assert!(!cache.set(&id("theirs"), item("b")));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_del_group_cascade() {
        let mut cache = GroupedCache::new(GroupedCacheConfig::unlimited());
        for name in ["a", "b", "c"] {
            cache.set(&id("p"), item(name));
        }
        cache.set(&id("q"), item("d"));

        let groups_before = cache.groups_count();
        let size_before = cache.size();
        let group_size = cache.group_size(&id("p"));

        assert_eq!(cache.del_group(&id("p")), 3);
        assert_eq!(cache.groups_count(), groups_before - 1);
        assert_eq!(cache.size(), size_before - group_size);
        assert_eq!(cache.del_group(&id("p")), 0);
        assert_eq!(cache.size(), reachable(&cache));
    }

    #[test]
    fn test_del_keeps_total_correct() {
        let mut cache = GroupedCache::new(GroupedCacheConfig::unlimited());
        cache.set(&id("p"), item("a"));
        cache.set(&id("p"), item("b"));

        assert!(cache.del(&id("p"), &id("zzz")).is_none());
        assert!(cache.del(&id("nope"), &id("a")).is_none());
        assert_eq!(cache.size(), 2);

        assert!(cache.del(&id("p"), &id("a")).is_some());
        assert!(cache.del(&id("p"), &id("b")).is_some());
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.groups_count(), 0);
    }

    #[test]
    fn test_partially_update_absent_is_noop() {
        let mut cache: GroupedCache<Item> = GroupedCache::new(GroupedCacheConfig::unlimited());
        cache.set(&id("p"), item("a"));

        let mut called = false;
        assert!(!cache.partially_update(&id("p"), &id("b"), |_| called = true));
        assert!(!cache.partially_update(&id("q"), &id("a"), |_| called = true));
        assert!(!called);
        assert_eq!(cache.size(), 1);
        assert!(cache.get(&id("q"), &id("a")).is_none());
    }

    #[test]
    fn test_partially_update_present() {
        let mut cache = GroupedCache::new(GroupedCacheConfig::unlimited());
        cache.set(&id("p"), item("a"));
        assert!(cache.partially_update(&id("p"), &id("a"), |i| i.value = 3));
        assert_eq!(cache.get(&id("p"), &id("a")).unwrap().value, 3);
    }
}
