use crate::{
    order::{self, Item},
    LlrbTree,
};

/// An ordered map based on an [LLRB tree].
///
/// [LLRB tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
#[derive(Clone, Debug)]
pub struct LlrbMap<K: Item, V> {
    tree: LlrbTree<MapEntry<K, V>>,
}

#[derive(Clone, Debug)]
struct MapEntry<K, V> {
    key: K,
    value: V,
}

impl<K: Item, V> Item for MapEntry<K, V> {
    #[inline]
    fn less(&self, than: &Self) -> bool {
        self.key.less(&than.key)
    }
}

impl<K: Item, V> LlrbMap<K, V> {
    /// Creates a new, empty `LlrbMap`.
    pub const fn new() -> Self {
        Self {
            tree: LlrbTree::new(),
        }
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains a value associated with `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the value associated with `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree
            .get_by(|entry| order::probe(key, &entry.key))
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree
            .get_by_mut(|entry| order::probe(key, &entry.key))
            .map(|entry| &mut entry.value)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already held a key with the same order, both the key and the value are
    /// replaced and the old value is returned.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree
            .replace_or_insert(MapEntry { key, value })
            .map(|entry| entry.value)
    }

    /// Returns the first key-value pair in the map.
    ///
    /// The returned key is the minimum key in the map.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.min().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes and returns the first key-value pair in the map.
    ///
    /// The returned key is the minimum key in the map.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree
            .delete_min()
            .map(|MapEntry { key, value }| (key, value))
    }

    /// Returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.max().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes and returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree
            .delete_max()
            .map(|MapEntry { key, value }| (key, value))
    }

    /// Removes the value associated with `key` from the map.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree
            .delete_by(|entry| order::probe(key, &entry.key))
            .map(|entry| entry.value)
    }

    /// Clears the map, removing all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.tree.assert_invariants();
    }
}

impl<K: Item, V> Default for LlrbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Item, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Item, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = LlrbMap::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::{prelude::v1::*, string::String};

    use super::*;

    #[test]
    fn insert_replaces_values() {
        let mut map = LlrbMap::new();
        assert_eq!(map.insert(2, "two"), None);
        assert_eq!(map.insert(1, "one"), None);
        assert_eq!(map.insert(2, "deux"), Some("two"));
        map.assert_invariants();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), Some(&"deux"));
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&3));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map: LlrbMap<u32, String> = (0..10).map(|k| (k, k.to_string())).collect();

        map.get_mut(&4).unwrap().push('!');
        assert_eq!(map.get(&4).map(String::as_str), Some("4!"));
        assert_eq!(map.get_mut(&10), None);
    }

    #[test]
    fn first_and_last() {
        let mut map: LlrbMap<u32, u32> = [(5, 50), (3, 30), (8, 80)].into_iter().collect();

        assert_eq!(map.first_key_value(), Some((&3, &30)));
        assert_eq!(map.last_key_value(), Some((&8, &80)));

        assert_eq!(map.pop_first(), Some((3, 30)));
        assert_eq!(map.pop_last(), Some((8, 80)));
        map.assert_invariants();

        assert_eq!(map.first_key_value(), map.last_key_value());
        assert_eq!(map.pop_first(), Some((5, 50)));
        assert_eq!(map.pop_first(), None);
        assert_eq!(map.pop_last(), None);
        assert!(map.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut map: LlrbMap<u32, u32> = (0..100).map(|k| (k, k * 2)).collect();

        for k in (0..100).step_by(3) {
            assert_eq!(map.remove(&k), Some(k * 2));
            assert_eq!(map.remove(&k), None);
            map.assert_invariants();
        }
        assert_eq!(map.len(), 66);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
    }
}
