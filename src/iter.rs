//! Lazy cursors over a [`BiMap`](crate::BiMap).
//!
//! A cursor holds a handle to one store and the keys it has yielded so far.
//! It borrows the store only while producing the next item, so the map may be
//! mutated mid-iteration. Each step resumes after the most recently yielded key
//! that is still mapped: removing entries never makes a cursor skip one it has
//! not reached, and entries added behind it are still visited.
//! Once a cursor runs off the end it stays exhausted.

use std::{hash::Hash, iter::FusedIterator};

use crate::store::Store;

struct Cursor<K, V> {
    store: Option<Store<K, V>>,
    visited: Vec<K>,
}

impl<K: Hash + Eq + Clone, V> Cursor<K, V> {
    fn new(store: Store<K, V>) -> Self {
        Cursor {
            store: Some(store),
            visited: Vec::new(),
        }
    }

    fn advance<T>(&mut self, read: impl FnOnce(&K, &V) -> T) -> Option<T> {
        let store = self.store.as_ref()?;
        let visited = &self.visited;
        let next = store.with(|table| {
            let position = visited
                .iter()
                .rev()
                .find_map(|key| table.get_index_of(key))
                .map_or(0, |index| index + 1);
            table
                .get_index(position)
                .map(|(key, value)| (key.clone(), read(key, value)))
        });
        match next {
            Some((key, item)) => {
                self.visited.push(key);
                Some(item)
            }
            None => {
                self.store = None;
                self.visited.clear();
                None
            }
        }
    }
}

/// Keys of a [`BiMap`](crate::BiMap), in insertion order.
pub struct Keys<K, V>(Cursor<K, V>);

impl<K: Hash + Eq + Clone, V> Keys<K, V> {
    pub(crate) fn new(store: Store<K, V>) -> Self {
        Keys(Cursor::new(store))
    }
}

impl<K: Hash + Eq + Clone, V> Iterator for Keys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.0.advance(|key, _| key.clone())
    }
}

impl<K: Hash + Eq + Clone, V> FusedIterator for Keys<K, V> {}

/// Values of a [`BiMap`](crate::BiMap), in the order they were first mapped.
///
/// This walks the inverse store, so after a key is re-pointed its new value
/// shows up at the end rather than at the key's position.
pub struct Values<K, V>(Keys<V, K>);

impl<K, V: Hash + Eq + Clone> Values<K, V> {
    pub(crate) fn new(inverse: Store<V, K>) -> Self {
        Values(Keys::new(inverse))
    }
}

impl<K, V: Hash + Eq + Clone> Iterator for Values<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.0.next()
    }
}

impl<K, V: Hash + Eq + Clone> FusedIterator for Values<K, V> {}

/// `(key, value)` pairs of a [`BiMap`](crate::BiMap), in key insertion order.
pub struct Entries<K, V>(Cursor<K, V>);

impl<K: Hash + Eq + Clone, V> Entries<K, V> {
    pub(crate) fn new(store: Store<K, V>) -> Self {
        Entries(Cursor::new(store))
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Iterator for Entries<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.0.advance(|key, value| (key.clone(), value.clone()))
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FusedIterator for Entries<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn store() -> Store<&'static str, u32> {
        let store = Store::default();
        store.insert("a", 1);
        store.insert("b", 2);
        store
    }

    #[test]
    fn entries_walk_in_order() {
        assert_eq!(Entries::new(store()).collect_vec(), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn empty_store_yields_nothing() {
        let store = Store::<u32, u32>::default();
        assert_eq!(Keys::new(store.clone()).next(), None);
        assert_eq!(Entries::new(store).next(), None);
    }

    #[test]
    fn sees_entries_added_before_the_end() {
        let store = store();
        let mut keys = Keys::new(store.clone());
        assert_eq!(keys.next(), Some("a"));
        store.insert("c", 3);
        assert_eq!(keys.collect_vec(), vec!["b", "c"]);
    }

    #[test]
    fn removing_the_current_key_does_not_skip_the_next() {
        let store = Store::<u32, u32>::default();
        for i in 0..4 {
            store.insert(i, i);
        }

        let mut seen = vec![];
        let mut keys = Keys::new(store.clone());
        while let Some(key) = keys.next() {
            seen.push(key);
            store.remove(&key);
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn removing_visited_keys_keeps_the_place() {
        let store = Store::<u32, u32>::default();
        for i in 0..5 {
            store.insert(i, i);
        }

        let mut entries = Entries::new(store.clone());
        assert_eq!(entries.by_ref().take(3).count(), 3);
        store.remove(&0);
        store.remove(&2);
        assert_eq!(entries.collect_vec(), vec![(3, 3), (4, 4)]);
    }

    #[test]
    fn removing_an_unreached_key_hides_it() {
        let store = store();
        store.insert("c", 3);

        let mut keys = Keys::new(store.clone());
        assert_eq!(keys.next(), Some("a"));
        store.remove("b");
        assert_eq!(keys.collect_vec(), vec!["c"]);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let store = store();
        let mut keys = Keys::new(store.clone());
        assert_eq!(keys.by_ref().count(), 2);
        store.insert("c", 3);
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn values_read_the_inverse_store() {
        let inverse = Store::<u32, &str>::default();
        inverse.insert(2, "b");
        inverse.insert(1, "a");
        assert_eq!(Values::<&str, u32>::new(inverse).collect_vec(), vec![2, 1]);
    }
}
