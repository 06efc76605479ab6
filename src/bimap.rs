use std::{borrow::Borrow, collections::HashMap, fmt, hash::Hash};

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    iter::{Entries, Keys, Values},
    store::Store,
};

/// A one-to-one map between keys and values, backed by two mirrored stores
/// (`K -> V` and `V -> K`).
///
/// A `BiMap` is a handle. [`BiMap::inverse`] returns a second handle over the
/// same two stores with their roles swapped, so a write through either handle
/// is immediately visible through the other. The stores live as long as the
/// longest-lived handle.
///
/// Handles are `!Send` and `!Sync`. A single `set` or `delete` touches both
/// stores in sequence, so sharing a map across threads needs one lock around
/// the whole structure.
pub struct BiMap<K, V> {
    forward: Store<K, V>,
    inverse: Store<V, K>,
}

impl<K, V> Default for BiMap<K, V> {
    fn default() -> Self {
        BiMap {
            forward: Store::default(),
            inverse: Store::default(),
        }
    }
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// An empty map with fresh forward and inverse stores.
    pub fn new() -> Self {
        Default::default()
    }

    /// Same as [`BiMap::new`].
    pub fn create() -> Self {
        Self::new()
    }

    /// Maps `key` to `value`, replacing whatever `key` mapped to before.
    ///
    /// Fails with [`Error::InvalidMapping`] if `value` already belongs to a
    /// different key; the map is untouched in that case. Re-setting an
    /// existing pair is a no-op. Returns `self` so calls can be chained.
    pub fn set(&self, key: K, value: V) -> Result<&Self> {
        let claimed = self
            .inverse
            .with(|inverse| matches!(inverse.get(&value), Some(owner) if *owner != key));
        if claimed {
            debug!(len = self.forward.len(), "rejected mapping to a claimed value");
            return Err(Error::InvalidMapping);
        }

        if let Some(stale) = self.forward.insert(key.clone(), value.clone()) {
            if stale != value {
                self.inverse.remove(&stale);
            }
        }
        self.inverse.insert(value, key);

        trace!(
            len = self.forward.len(),
            inverse_len = self.inverse.len(),
            "set"
        );
        Ok(self)
    }

    /// Removes every mapping, through every view.
    pub fn clear(&self) {
        self.forward.clear();
        self.inverse.clear();
        trace!("clear");
    }

    /// Removes the mapping for `key` and its mirrored entry.
    ///
    /// Returns whether anything was removed from either store.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        remove_pair(&self.forward, &self.inverse, key)
    }

    /// Removes the mapping whose value is `value`. Same as
    /// `self.inverse().delete(value)`.
    pub fn delete_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        remove_pair(&self.inverse, &self.forward, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key)
    }

    /// Looks up the key that maps to `value`.
    pub fn get_key<Q>(&self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inverse.get(value)
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn has_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inverse.contains_key(value)
    }

    /// Builds a map by setting each pair in order, stopping at the first conflict.
    pub fn try_from_iter(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self> {
        let map = Self::new();
        map.try_extend(pairs)?;
        Ok(map)
    }

    /// Sets each pair in order, stopping at the first conflict.
    ///
    /// Pairs before the conflicting one stay applied.
    pub fn try_extend(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Calls `f(value, key, map)` for every entry, in key insertion order.
    ///
    /// No store is borrowed while `f` runs, so `f` may mutate the map. Entries
    /// removed before they are reached are skipped; entries added are visited.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, &Self),
    {
        for (key, value) in self.entries() {
            f(&value, &key, self);
        }
    }

    pub fn keys(&self) -> Keys<K, V> {
        Keys::new(self.forward.clone())
    }

    /// Values in the order they were mapped, which can differ from key order
    /// once a key has been re-pointed.
    pub fn values(&self) -> Values<K, V> {
        Values::new(self.inverse.clone())
    }

    pub fn entries(&self) -> Entries<K, V> {
        Entries::new(self.forward.clone())
    }

    pub fn iter(&self) -> Entries<K, V> {
        self.entries()
    }
}

impl<K, V> BiMap<K, V> {
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A view of the same data with keys and values swapped. Nothing is copied.
    pub fn inverse(&self) -> BiMap<V, K> {
        BiMap {
            forward: self.inverse.clone(),
            inverse: self.forward.clone(),
        }
    }

    /// Whether both handles view the same pair of stores in the same orientation.
    pub fn shares_storage(&self, other: &BiMap<K, V>) -> bool {
        self.forward.ptr_eq(&other.forward) && self.inverse.ptr_eq(&other.inverse)
    }
}

// removes `key` from `from` and its counterpart from `to`
fn remove_pair<A, B, Q>(from: &Store<A, B>, to: &Store<B, A>, key: &Q) -> bool
where
    A: Hash + Eq + Borrow<Q>,
    B: Hash + Eq,
    Q: Hash + Eq + ?Sized,
{
    let counterpart = from.remove(key);
    let mirrored = counterpart
        .as_ref()
        .map_or(false, |counterpart| to.remove(counterpart).is_some());
    trace!(len = from.len(), inverse_len = to.len(), "delete");
    counterpart.is_some() || mirrored
}

impl<'a, K, V> IntoIterator for &'a BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Item = (K, V);
    type IntoIter = Entries<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<K, V> fmt::Debug for BiMap<K, V>
where
    K: fmt::Debug + Hash + Eq + Clone,
    V: fmt::Debug + Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K, V> PartialEq for BiMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward
            .with(|mine| other.forward.with(|theirs| mine == theirs))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for BiMap<K, V> {}

impl<K, V, const N: usize> TryFrom<[(K, V); N]> for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Error = Error;

    fn try_from(pairs: [(K, V); N]) -> Result<Self> {
        Self::try_from_iter(pairs)
    }
}

impl<K, V, S> TryFrom<HashMap<K, V, S>> for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Error = Error;

    fn try_from(pairs: HashMap<K, V, S>) -> Result<Self> {
        Self::try_from_iter(pairs)
    }
}
