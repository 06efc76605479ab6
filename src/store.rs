use std::{cell::RefCell, hash::Hash, rc::Rc};

use ahash::RandomState;
use indexmap::IndexMap;

pub(crate) type Table<K, V> = IndexMap<K, V, RandomState>;

/// A hashed mapping table that remembers insertion order, under shared ownership.
///
/// Cloning a `Store` clones the handle: both handles see the same table.
/// Every method borrows the table only for its own duration.
pub(crate) struct Store<K, V>(Rc<RefCell<Table<K, V>>>);

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Store(Rc::clone(&self.0))
    }
}

impl<K, V> Default for Store<K, V> {
    fn default() -> Self {
        Store(Rc::new(RefCell::new(Table::default())))
    }
}

impl<K, V> Store<K, V> {
    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn ptr_eq(&self, other: &Store<K, V>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Runs `f` against the table. `f` must not mutate this store.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&Table<K, V>) -> R) -> R {
        f(&*self.0.borrow())
    }
}

impl<K: Hash + Eq, V> Store<K, V> {
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.0.borrow().get(key).cloned()
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.borrow().contains_key(key)
    }

    /// Inserts or overwrites. An existing key keeps its position.
    pub(crate) fn insert(&self, key: K, value: V) -> Option<V> {
        self.0.borrow_mut().insert(key, value)
    }

    /// Removes `key`, keeping the relative order of the remaining entries.
    pub(crate) fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.borrow_mut().shift_remove(key)
    }
}
