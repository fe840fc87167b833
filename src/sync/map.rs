//! A concurrent map with load/store/swap semantics, backed by `DashMap`.

use crate::error::Result;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::io::Write;

/// Sharded concurrent map. Every method takes `&self`, so it can be shared
/// behind an `Arc` without extra locking.
#[derive(Debug)]
pub struct SyncMap<K: Eq + Hash, V> {
    inner: DashMap<K, V>,
}

impl<K: Eq + Hash, V> Default for SyncMap<K, V> {
    fn default() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    pub fn load(&self, key: &K) -> Option<V> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// Returns the existing value and `true`, or stores `value` and returns it
    /// with `false`.
    pub fn load_or_store(&self, key: K, value: V) -> (V, bool) {
        match self.inner.entry(key) {
            Entry::Occupied(e) => (e.get().clone(), true),
            Entry::Vacant(e) => {
                e.insert(value.clone());
                (value, false)
            }
        }
    }

    pub fn load_and_delete(&self, key: &K) -> Option<V> {
        self.inner.remove(key).map(|(_, v)| v)
    }

    pub fn delete(&self, key: &K) {
        self.inner.remove(key);
    }

    /// Stores `value` and hands back whatever it replaced.
    pub fn swap(&self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Replaces the value only if it currently equals `old`.
    pub fn compare_and_swap(&self, key: &K, old: &V, new: V) -> bool
    where
        V: PartialEq,
    {
        match self.inner.get_mut(key) {
            Some(mut current) if *current == *old => {
                *current = new;
                true
            }
            _ => false,
        }
    }

    /// Removes the entry only if its value equals `old`.
    pub fn compare_and_delete(&self, key: &K, old: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.remove_if(key, |_, v| v == old).is_some()
    }

    /// Calls `f` for each entry until it returns `false`.
    ///
    /// Visits a snapshot, so `f` may freely modify the map. Order is unspecified.
    pub fn range<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.entries() {
            if !f(&k, &v) {
                break;
            }
        }
    }

    pub fn entries(&self) -> Vec<(K, V)> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Store, load, load-or-store, load-and-delete, then a range over numeric
/// entries printed in key order.
pub fn walkthrough<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    let words: SyncMap<String, String> = SyncMap::new();
    words.store("ping".into(), "pong".into());
    if let Some(v) = words.load(&"ping".to_string()) {
        writeln!(out, "{}", v)?;
    }

    let (actual, loaded) = words.load_or_store("ping".into(), "ppong".into());
    writeln!(out, "After LoadOrStore, actual: {}, loaded: {}", actual, loaded)?;

    let removed = words.load_and_delete(&"ping".to_string());
    writeln!(
        out,
        "After LoadAndDelete, v: {}, loaded: {}",
        removed.as_deref().unwrap_or("<nil>"),
        removed.is_some()
    )?;

    let numbers: SyncMap<i32, i32> = SyncMap::new();
    for n in 1..=3 {
        numbers.store(n, n);
    }
    let mut seen = Vec::new();
    numbers.range(|k, v| {
        seen.push((*k, *v));
        true
    });
    seen.sort_unstable();
    for (k, v) in seen {
        writeln!(out, "key: {} value: {}", k, v)?;
    }
    Ok(())
}
