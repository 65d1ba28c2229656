//! Label-keyed value storage.
//!
//! Keys are canonical `LabelSet`s, so equivalent mappings supplied in any
//! order land on the same entry. Backed by `DashMap`: each read-modify-write
//! holds the owning shard's write lock, which gives per-entry atomicity
//! without serializing unrelated label combinations behind one lock.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{MetricsError, Result};
use crate::labels::{IntoLabelSet, LabelSet};

#[derive(Debug)]
pub struct LabelKeyedStore<V> {
    map: DashMap<LabelSet, V>,
}

impl<V> Default for LabelKeyedStore<V> {
    fn default() -> Self {
        Self { map: DashMap::new() }
    }
}

impl<V: Clone> LabelKeyedStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry equivalent to `labels`.
    pub fn set(&self, labels: impl IntoLabelSet, value: V) -> Result<()> {
        let key = labels.into_label_set()?;
        self.map.insert(key, value);
        Ok(())
    }

    /// Value stored under the equivalent key.
    pub fn get(&self, labels: impl IntoLabelSet) -> Result<V> {
        let key = labels.into_label_set()?;
        self.map
            .get(&key)
            .map(|r| r.value().clone())
            .ok_or_else(|| MetricsError::NotFound(key.to_string()))
    }

    /// Atomically replace the entry for `labels` with `f(current)`.
    ///
    /// `f` runs while the entry's shard is write-locked; it must not touch
    /// this store again.
    pub fn update<F>(&self, labels: impl IntoLabelSet, f: F) -> Result<V>
    where
        F: FnOnce(Option<&V>) -> V,
    {
        let key = labels.into_label_set()?;
        let next = match self.map.entry(key) {
            Entry::Occupied(mut e) => {
                let next = f(Some(e.get()));
                e.insert(next.clone());
                next
            }
            Entry::Vacant(e) => {
                let next = f(None);
                e.insert(next.clone());
                next
            }
        };
        Ok(next)
    }

    /// Remove the entry for `labels`, returning its value if present.
    pub fn remove(&self, labels: impl IntoLabelSet) -> Result<Option<V>> {
        let key = labels.into_label_set()?;
        Ok(self.map.remove(&key).map(|(_, v)| v))
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    /// Number of distinct label combinations stored.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Snapshot of every entry. Order is unspecified.
    pub fn all(&self) -> Vec<(LabelSet, V)> {
        self.map
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}
