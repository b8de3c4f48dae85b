//! directory
//!
//! Username-keyed hash table with separate chaining.
//!
//! The table starts with [`DEFAULT_BUCKETS`] buckets. Before every insertion it
//! checks the load factor (entries per bucket); once that exceeds
//! [`LOAD_FACTOR_THRESHOLD`] the bucket count doubles and every entry is
//! redistributed before the new key goes in.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::models::Customer;

pub mod loading;

pub const DEFAULT_BUCKETS: usize = 5;
pub const LOAD_FACTOR_THRESHOLD: f64 = 2.0;

/// Directory of every customer known to the theater.
pub type CustomerDirectory = Directory<Customer>;

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

#[derive(Debug, Clone)]
pub struct Directory<V> {
    buckets: Vec<Vec<Entry<V>>>,
    entries: usize,
}

impl<V> Default for Directory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Directory<V> {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Table with `buckets` initial chains; zero is bumped to one.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self {
            buckets: Self::empty_buckets(buckets),
            entries: 0,
        }
    }

    fn empty_buckets(count: usize) -> Vec<Vec<Entry<V>>> {
        std::iter::repeat_with(Vec::new).take(count).collect()
    }

    fn index_for(key: &str, buckets: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % buckets as u64) as usize
    }

    fn index(&self, key: &str) -> usize {
        Self::index_for(key, self.buckets.len())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.entries as f64 / self.buckets.len() as f64
    }

    /// Insert or overwrite `key`. Returns the previous value on overwrite.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.load_factor() > LOAD_FACTOR_THRESHOLD {
            self.rehash();
        }

        let key = key.into();
        let index = self.index(&key);
        let chain = &mut self.buckets[index];
        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        chain.push(Entry { key, value });
        self.entries += 1;
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.index(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.index(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|entry| entry.key == key)?;
        self.entries -= 1;
        Some(chain.remove(position).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    // Doubles the bucket count and re-chains every entry, recounting as it goes.
    fn rehash(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_count));
        self.entries = 0;

        for entry in old.into_iter().flatten() {
            let index = Self::index_for(&entry.key, new_count);
            self.buckets[index].push(entry);
            self.entries += 1;
        }

        debug!("Directory rehashed to {} buckets ({} entries)", new_count, self.entries);
    }
}
