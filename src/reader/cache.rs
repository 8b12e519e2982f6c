//! Small bounded least-recently-used map.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::error::{InterpolationError, InterpolationResult};

/// Bounded map that evicts the least-recently-used entry when full.
///
/// Sized for a handful of entries (one per row of a window), so recency is tracked with a
/// linear scan over a `VecDeque` instead of an intrusive list.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, V>,
    // Front is least recently used.
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is rejected with [`InterpolationError::InvalidConfiguration`].
    pub fn new(capacity: usize) -> InterpolationResult<Self> {
        if capacity == 0 {
            return Err(InterpolationError::invalid_configuration(
                "cache capacity must be at least 1",
            ));
        }
        Ok(Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not refresh recency.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Looks up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.map.contains_key(key) {
            self.touch(key);
        }
        self.map.get(key)
    }

    /// Inserts or replaces `key`, evicting the least-recently-used entry if full.
    ///
    /// Returns the evicted key, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<K> {
        if self.map.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return None;
        }
        self.order.push_back(key);

        if self.map.len() > self.capacity {
            let evicted = self.order.pop_front()?;
            self.map.remove(&evicted);
            return Some(evicted);
        }
        None
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}
