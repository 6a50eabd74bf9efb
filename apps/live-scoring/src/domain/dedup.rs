//! Bounded window of recently applied event keys.
//!
//! Comparing against only the last message misses a duplicate that arrives
//! after other events; the window keeps the last `capacity` keys instead.

use std::collections::{HashSet, VecDeque};

use crate::domain::events::EventKey;

#[derive(Debug, Clone)]
pub struct RecentEvents {
    capacity: usize,
    order: VecDeque<EventKey>,
    seen: HashSet<EventKey>,
}

impl RecentEvents {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn contains(&self, key: EventKey) -> bool {
        self.seen.contains(&key)
    }

    /// Remember `key`, evicting the oldest entry when full. Returns false if
    /// the key was already in the window.
    pub fn record(&mut self, key: EventKey) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.order.push_back(key);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}
