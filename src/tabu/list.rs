//! Fixed-capacity recency memory.

/// Ring buffer of recently flipped cell indices.
///
/// Inserting overwrites the oldest slot, so an entry stays tabu for exactly
/// `capacity` insertions. There is no explicit removal.
#[derive(Debug, Clone)]
pub struct TabuList {
    slots: Vec<Option<usize>>,
    next: usize,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if `entry` is among the last `capacity` insertions.
    pub fn is_tabu(&self, entry: usize) -> bool {
        self.slots.contains(&Some(entry))
    }

    /// Records `entry`, evicting the oldest one once the list is full.
    pub fn insert(&mut self, entry: usize) {
        if self.slots.is_empty() {
            return;
        }
        self.slots[self.next] = Some(entry);
        self.next = (self.next + 1) % self.slots.len();
    }
}
