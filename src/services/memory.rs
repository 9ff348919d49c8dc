//! Bounded window of recently seen titles.
//!
//! [`TitleMemory`] is a fixed-capacity FIFO: pushing at capacity evicts
//! the oldest entry. Insertion order is the only order that matters, and
//! the same title may occupy several slots. The window lives for the
//! process lifetime; nothing is ever persisted.

use std::collections::VecDeque;

/// Insertion-ordered ring buffer of previously seen titles.
#[derive(Debug)]
pub struct TitleMemory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl TitleMemory {
    /// Creates an empty memory holding at most `capacity` titles.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 (config validation rejects this earlier).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a title, evicting the oldest entry when at capacity.
    pub fn push(&mut self, title: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(title);
    }

    /// Iterates over current contents, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of titles currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the memory holds no titles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fixed capacity set at construction.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_insertion_order() {
        let mut memory = TitleMemory::new(3);
        memory.push("a".to_string());
        memory.push("b".to_string());
        let titles: Vec<&str> = memory.iter().collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn eviction_drops_oldest_first() {
        let mut memory = TitleMemory::new(3);
        for title in ["a", "b", "c", "d", "e"] {
            memory.push(title.to_string());
        }
        assert_eq!(memory.len(), 3);
        let titles: Vec<&str> = memory.iter().collect();
        assert_eq!(titles, vec!["c", "d", "e"]);
    }

    #[test]
    fn duplicate_titles_occupy_separate_slots() {
        let mut memory = TitleMemory::new(4);
        memory.push("same".to_string());
        memory.push("same".to_string());
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn iteration_is_restartable() {
        let mut memory = TitleMemory::new(2);
        memory.push("a".to_string());
        assert_eq!(memory.iter().count(), 1);
        assert_eq!(memory.iter().count(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_panics() {
        let _ = TitleMemory::new(0);
    }
}
