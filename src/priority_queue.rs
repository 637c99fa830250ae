use std::collections::HashMap;
use ahash::RandomState;

/// One of the K fixed positions in the heap. `key` is `None` until the slot
/// is first claimed by an eviction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) key: Option<String>,
    pub(crate) frequency: u32,
}

/// A fixed-size binary min-heap of K slots ordered by frequency, with a
/// key -> slot index kept in step with every swap.
pub(crate) struct SlotHeap {
    slots: Vec<Slot>,
    positions: HashMap<String, usize, RandomState>,
}

impl SlotHeap {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hasher: RandomState) -> Self {
        Self {
            // All-zero slots already satisfy the heap order.
            slots: vec![Slot::default(); capacity],
            positions: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn min_frequency(&self) -> u32 {
        self.slots.first().map(|slot| slot.frequency).unwrap_or(0)
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub(crate) fn get(&self, key: &str) -> Option<u32> {
        self.position(key).map(|pos| self.slots[pos].frequency)
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Sets the frequency of the slot at `pos` and restores heap order.
    pub(crate) fn refresh(&mut self, pos: usize, frequency: u32) {
        if self.slots[pos].frequency == frequency {
            return;
        }
        self.slots[pos].frequency = frequency;
        self.fix(pos);
    }

    /// Overwrites the root with `key`, returning the key it displaced, if the
    /// root was occupied.
    pub(crate) fn replace_root(&mut self, key: String, frequency: u32) -> Option<String> {
        let root = self.slots.first_mut()?;
        let evicted = root.key.take();
        if let Some(old) = &evicted {
            self.positions.remove(old);
        }

        self.positions.insert(key.clone(), 0);
        self.slots[0] = Slot {
            key: Some(key),
            frequency,
        };
        self.sift_down(0);
        evicted
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::default());
        self.positions.clear();
    }

    // Binary heap helper methods using Eytzinger layout (0-based indexing)
    fn parent(i: usize) -> usize { (i - 1) >> 1 }
    fn left(i: usize) -> usize { 2 * i + 1 }

    fn less(&self, i: usize, j: usize) -> bool {
        self.slots[i].frequency < self.slots[j].frequency
    }

    fn fix(&mut self, pos: usize) {
        if !self.sift_down(pos) {
            self.sift_up(pos);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = Self::parent(pos);
            if !self.less(pos, parent) {
                break;
            }
            self.swap_nodes(parent, pos);
            pos = parent;
        }
    }

    /// Returns whether the slot moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let n = self.slots.len();
        let mut pos = start;
        loop {
            let left = Self::left(pos);
            if left >= n {
                break;
            }
            let mut child = left;
            let right = left + 1;
            if right < n && self.less(right, left) {
                child = right;
            }
            if !self.less(child, pos) {
                break;
            }
            self.swap_nodes(pos, child);
            pos = child;
        }
        pos > start
    }

    fn swap_nodes(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        for idx in [i, j] {
            if let Some(key) = &self.slots[idx].key {
                if let Some(pos) = self.positions.get_mut(key) {
                    *pos = idx;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_heap_order(heap: &SlotHeap) {
        for i in 1..heap.slots.len() {
            let parent = SlotHeap::parent(i);
            assert!(
                heap.slots[parent].frequency <= heap.slots[i].frequency,
                "Heap property violated: parent count {} at index {} is greater than child count {} at index {}",
                heap.slots[parent].frequency, parent, heap.slots[i].frequency, i
            );
        }
    }

    fn assert_positions(heap: &SlotHeap) {
        for (idx, slot) in heap.slots.iter().enumerate() {
            if let Some(key) = &slot.key {
                assert_eq!(heap.position(key), Some(idx), "stale index for {}", key);
            }
        }
        let occupied = heap.slots.iter().filter(|s| s.key.is_some()).count();
        assert_eq!(heap.len(), occupied);
    }

    #[test]
    fn test_starts_empty() {
        let heap = SlotHeap::with_capacity(3);
        assert_eq!(heap.capacity(), 3);
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.min_frequency(), 0);
        assert!(heap.slots().iter().all(|s| *s == Slot::default()));
    }

    #[test]
    fn test_replace_empty_root_evicts_nothing() {
        let mut heap = SlotHeap::with_capacity(2);
        assert_eq!(heap.replace_root("a".to_string(), 1), None);

        // The new entry sinks below the remaining empty slot.
        assert_eq!(heap.slots[0], Slot::default());
        assert_eq!(heap.get("a"), Some(1));
        assert_eq!(heap.position("a"), Some(1));
        assert_positions(&heap);
    }

    #[test]
    fn test_replace_occupied_root_returns_key() {
        let mut heap = SlotHeap::with_capacity_and_hasher(1, RandomState::new());
        heap.replace_root("a".to_string(), 1);
        assert_eq!(heap.replace_root("b".to_string(), 2), Some("a".to_string()));
        assert_eq!(heap.get("a"), None);
        assert_eq!(heap.get("b"), Some(2));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_refresh_moves_towards_leaves() {
        let mut heap = SlotHeap::with_capacity_and_hasher(3, RandomState::new());
        heap.replace_root("a".to_string(), 1);
        heap.replace_root("b".to_string(), 2);
        heap.replace_root("c".to_string(), 3);
        assert_eq!(heap.min_frequency(), 1);

        let pos = heap.position("a").unwrap();
        heap.refresh(pos, 10);

        assert_eq!(heap.min_frequency(), 2);
        assert_heap_order(&heap);
        assert_positions(&heap);
    }

    #[test]
    fn test_refresh_moves_towards_root() {
        let mut heap = SlotHeap::with_capacity_and_hasher(3, RandomState::new());
        heap.replace_root("a".to_string(), 5);
        heap.replace_root("b".to_string(), 6);
        heap.replace_root("c".to_string(), 7);

        assert_eq!(heap.min_frequency(), 5);

        let pos = heap.position("c").unwrap();
        assert_ne!(pos, 0);
        heap.refresh(pos, 1);

        assert_eq!(heap.position("c"), Some(0));
        assert_eq!(heap.min_frequency(), 1);
        assert_heap_order(&heap);
        assert_positions(&heap);
    }

    #[test]
    fn test_clear() {
        let mut heap = SlotHeap::with_capacity_and_hasher(2, RandomState::new());
        heap.replace_root("a".to_string(), 3);
        heap.replace_root("b".to_string(), 4);
        heap.clear();

        assert_eq!(heap.len(), 0);
        assert_eq!(heap.get("a"), None);
        assert!(heap.slots().iter().all(|s| *s == Slot::default()));
    }

    #[test]
    fn test_heap_property() {
        let mut heap = SlotHeap::with_capacity_and_hasher(10, RandomState::new());

        for i in (0..=20u32).rev() {
            if i >= heap.min_frequency() {
                heap.replace_root(format!("item{}", i), i);
            }
            assert_heap_order(&heap);
            assert_positions(&heap);
        }
        for i in 0..heap.capacity() {
            heap.refresh(i, (i as u32 * 37) % 11);
            assert_heap_order(&heap);
            assert_positions(&heap);
        }
    }
}
