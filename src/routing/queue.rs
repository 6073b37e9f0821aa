//! Binary min-heap keyed by tentative cost
//!
//! Re-inserting an item with an improved priority adds a second entry
//! instead of decreasing the key; consumers must discard entries for
//! already-settled items at extraction (lazy deletion).

use crate::Cost;

pub(crate) struct PriorityQueue<T> {
    heap: Vec<(T, Cost)>,
}

impl<T> PriorityQueue<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, item: T, priority: Cost) {
        self.heap.push((item, priority));
        self.sift_up(self.heap.len() - 1);
    }

    pub(crate) fn extract_min(&mut self) -> Option<(T, Cost)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].1 <= self.heap[index].1 {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut smallest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < self.heap.len() && self.heap[child].1 < self.heap[smallest].1 {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}
