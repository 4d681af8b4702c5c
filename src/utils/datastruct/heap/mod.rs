use tracing::trace;

use crate::config::{HEAP_FAN_OUT, INITIAL_HEAP_CAPACITY};
use crate::error::{Error, Result};

/// ArrayHeap
/// 配列上の4分木 min-heap
/// index i の子は `4i+1 ..= 4i+4`、親は `(i-1)/4`
///
/// Only a strict `<` moves an element, so equal items keep whatever
/// relative position they happen to have.
#[derive(Debug, Clone)]
pub struct ArrayHeap<T> {
    heap: Vec<T>,
    /// 論理容量 8, 16, 32, ...
    /// `Vec::capacity` は `reserve_exact` でも多めに確保しうるので別に持つ
    capacity: usize,
}

impl<T> Default for ArrayHeap<T>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayHeap<T>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        ArrayHeap {
            heap: Vec::with_capacity(INITIAL_HEAP_CAPACITY),
            capacity: INITIAL_HEAP_CAPACITY,
        }
    }

    /// Build a heap from `iter`, stopping at the first rejected item.
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = Self::new();
        for item in iter {
            heap.insert(item)?;
        }
        Ok(heap)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Logical capacity: `INITIAL_HEAP_CAPACITY` doubled once per insert that
    /// found the heap full. Removals never shrink it. The backing `Vec` holds
    /// at least this many slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `item`.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - item が自身と比較できない (NaNなど)
    pub fn insert(&mut self, item: T) -> Result<()> {
        if item.partial_cmp(&item).is_none() {
            return Err(Error::InvalidArgument("heap item is not comparable with itself"));
        }
        if self.heap.len() == self.capacity {
            self.grow();
        }
        self.heap.push(item);
        self.percolate_up(self.heap.len() - 1);
        Ok(())
    }

    pub fn peek_min(&self) -> Result<&T> {
        self.heap.first().ok_or(Error::EmptyContainer)
    }

    /// Remove and return the minimum.
    ///
    /// # Errors
    /// * `Error::EmptyContainer` - heap が空
    pub fn remove_min(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(Error::EmptyContainer);
        }
        // 末尾を根に移してから沈める
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.percolate_down(0);
        }
        Ok(min)
    }

    /// Drain into ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(item) = self.remove_min() {
            sorted.push(item);
        }
        sorted
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity * 2;
        trace!(
            old_capacity = self.capacity,
            new_capacity,
            "growing heap storage"
        );
        self.heap.reserve_exact(new_capacity - self.heap.len());
        self.capacity = new_capacity;
    }

    fn percolate_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / HEAP_FAN_OUT;
            if self.heap[index] < self.heap[parent] {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn percolate_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let first_child = HEAP_FAN_OUT * index + 1;
            if first_child >= len {
                break;
            }
            let last_child = (first_child + HEAP_FAN_OUT).min(len);
            let mut smallest = index;
            for child in first_child..last_child {
                if self.heap[child] < self.heap[smallest] {
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
