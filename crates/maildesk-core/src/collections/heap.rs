//! Array-backed binary max-heap and a priority-tagged queue built on it.

use std::cmp::Ordering;

use super::CollectionError;

/// Binary max-heap over any totally ordered element.
///
/// The heap is either fixed-capacity ([`PriorityHeap::with_capacity`]), in
/// which case inserting past the limit fails with
/// [`CollectionError::CapacityExceeded`], or growable
/// ([`PriorityHeap::unbounded`]).
#[derive(Debug, Clone)]
pub struct PriorityHeap<T> {
    data: Vec<T>,
    capacity: Option<usize>,
}

impl<T: Ord> PriorityHeap<T> {
    /// Creates a heap that rejects inserts beyond `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Creates a heap with no capacity limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            data: Vec::new(),
            capacity: None,
        }
    }

    /// Capacity limit, if any.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if a fixed-capacity heap has no room left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.data.len() >= cap)
    }

    /// Removes every element, keeping the capacity limit.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Inserts an element and restores the heap order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the heap is full.
    pub fn insert(&mut self, element: T) -> Result<(), CollectionError> {
        if let Some(capacity) = self.capacity.filter(|&cap| self.data.len() >= cap) {
            return Err(CollectionError::CapacityExceeded { capacity });
        }
        self.data.push(element);
        self.sift_up(self.data.len() - 1);
        Ok(())
    }

    /// Removes and returns the greatest element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the heap is empty.
    pub fn extract_max(&mut self) -> Result<T, CollectionError> {
        if self.data.is_empty() {
            return Err(CollectionError::EmptyContainer);
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let max = self.data.pop().ok_or(CollectionError::EmptyContainer)?;
        self.sift_down(0);
        Ok(max)
    }

    /// Returns the greatest element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the heap is empty.
    pub fn peek_max(&self) -> Result<&T, CollectionError> {
        self.data.first().ok_or(CollectionError::EmptyContainer)
    }

    /// Drains the heap, returning its elements greatest first.
    pub fn drain_sorted(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Ok(max) = self.extract_max() {
            out.push(max);
        }
        out
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] <= self.data[parent] {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < len && self.data[left] > self.data[largest] {
                largest = left;
            }
            if right < len && self.data[right] > self.data[largest] {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.data.swap(index, largest);
            index = largest;
        }
    }
}

impl<T: Ord> Default for PriorityHeap<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// An element tagged with an explicit priority.
///
/// Ordering compares `priority` only, so the wrapped value's own ordering is
/// ignored.
#[derive(Debug, Clone)]
pub struct Prioritized<T> {
    /// Caller-supplied priority; higher comes out first.
    pub priority: i32,
    /// The wrapped element.
    pub item: T,
}

impl<T> PartialEq for Prioritized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<T> Eq for Prioritized<T> {}

impl<T> PartialOrd for Prioritized<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Prioritized<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// Max-priority queue over elements tagged with an integer priority.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: PriorityHeap<Prioritized<T>>,
}

impl<T> PriorityQueue<T> {
    /// Creates a queue with a fixed capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: PriorityHeap::with_capacity(capacity),
        }
    }

    /// Creates a queue with no capacity limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            heap: PriorityHeap::unbounded(),
        }
    }

    /// Adds an element with the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CapacityExceeded`] if the queue is full.
    pub fn enqueue(&mut self, item: T, priority: i32) -> Result<(), CollectionError> {
        self.heap.insert(Prioritized { priority, item })
    }

    /// Removes and returns the highest-priority element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.heap.extract_max().map(|p| p.item)
    }

    /// Returns the highest-priority element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.heap.peek_max().map(|p| &p.item)
    }

    /// Number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_in_descending_order() {
        let mut heap = PriorityHeap::unbounded();
        for n in [5, 1, 9, 3, 7] {
            heap.insert(n).unwrap();
        }
        assert_eq!(heap.peek_max(), Ok(&9));
        assert_eq!(heap.drain_sorted(), [9, 7, 5, 3, 1]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: PriorityHeap<i32> = PriorityHeap::with_capacity(2);
        assert_eq!(heap.extract_max(), Err(CollectionError::EmptyContainer));
        assert_eq!(heap.peek_max(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut heap = PriorityHeap::with_capacity(2);
        heap.insert(1).unwrap();
        heap.insert(2).unwrap();
        assert!(heap.is_full());
        assert_eq!(
            heap.insert(3),
            Err(CollectionError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(heap.len(), 2);
        heap.extract_max().unwrap();
        assert!(heap.insert(3).is_ok());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut heap = PriorityHeap::with_capacity(3);
        heap.insert(1).unwrap();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), Some(3));
    }

    #[test]
    fn test_priority_queue_ignores_item_order() {
        let mut queue = PriorityQueue::unbounded();
        queue.enqueue("low", 1).unwrap();
        queue.enqueue("high", 9).unwrap();
        queue.enqueue("mid", 4).unwrap();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek(), Ok(&"high"));
        assert_eq!(queue.dequeue(), Ok("high"));
        assert_eq!(queue.dequeue(), Ok("mid"));
        assert_eq!(queue.dequeue(), Ok("low"));
        assert_eq!(queue.dequeue(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_priority_queue_capacity() {
        let mut queue = PriorityQueue::with_capacity(1);
        queue.enqueue('a', 0).unwrap();
        assert!(queue.enqueue('b', 5).is_err());
    }

    proptest! {
        #[test]
        fn extraction_is_non_increasing(values in prop::collection::vec(any::<i16>(), 0..100)) {
            let mut heap = PriorityHeap::with_capacity(values.len());
            for v in &values {
                heap.insert(*v).unwrap();
            }
            let mut previous = None;
            for _ in 0..values.len() {
                let current = heap.extract_max().unwrap();
                if let Some(prev) = previous {
                    prop_assert!(current <= prev);
                }
                previous = Some(current);
            }
            prop_assert_eq!(heap.extract_max(), Err(CollectionError::EmptyContainer));
        }
    }
}
