//! FIFO queue and LIFO stack.

use std::collections::VecDeque;

use super::CollectionError;

/// First-in, first-out queue.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends an element at the back.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes the element at the front.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.items
            .pop_front()
            .ok_or(CollectionError::EmptyContainer)
    }

    /// Returns the element at the front.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.items.front().ok_or(CollectionError::EmptyContainer)
    }

    /// Number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Last-in, first-out stack.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes an element on top.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.items.pop().ok_or(CollectionError::EmptyContainer)
    }

    /// Returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyContainer`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.items.last().ok_or(CollectionError::EmptyContainer)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_fifo() {
        let mut queue = Queue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        queue.enqueue(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek(), Ok(&1));
        assert_eq!(queue.dequeue(), Ok(1));
        assert_eq!(queue.dequeue(), Ok(2));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [3]);
    }

    #[test]
    fn test_queue_empty() {
        let mut queue: Queue<u8> = Queue::new();
        assert_eq!(queue.dequeue(), Err(CollectionError::EmptyContainer));
        assert_eq!(queue.peek(), Err(CollectionError::EmptyContainer));
        queue.enqueue(1);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stack_lifo() {
        let mut stack = Stack::new();
        stack.push("a");
        stack.push("b");
        assert_eq!(stack.peek(), Ok(&"b"));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(stack.pop(), Ok("b"));
        assert_eq!(stack.pop(), Ok("a"));
        assert_eq!(stack.pop(), Err(CollectionError::EmptyContainer));
        assert_eq!(stack.peek(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_stack_clear() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.clear();
        assert_eq!(stack.len(), 0);
    }
}
