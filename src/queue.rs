/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 5;

/// Why a [`Queue`] refused an operation. The queue is unchanged either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue is full, the piece could not be inserted")]
    Full,
    #[error("queue is empty, there is no piece to play")]
    Empty,
}

/// A first-in first-out queue with fixed capacity.
///
/// Items live in a ring buffer of `capacity` slots. `head` points at the
/// oldest item and `tail` at the next free slot, both advancing modulo the
/// capacity, so slots freed by [`Queue::dequeue`] are reused without
/// shifting anything. Unlike a [`VecDeque`](std::collections::VecDeque),
/// the storage never grows: pushing into a full [`Queue`] is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> Queue<T> {
    /// Creates an empty [`Queue`] with a given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");

        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pushes an item to the back of the queue.
    ///
    /// If the queue is full, [`QueueError::Full`] is returned, the queue is
    /// left untouched and `item` is dropped.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full);
        }

        self.slots[self.tail] = Some(item);
        self.tail = self.advance(self.tail);
        self.len += 1;

        debug_assert_eq!(self.tail, (self.head + self.len) % self.capacity());
        Ok(())
    }

    /// Pops the item at the front of the queue, the one that has been
    /// waiting longest.
    ///
    /// If the queue is empty, [`QueueError::Empty`] is returned and the
    /// queue is left untouched.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let item = self.slots[self.head].take().ok_or(QueueError::Empty)?;
        self.head = self.advance(self.head);
        self.len -= 1;

        debug_assert_eq!(self.tail, (self.head + self.len) % self.capacity());
        Ok(item)
    }

    /// Iterates over the queued items from front to back without
    /// removing them.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            offset: 0,
        }
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}

impl<T: Clone> Queue<T> {
    /// Returns the queued items from front to back.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`Queue`], see [`Queue::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    queue: &'a Queue<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.queue.len {
            return None;
        }

        let index = (self.queue.head + self.offset) % self.queue.capacity();
        self.offset += 1;
        self.queue.slots[index].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
