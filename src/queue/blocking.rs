//! Mutex + condvar blocking queue.

use super::error::QueueError;
use super::MessageSource;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Unbounded FIFO with blocking removal and non-blocking insertion.
///
/// The deque and the closed flag share one mutex, so a consumer's
/// empty-check and its wait registration are atomic with respect to
/// `send` and `close`.
///
/// Growth is unbounded: a producer that outpaces its consumers grows the
/// deque without limit.
///
/// # Example
///
/// ```rust
/// use light_cycle::queue::BlockingQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(BlockingQueue::new());
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for i in 0..3 {
///             queue.send(i);
///         }
///     })
/// };
///
/// let received: Vec<i32> = (0..3).map(|_| queue.receive().unwrap()).collect();
/// producer.join().unwrap();
/// assert_eq!(received, vec![0, 1, 2]);
/// ```
pub struct BlockingQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    sent: AtomicU64,
    received: AtomicU64,
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            sent: AtomicU64::new(0),
            received: AtomicU64::new(0),
        }
    }

    /// Append a value and wake one waiting consumer.
    ///
    /// Never blocks. Values sent after [`close`](Self::close) are still
    /// queued and receivable.
    pub fn send(&self, value: T) {
        {
            let mut inner = self.inner.lock();
            inner.items.push_back(value);
            self.sent.fetch_add(1, Ordering::Relaxed);
        }
        self.not_empty.notify_one();
    }

    /// Remove and return the oldest value, blocking while the queue is empty.
    ///
    /// Blocks indefinitely on an open, empty queue. Returns
    /// [`QueueError::Closed`] only once the queue is closed and drained.
    pub fn receive(&self) -> Result<T, QueueError> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(value) = inner.items.pop_front() {
                self.received.fetch_add(1, Ordering::Relaxed);
                return Ok(value);
            }
            if inner.closed {
                return Err(QueueError::Closed);
            }
            // Releases the lock while parked; a wake does not imply non-empty.
            self.not_empty.wait(&mut inner);
        }
    }

    /// Pop the oldest value without blocking.
    pub fn try_receive(&self) -> Option<T> {
        let value = self.inner.lock().items.pop_front();
        if value.is_some() {
            self.received.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Close the queue and wake every waiter.
    ///
    /// Waiters drain what is left, then see [`QueueError::Closed`].
    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.not_empty.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Total `(sent, received)` counts since creation.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.sent.load(Ordering::Relaxed),
            self.received.load(Ordering::Relaxed),
        )
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MessageSource<T> for BlockingQueue<T> {
    fn receive(&self) -> Result<T, QueueError> {
        BlockingQueue::receive(self)
    }
}
