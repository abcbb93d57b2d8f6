//! Blocking handoff queue.
//!
//! A generic, unbounded FIFO guarded by a mutex and a condition variable.
//! Producers never block; consumers park on the condition variable while
//! the queue is empty, with no polling.

mod blocking;
mod error;

pub use blocking::BlockingQueue;
pub use error::QueueError;

/// Anything a consumer can block on for the next value.
///
/// [`BlockingQueue`] is the production implementation; tests substitute
/// scripted sources to drive consumers deterministically.
pub trait MessageSource<T> {
    /// Block until the next value is available.
    fn receive(&self) -> Result<T, QueueError>;
}
