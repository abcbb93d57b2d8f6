//! Queue error types.

use thiserror::Error;

/// Errors returned by [`BlockingQueue`](super::BlockingQueue) consumers.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue was closed and every queued value has been received.
    #[error("Queue closed and drained")]
    Closed,
}
