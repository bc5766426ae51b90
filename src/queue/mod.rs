//! Work queue feeding the worker pool.
//!
//! [`WorkQueue::dispatch`] spawns a producer task that streams work items
//! into a bounded channel and closes it once the input is exhausted. Every
//! worker holds a clone of the returned [`WorkQueue`] and pulls from the
//! shared receiver until it yields `None`.
//!
//! # Example
//!
//! ```no_run
//! use painting_core::queue::{WorkItem, WorkQueue};
//!
//! # async fn example() {
//! let (queue, dispatcher) = WorkQueue::dispatch(vec![WorkItem::new(1, "")]);
//! while let Some(item) = queue.next().await {
//!     println!("{}", item.id);
//! }
//! let dispatched = dispatcher.await.unwrap_or(0);
//! # }
//! ```

mod item;

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use item::{HIGH_RES_TOKEN, IMAGE_EXTENSION, LOW_RES_TOKEN, WorkItem, upgrade_resolution};

/// Channel capacity between the dispatcher and the workers.
///
/// A single slot keeps the producer in lockstep with the consumers.
pub const QUEUE_CAPACITY: usize = 1;

/// Shared consumer side of the work queue.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    receiver: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
}

impl WorkQueue {
    /// Spawns the dispatcher for `items` and returns the consumer handle.
    ///
    /// The dispatcher pushes items in order, then closes the queue. If every
    /// `WorkQueue` clone is dropped first, it stops early. The join handle
    /// resolves to the number of items handed to the queue.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch<I>(items: I) -> (Self, JoinHandle<usize>)
    where
        I: IntoIterator<Item = WorkItem>,
        I::IntoIter: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let items = items.into_iter();

        let dispatcher = tokio::spawn(async move {
            let mut dispatched = 0usize;
            for item in items {
                if sender.send(item).await.is_err() {
                    warn!(dispatched, "work queue closed before all items were dispatched");
                    break;
                }
                dispatched += 1;
            }
            debug!(dispatched, "dispatcher finished, closing queue");
            dispatched
        });

        let queue = Self {
            receiver: Arc::new(Mutex::new(receiver)),
        };
        (queue, dispatcher)
    }

    /// Takes the next item, waiting for the dispatcher if necessary.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub async fn next(&self) -> Option<WorkItem> {
        self.receiver.lock().await.recv().await
    }
}
