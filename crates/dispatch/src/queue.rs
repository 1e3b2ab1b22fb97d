//! In-memory task queue with delayed delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use saga::{FulfillmentTask, Result, SagaError, TaskDispatcher};
use tokio::sync::mpsc;

/// A task together with its delivery attempt count.
///
/// `attempt` is 0 for the first delivery and increments on each redelivery
/// after a failure.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub task: FulfillmentTask,
    pub attempt: u32,
}

/// Sending half of the in-memory queue; implements the saga's dispatch seam.
///
/// Delayed dispatch parks the task on a timer instead of a worker, so
/// thousands of orders can wait on couriers or transit concurrently. The
/// queue tracks how many tasks are queued or scheduled but not yet
/// processed, which is what lets a worker drain to idle deterministically.
#[derive(Debug, Clone)]
pub struct InMemoryTaskQueue {
    tx: mpsc::UnboundedSender<Delivery>,
    pending: Arc<AtomicUsize>,
}

/// Receiving half of the in-memory queue, held by a single worker.
#[derive(Debug)]
pub struct TaskReceiver {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

/// Creates a connected queue and receiver.
pub fn channel() -> (InMemoryTaskQueue, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        InMemoryTaskQueue {
            tx,
            pending: Arc::new(AtomicUsize::new(0)),
        },
        TaskReceiver { rx },
    )
}

impl InMemoryTaskQueue {
    /// Number of tasks queued or scheduled but not yet processed.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Re-enqueues a failed task with its bumped attempt count.
    pub fn requeue(&self, task: FulfillmentTask, attempt: u32, delay: Duration) {
        self.schedule(delay, Delivery { task, attempt });
    }

    /// Marks one received task as fully processed.
    pub(crate) fn mark_done(&self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }

    fn send(&self, delivery: Delivery) -> Result<()> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.tx.send(delivery).map_err(|err| {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            SagaError::Dispatch(format!("queue closed: {err}"))
        })
    }

    fn schedule(&self, delay: Duration, delivery: Delivery) {
        // Counted as pending from the moment it is scheduled, so a drain
        // cannot conclude the queue is idle while a timer is outstanding.
        self.pending.fetch_add(1, Ordering::SeqCst);
        let tx = self.tx.clone();
        let pending = self.pending.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(delivery).is_err() {
                pending.fetch_sub(1, Ordering::SeqCst);
                tracing::warn!("dropping scheduled task, queue closed");
            }
        });
    }
}

#[async_trait]
impl TaskDispatcher for InMemoryTaskQueue {
    async fn dispatch(&self, task: FulfillmentTask) -> Result<()> {
        self.send(Delivery { task, attempt: 0 })
    }

    async fn dispatch_after(&self, delay: Duration, task: FulfillmentTask) -> Result<()> {
        self.schedule(delay, Delivery { task, attempt: 0 });
        Ok(())
    }
}

impl TaskReceiver {
    /// Receives the next delivery; `None` once every queue handle is gone.
    pub async fn recv(&mut self) -> Option<Delivery> {
        self.rx.recv().await
    }
}
