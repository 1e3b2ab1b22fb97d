//! Task worker driving the saga coordinator.

use std::collections::HashMap;
use std::sync::Arc;

use common::OrderId;
use saga::{CourierDirectory, FulfillmentState, OrderRecord, SagaCoordinator, StockService};

use crate::config::DispatchConfig;
use crate::queue::{Delivery, InMemoryTaskQueue, TaskReceiver};

/// Consumes fulfillment tasks and executes them against the coordinator.
///
/// A failed step is redelivered with a delay, up to the configured budget;
/// the saga's idempotency keys make re-execution safe. A task that keeps
/// failing past the budget is dropped and logged rather than poisoning the
/// queue.
pub struct Worker<S, C, O>
where
    S: StockService,
    C: CourierDirectory,
    O: OrderRecord,
{
    coordinator: Arc<SagaCoordinator<S, C, O, InMemoryTaskQueue>>,
    queue: InMemoryTaskQueue,
    receiver: TaskReceiver,
    config: DispatchConfig,
    // Last state each in-flight order reported, for progression checks.
    progress: HashMap<OrderId, FulfillmentState>,
}

impl<S, C, O> Worker<S, C, O>
where
    S: StockService,
    C: CourierDirectory,
    O: OrderRecord,
{
    /// Creates a worker over the coordinator and its queue.
    pub fn new(
        coordinator: Arc<SagaCoordinator<S, C, O, InMemoryTaskQueue>>,
        queue: InMemoryTaskQueue,
        receiver: TaskReceiver,
        config: DispatchConfig,
    ) -> Self {
        Self {
            coordinator,
            queue,
            receiver,
            config,
            progress: HashMap::new(),
        }
    }

    /// Processes tasks until no queued or scheduled work remains.
    ///
    /// Delayed tasks count as pending from the moment they are scheduled,
    /// so this drains entire sagas, waits included, before returning.
    pub async fn run_until_idle(&mut self) {
        while self.queue.pending() > 0 {
            let Some(delivery) = self.receiver.recv().await else {
                break;
            };
            self.handle(delivery).await;
            self.queue.mark_done();
        }
    }

    async fn handle(&mut self, delivery: Delivery) {
        let Delivery { task, attempt } = delivery;
        match self.coordinator.run_task(task.clone()).await {
            Ok(state) => {
                self.note_progress(task.order_id(), state);
                tracing::debug!(
                    order_id = %task.order_id(),
                    task = task.name(),
                    %state,
                    "task completed"
                );
            }
            Err(err) if attempt < self.config.max_redeliveries => {
                tracing::warn!(
                    order_id = %task.order_id(),
                    task = task.name(),
                    attempt,
                    error = %err,
                    "task failed, redelivering"
                );
                self.queue
                    .requeue(task, attempt + 1, self.config.redelivery_delay);
            }
            Err(err) => {
                tracing::error!(
                    order_id = %task.order_id(),
                    task = task.name(),
                    attempt,
                    error = %err,
                    "task failed past the redelivery budget, dropping"
                );
            }
        }
    }

    /// Checks the reported state against the last one seen for the order.
    /// A redelivered step legitimately repeats a state; anything else the
    /// state machine disallows is logged as a skipped or regressed
    /// progression.
    fn note_progress(&mut self, order_id: &OrderId, state: FulfillmentState) {
        if let Some(previous) = self.progress.get(order_id).copied() {
            if previous != state && !previous.can_transition_to(state) {
                tracing::warn!(
                    %order_id,
                    %previous,
                    %state,
                    "order reported an illegal state progression"
                );
            }
        }
        if state.is_terminal() {
            self.progress.remove(order_id);
        } else {
            self.progress.insert(order_id.clone(), state);
        }
    }
}
