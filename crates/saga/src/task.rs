//! The dispatch seam between the saga and the task queue.
//!
//! The saga never blocks a worker while an order waits: each wait point is
//! expressed as a delayed re-enqueue of the next task. The queue behind
//! [`TaskDispatcher`] guarantees at-least-once delivery, which is why every
//! mutating collaborator call carries an idempotency key.

use std::time::Duration;

use async_trait::async_trait;
use common::{CourierId, OrderId};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::OrderFulfillmentRequest;

/// One schedulable step of the fulfillment workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FulfillmentTask {
    /// Phase 1: validate stock and reserve it.
    ProcessOrder(OrderFulfillmentRequest),

    /// Phase 2, search state: one courier poll cycle. `cycle` counts the
    /// polls performed so far for this order.
    FindCourier {
        order_id: OrderId,
        distance: f64,
        cycle: u32,
    },

    /// Phase 2, terminal step: close the order and free the courier once
    /// the transit delay has elapsed.
    CompleteDelivery {
        order_id: OrderId,
        courier_id: CourierId,
    },
}

impl FulfillmentTask {
    /// The order this task belongs to.
    pub fn order_id(&self) -> &OrderId {
        match self {
            FulfillmentTask::ProcessOrder(request) => &request.order_id,
            FulfillmentTask::FindCourier { order_id, .. } => order_id,
            FulfillmentTask::CompleteDelivery { order_id, .. } => order_id,
        }
    }

    /// A short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            FulfillmentTask::ProcessOrder(_) => "process_order",
            FulfillmentTask::FindCourier { .. } => "find_courier",
            FulfillmentTask::CompleteDelivery { .. } => "complete_delivery",
        }
    }
}

/// Hands saga steps to the durable task queue.
///
/// Implementations must deliver each task at least once; delayed dispatch
/// must not tie up the caller or a worker while the delay elapses.
#[async_trait]
pub trait TaskDispatcher: Send + Sync {
    /// Enqueues a task for immediate execution.
    async fn dispatch(&self, task: FulfillmentTask) -> Result<()>;

    /// Enqueues a task to run after `delay`.
    async fn dispatch_after(&self, delay: Duration, task: FulfillmentTask) -> Result<()>;
}
