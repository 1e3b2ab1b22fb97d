//! Order record contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SagaError};

/// Durable status of an order as the order service records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The order is open and progressing.
    Active,
    /// The order was delivered and closed (terminal).
    Completed,
    /// The order was cancelled (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if no further status change is allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The order record collaborator.
///
/// The message field is the only progress channel exposed to the UI, so
/// terminal calls always leave a human-readable message behind.
#[async_trait]
pub trait OrderRecord: Send + Sync {
    /// Replaces the order's progress message.
    async fn update_message(&self, order_id: &OrderId, message: &str) -> Result<()>;

    /// Cancels the order with a human-readable reason (terminal).
    async fn cancel(&self, order_id: &OrderId, reason: &str) -> Result<()>;

    /// Closes the order as delivered (terminal).
    async fn close(&self, order_id: &OrderId, message: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
struct OrderProgress {
    status: OrderStatus,
    message: String,
    history: Vec<String>,
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, OrderProgress>,
    update_outages: u32,
}

/// In-memory order record for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRecord {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderRecord {
    /// Creates an empty order record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly submitted order.
    pub fn open(&self, order_id: OrderId) {
        self.state.write().unwrap().orders.insert(
            order_id,
            OrderProgress {
                status: OrderStatus::Active,
                message: "Order received".to_string(),
                history: vec!["Order received".to_string()],
            },
        );
    }

    /// The order's current status, if known.
    pub fn status(&self, order_id: &OrderId) -> Option<OrderStatus> {
        self.state
            .read()
            .unwrap()
            .orders
            .get(order_id)
            .map(|o| o.status)
    }

    /// The order's current progress message, if known.
    pub fn message(&self, order_id: &OrderId) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .orders
            .get(order_id)
            .map(|o| o.message.clone())
    }

    /// Every message the order has carried, oldest first.
    pub fn message_history(&self, order_id: &OrderId) -> Vec<String> {
        self.state
            .read()
            .unwrap()
            .orders
            .get(order_id)
            .map(|o| o.history.clone())
            .unwrap_or_default()
    }

    /// Makes the next `n` update calls fail at the transport level.
    pub fn fail_updates(&self, n: u32) {
        self.state.write().unwrap().update_outages = n;
    }

    fn finish(&self, order_id: &OrderId, status: OrderStatus, message: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| SagaError::UnknownOrder(order_id.clone()))?;

        if order.status.is_terminal() {
            // A redelivered terminal step is fine; a conflicting one is not.
            if order.status == status {
                return Ok(());
            }
            return Err(SagaError::AlreadyTerminal {
                order_id: order_id.clone(),
                status: order.status.to_string(),
            });
        }

        order.status = status;
        order.message = message.to_string();
        order.history.push(message.to_string());
        Ok(())
    }
}

#[async_trait]
impl OrderRecord for InMemoryOrderRecord {
    async fn update_message(&self, order_id: &OrderId, message: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.update_outages > 0 {
            state.update_outages -= 1;
            return Err(SagaError::transport("update_order_message", "timeout"));
        }
        let order = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| SagaError::UnknownOrder(order_id.clone()))?;

        // Terminal messages are final; late progress updates are dropped.
        if order.status.is_terminal() {
            return Ok(());
        }
        order.message = message.to_string();
        order.history.push(message.to_string());
        Ok(())
    }

    async fn cancel(&self, order_id: &OrderId, reason: &str) -> Result<()> {
        self.finish(order_id, OrderStatus::Cancelled, reason)
    }

    async fn close(&self, order_id: &OrderId, message: &str) -> Result<()> {
        self.finish(order_id, OrderStatus::Completed, message)
    }
}
