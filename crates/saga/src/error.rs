//! Saga error taxonomy.

use common::{CourierId, OrderId};
use thiserror::Error;

/// Errors that can occur during fulfillment.
///
/// The taxonomy drives retry behavior: only [`SagaError::Transport`] is
/// transient and eligible for the bounded retry in [`crate::retry`].
/// Business rejections and unexpected payloads abort immediately.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Network-level failure talking to a collaborator (timeout, connection
    /// refused, non-2xx). Bounded-retried, then escalated to an abort.
    #[error("transport failure calling {operation}: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    /// The collaborator understood the request and said no. The reason is
    /// surfaced verbatim in the customer-facing order message.
    #[error("{0}")]
    Rejected(String),

    /// The collaborator returned a payload the saga cannot interpret.
    /// Treated conservatively as an abort, never as silent success.
    #[error("unexpected response from {operation}: {detail}")]
    UnexpectedResponse {
        operation: &'static str,
        detail: String,
    },

    /// The courier directory does not know this courier.
    #[error("unknown courier {0}")]
    UnknownCourier(CourierId),

    /// The order record does not know this order.
    #[error("unknown order {0}")]
    UnknownOrder(OrderId),

    /// A terminal close/cancel conflicts with a different terminal state
    /// already recorded for the order.
    #[error("order {order_id} is already {status}")]
    AlreadyTerminal { order_id: OrderId, status: String },

    /// Failed to hand a task to the dispatch layer.
    #[error("task dispatch failed: {0}")]
    Dispatch(String),
}

impl SagaError {
    /// Returns true if retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, SagaError::Transport { .. })
    }

    /// Shorthand for a transport failure on a named operation.
    pub fn transport(operation: &'static str, reason: impl Into<String>) -> Self {
        SagaError::Transport {
            operation,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
