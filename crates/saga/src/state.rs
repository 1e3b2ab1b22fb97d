//! Fulfillment state machine.

use serde::{Deserialize, Serialize};

/// The state of an order's fulfillment workflow.
///
/// State transitions:
/// ```text
/// Validating ──► Reserved ──► AssigningCourier ──► EnRoute ──► Delivered
///      │             │               │                │
///      └─────────────┴───────────────┴────────────────┴──► Cancelled / Failed
/// ```
///
/// The saga does not persist this state itself; the order record collaborator
/// owns the durable view. The enum captures the legal progression so each
/// step can assert where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FulfillmentState {
    /// Phase 1 is checking stock for the order.
    #[default]
    Validating,

    /// Stock has been reserved; Phase 2 has been dispatched.
    Reserved,

    /// Phase 2 is polling the courier directory for an idle courier.
    AssigningCourier,

    /// A courier is assigned and the delivery is in transit.
    EnRoute,

    /// The order was delivered and closed (terminal state).
    Delivered,

    /// The order was cancelled with a human-readable reason (terminal state).
    Cancelled,

    /// The workflow failed without reaching a delivery (terminal state).
    Failed,
}

impl FulfillmentState {
    /// Returns true if this is a terminal state (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FulfillmentState::Delivered | FulfillmentState::Cancelled | FulfillmentState::Failed
        )
    }

    /// Returns true if moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: FulfillmentState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            FulfillmentState::Validating => false,
            FulfillmentState::Reserved => matches!(self, FulfillmentState::Validating),
            FulfillmentState::AssigningCourier => matches!(self, FulfillmentState::Reserved),
            FulfillmentState::EnRoute => matches!(self, FulfillmentState::AssigningCourier),
            FulfillmentState::Delivered => matches!(self, FulfillmentState::EnRoute),
            FulfillmentState::Cancelled | FulfillmentState::Failed => true,
        }
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentState::Validating => "Validating",
            FulfillmentState::Reserved => "Reserved",
            FulfillmentState::AssigningCourier => "AssigningCourier",
            FulfillmentState::EnRoute => "EnRoute",
            FulfillmentState::Delivered => "Delivered",
            FulfillmentState::Cancelled => "Cancelled",
            FulfillmentState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for FulfillmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
