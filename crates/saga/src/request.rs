//! Value objects exchanged between the saga and its collaborators.

use chrono::{DateTime, Utc};
use common::{CourierId, OrderId, OrderItem};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The record handed to the saga when an order is created.
///
/// Created once by the order service and consumed once; the saga never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFulfillmentRequest {
    /// The order to fulfill.
    pub order_id: OrderId,
    /// Customer distance in kilometers; drives the simulated transit time.
    /// Always positive.
    pub distance: f64,
    /// The order lines, in the order the customer placed them.
    pub items: Vec<OrderItem>,
}

impl OrderFulfillmentRequest {
    /// Creates a fulfillment request for an order.
    pub fn new(order_id: OrderId, distance: f64, items: Vec<OrderItem>) -> Self {
        Self {
            order_id,
            distance,
            items,
        }
    }
}

/// Availability status of a courier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    /// Not assigned to an in-progress delivery.
    Idle,
    /// On the road delivering an order.
    EnRoute,
}

impl CourierStatus {
    /// Returns the status name as the directory's wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourierStatus::Idle => "idle",
            CourierStatus::EnRoute => "en_route",
        }
    }
}

impl std::fmt::Display for CourierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A courier as reported by the courier directory during one poll cycle.
///
/// The saga never holds candidates beyond the cycle that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierCandidate {
    /// The courier's directory ID.
    pub courier_id: CourierId,
    /// Availability at the time of the poll.
    pub status: CourierStatus,
}

/// Identifier of a delivery record created by the courier directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Creates a new random delivery ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pairing of an order with the courier delivering it.
///
/// Created exactly once per successfully fulfilled order, immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAssignment {
    /// The delivery record's ID.
    pub delivery_id: DeliveryId,
    /// The order being delivered.
    pub order_id: OrderId,
    /// The courier carrying it.
    pub courier_id: CourierId,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
}
