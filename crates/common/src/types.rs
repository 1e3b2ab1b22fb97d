use serde::{Deserialize, Serialize};

/// Unique identifier for an order.
///
/// Orders are created by the order service; to the fulfillment workflow the
/// identifier is opaque. Wrapping the string prevents mixing it up with
/// other string-based identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an order ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a courier in the courier directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourierId(u64);

impl CourierId {
    /// Creates a courier ID from a raw numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CourierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an item ID from a raw numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line of an order: an item and the quantity requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The stock item being ordered.
    pub item_id: ItemId,
    /// How many units of the item.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates an order line.
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// Deduplication key for a state-mutating collaborator call.
///
/// The task queue redelivers steps at-least-once, so every mutation carries
/// a key derived from the order and the step name. Collaborators treat a
/// repeated key as an already-applied call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey {
    order_id: OrderId,
    step: String,
}

impl IdempotencyKey {
    /// Builds the key for one step of one order's workflow.
    pub fn new(order_id: OrderId, step: impl Into<String>) -> Self {
        Self {
            order_id,
            step: step.into(),
        }
    }

    /// The order this key belongs to.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The step name this key belongs to.
    pub fn step(&self) -> &str {
        &self.step
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.order_id, self.step)
    }
}
