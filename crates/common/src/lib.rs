//! Shared identifiers and value objects used across the fulfillment workspace.

pub mod types;

pub use types::{CourierId, IdempotencyKey, ItemId, OrderId, OrderItem};
