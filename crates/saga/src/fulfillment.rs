//! Step names and user-facing messages of the order fulfillment saga.
//!
//! The message constants are the exact strings the order service exposes to
//! the customer UI; tests assert them verbatim.

/// The saga type identifier.
pub const SAGA_TYPE: &str = "OrderFulfillment";

/// Step name: validate the order against current stock.
pub const STEP_VALIDATE_STOCK: &str = "validate_stock";

/// Step name: decrement stock for the validated order.
pub const STEP_REMOVE_STOCK: &str = "remove_stock";

/// Step name: mark the chosen courier en route.
pub const STEP_ASSIGN_COURIER: &str = "assign_courier";

/// Step name: create the delivery record pairing order and courier.
pub const STEP_CREATE_DELIVERY: &str = "create_delivery";

/// Step name: close the order and return the courier to idle.
pub const STEP_COMPLETE_DELIVERY: &str = "complete_delivery";

/// Progress message once stock is validated.
pub const MSG_ORDER_TAKEN: &str = "Order taken";

/// Progress message emitted on each courier poll cycle that finds nobody.
pub const MSG_FINDING_COURIER: &str = "Finding delivery person ...";

/// Progress message once a courier is assigned.
pub const MSG_COURIER_ASSIGNED: &str = "Delivery person assigned";

/// Progress message once the delivery is in transit.
pub const MSG_ON_THE_ROAD: &str = "Delivery on the road";

/// Terminal message for a delivered order.
pub const MSG_DELIVERED: &str = "Order delivered";

/// Cancellation reason when no courier turns idle within the poll budget.
pub const MSG_NO_COURIER: &str = "No delivery person available";

/// Cancellation reason when a collaborator is unreachable or returns
/// something the saga cannot interpret.
pub const MSG_SERVER_ISSUES: &str = "Order cancelled due to server issues";
