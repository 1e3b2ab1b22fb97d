//! Order fulfillment saga for the food delivery platform.
//!
//! The saga coordinates three independently-owned collaborators (stock,
//! courier directory, order record) through a two-phase workflow:
//!
//! 1. **Phase 1** validates the order against current stock and, on success,
//!    reserves it by decrementing the counts.
//! 2. **Phase 2** searches for an idle courier in bounded poll cycles,
//!    assigns one at random, simulates transit, and closes the order.
//!
//! Every wait is expressed as a delayed re-enqueue through the
//! [`TaskDispatcher`] seam, so no worker blocks while an order is waiting
//! for a courier or riding out its transit time. Steps run at-least-once;
//! mutating collaborator calls carry idempotency keys so redelivery cannot
//! double-apply side effects.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fulfillment;
pub mod request;
pub mod retry;
pub mod services;
pub mod state;
pub mod task;

pub use config::FulfillmentConfig;
pub use coordinator::{CourierSearch, Phase1Outcome, SagaCoordinator};
pub use error::{Result, SagaError};
pub use request::{
    CourierCandidate, CourierStatus, DeliveryAssignment, DeliveryId, OrderFulfillmentRequest,
};
pub use retry::RetryPolicy;
pub use services::{
    CourierDirectory, InMemoryCourierDirectory, InMemoryOrderRecord, InMemoryStockService,
    OrderRecord, OrderStatus, StockService, StockValidation,
};
pub use state::FulfillmentState;
pub use task::{FulfillmentTask, TaskDispatcher};
