//! Collaborator contracts the saga depends on, with in-memory
//! implementations used by tests and the simulator.

pub mod couriers;
pub mod inventory;
pub mod orders;

pub use couriers::{CourierDirectory, InMemoryCourierDirectory};
pub use inventory::{InMemoryStockService, StockService, StockValidation};
pub use orders::{InMemoryOrderRecord, OrderRecord, OrderStatus};
