//! Task dispatch layer for the fulfillment saga.
//!
//! Implements the dispatch seam the saga depends on: an in-memory queue
//! with delayed delivery and a worker that executes saga steps,
//! redelivering failed ones for at-least-once semantics. One order's wait
//! (courier polling, transit) never blocks a worker; waits are timer-driven
//! re-enqueues.

pub mod config;
pub mod queue;
pub mod worker;

pub use config::DispatchConfig;
pub use queue::{Delivery, InMemoryTaskQueue, TaskReceiver, channel};
pub use worker::Worker;
