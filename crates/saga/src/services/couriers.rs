//! Courier directory contract and in-memory implementation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::{CourierId, IdempotencyKey, OrderId};

use crate::error::{Result, SagaError};
use crate::request::{CourierCandidate, CourierStatus, DeliveryAssignment, DeliveryId};

/// The courier directory collaborator.
///
/// Owns courier availability and delivery records; the saga reads and
/// transitions status but never caches the courier list beyond one poll
/// cycle.
#[async_trait]
pub trait CourierDirectory: Send + Sync {
    /// Lists all couriers currently idle.
    async fn list_idle(&self) -> Result<Vec<CourierCandidate>>;

    /// Transitions one courier's status. A repeated key is a no-op, so a
    /// redelivered step cannot move a second courier.
    async fn set_status(
        &self,
        key: &IdempotencyKey,
        courier_id: CourierId,
        status: CourierStatus,
    ) -> Result<()>;

    /// Creates the delivery record pairing an order with its courier.
    /// A repeated key returns the existing record, whatever courier it
    /// names; callers must treat the returned courier as the one carrying
    /// the order.
    async fn create_delivery_record(
        &self,
        key: &IdempotencyKey,
        order_id: &OrderId,
        courier_id: CourierId,
    ) -> Result<DeliveryAssignment>;
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    statuses: BTreeMap<CourierId, CourierStatus>,
    deliveries: HashMap<IdempotencyKey, DeliveryAssignment>,
    applied_status_keys: HashSet<IdempotencyKey>,
    list_outages: u32,
}

/// In-memory courier directory for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourierDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

impl InMemoryCourierDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a courier with an initial status.
    pub fn add_courier(&self, courier_id: CourierId, status: CourierStatus) {
        self.state
            .write()
            .unwrap()
            .statuses
            .insert(courier_id, status);
    }

    /// Returns a courier's current status, if registered.
    pub fn status_of(&self, courier_id: CourierId) -> Option<CourierStatus> {
        self.state
            .read()
            .unwrap()
            .statuses
            .get(&courier_id)
            .copied()
    }

    /// Number of delivery records created.
    pub fn delivery_count(&self) -> usize {
        self.state.read().unwrap().deliveries.len()
    }

    /// Returns the delivery assignment for an order, if one was created.
    pub fn assignment_for(&self, order_id: &OrderId) -> Option<DeliveryAssignment> {
        self.state
            .read()
            .unwrap()
            .deliveries
            .values()
            .find(|assignment| &assignment.order_id == order_id)
            .cloned()
    }

    /// Makes the next `n` idle-list calls fail at the transport level.
    pub fn fail_listings(&self, n: u32) {
        self.state.write().unwrap().list_outages = n;
    }
}

#[async_trait]
impl CourierDirectory for InMemoryCourierDirectory {
    async fn list_idle(&self) -> Result<Vec<CourierCandidate>> {
        let mut state = self.state.write().unwrap();
        if state.list_outages > 0 {
            state.list_outages -= 1;
            return Err(SagaError::transport("list_idle", "service unavailable"));
        }
        Ok(state
            .statuses
            .iter()
            .filter(|(_, status)| **status == CourierStatus::Idle)
            .map(|(courier_id, status)| CourierCandidate {
                courier_id: *courier_id,
                status: *status,
            })
            .collect())
    }

    async fn set_status(
        &self,
        key: &IdempotencyKey,
        courier_id: CourierId,
        status: CourierStatus,
    ) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.applied_status_keys.contains(key) {
            return Ok(());
        }
        match state.statuses.get_mut(&courier_id) {
            Some(current) => {
                *current = status;
                state.applied_status_keys.insert(key.clone());
                Ok(())
            }
            None => Err(SagaError::UnknownCourier(courier_id)),
        }
    }

    async fn create_delivery_record(
        &self,
        key: &IdempotencyKey,
        order_id: &OrderId,
        courier_id: CourierId,
    ) -> Result<DeliveryAssignment> {
        let mut state = self.state.write().unwrap();
        if let Some(existing) = state.deliveries.get(key) {
            return Ok(existing.clone());
        }
        let assignment = DeliveryAssignment {
            delivery_id: DeliveryId::new(),
            order_id: order_id.clone(),
            courier_id,
            assigned_at: Utc::now(),
        };
        state.deliveries.insert(key.clone(), assignment.clone());
        Ok(assignment)
    }
}
