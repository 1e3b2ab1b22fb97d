//! Stock service contract and in-memory implementation.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{IdempotencyKey, ItemId, OrderItem};

use crate::error::{Result, SagaError};

/// Outcome of a stock validation call.
///
/// `reason` is written by the stock service and surfaced verbatim in the
/// customer-facing order message when `ok` is false.
#[derive(Debug, Clone)]
pub struct StockValidation {
    /// Whether every requested item is in stock at the requested quantity.
    pub ok: bool,
    /// Human-readable explanation.
    pub reason: String,
}

/// The inventory collaborator.
///
/// Both operations cross a network boundary and may fail or stall;
/// `remove_stock` mutates shared state and therefore carries an
/// idempotency key.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Checks whether the full item list can be served from current stock.
    async fn validate_stock(&self, items: &[OrderItem]) -> Result<StockValidation>;

    /// Decrements stock for the given items. A repeated key is a no-op.
    async fn remove_stock(&self, key: &IdempotencyKey, items: &[OrderItem]) -> Result<()>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    levels: BTreeMap<ItemId, u32>,
    applied_keys: HashSet<IdempotencyKey>,
    removal_calls: u32,
    // Remaining induced transport failures, consumed one per call.
    validate_outages: u32,
    remove_outages: u32,
}

/// In-memory stock service for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockService {
    /// Creates an empty stock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stock service seeded with the given levels.
    pub fn with_stock(levels: impl IntoIterator<Item = (ItemId, u32)>) -> Self {
        let service = Self::new();
        {
            let mut state = service.state.write().unwrap();
            state.levels.extend(levels);
        }
        service
    }

    /// Sets the stock level of one item.
    pub fn set_level(&self, item_id: ItemId, quantity: u32) {
        self.state.write().unwrap().levels.insert(item_id, quantity);
    }

    /// Returns the current stock level of an item, if known.
    pub fn level(&self, item_id: ItemId) -> Option<u32> {
        self.state.read().unwrap().levels.get(&item_id).copied()
    }

    /// Makes the next `n` validate calls fail at the transport level.
    pub fn fail_validations(&self, n: u32) {
        self.state.write().unwrap().validate_outages = n;
    }

    /// Makes the next `n` remove calls fail at the transport level.
    pub fn fail_removals(&self, n: u32) {
        self.state.write().unwrap().remove_outages = n;
    }

    /// Number of remove calls that actually decremented stock.
    pub fn removal_count(&self) -> u32 {
        self.state.read().unwrap().removal_calls
    }
}

fn check_levels(levels: &BTreeMap<ItemId, u32>, items: &[OrderItem]) -> StockValidation {
    for item in items {
        match levels.get(&item.item_id) {
            None => {
                return StockValidation {
                    ok: false,
                    reason: format!("Item with ID={} not found", item.item_id),
                };
            }
            Some(available) if *available < item.quantity => {
                return StockValidation {
                    ok: false,
                    reason: format!("Insufficient stock for item {}", item.item_id),
                };
            }
            Some(_) => {}
        }
    }
    StockValidation {
        ok: true,
        reason: "Items currently in stock".to_string(),
    }
}

#[async_trait]
impl StockService for InMemoryStockService {
    async fn validate_stock(&self, items: &[OrderItem]) -> Result<StockValidation> {
        let mut state = self.state.write().unwrap();
        if state.validate_outages > 0 {
            state.validate_outages -= 1;
            return Err(SagaError::transport("validate_stock", "service unavailable"));
        }
        Ok(check_levels(&state.levels, items))
    }

    async fn remove_stock(&self, key: &IdempotencyKey, items: &[OrderItem]) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.remove_outages > 0 {
            state.remove_outages -= 1;
            return Err(SagaError::transport("remove_stock", "service unavailable"));
        }
        if state.applied_keys.contains(key) {
            return Ok(());
        }

        // Same guard the stock service applies on its own endpoint: never
        // decrement below zero.
        let validation = check_levels(&state.levels, items);
        if !validation.ok {
            return Err(SagaError::Rejected(validation.reason));
        }

        for item in items {
            if let Some(level) = state.levels.get_mut(&item.item_id) {
                *level -= item.quantity;
            }
        }
        state.applied_keys.insert(key.clone());
        state.removal_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::OrderId;

    fn key(step: &str) -> IdempotencyKey {
        IdempotencyKey::new(OrderId::new("ord-1"), step)
    }

    #[tokio::test]
    async fn test_validate_passes_when_stocked() {
        let service = InMemoryStockService::with_stock([(ItemId::new(1), 5)]);
        let result = service
            .validate_stock(&[OrderItem::new(ItemId::new(1), 2)])
            .await
            .unwrap();
        assert!(result.ok);
        assert_eq!(result.reason, "Items currently in stock");
    }

    #[tokio::test]
    async fn test_validate_reports_insufficient_stock() {
        let service = InMemoryStockService::with_stock([(ItemId::new(2), 3)]);
        let result = service
            .validate_stock(&[OrderItem::new(ItemId::new(2), 10)])
            .await
            .unwrap();
        assert!(!result.ok);
        assert_eq!(result.reason, "Insufficient stock for item 2");
    }

    #[tokio::test]
    async fn test_validate_reports_unknown_item() {
        let service = InMemoryStockService::new();
        let result = service
            .validate_stock(&[OrderItem::new(ItemId::new(9), 1)])
            .await
            .unwrap();
        assert!(!result.ok);
        assert_eq!(result.reason, "Item with ID=9 not found");
    }

    #[tokio::test]
    async fn test_validate_checks_every_line() {
        let service = InMemoryStockService::with_stock([(ItemId::new(1), 5), (ItemId::new(2), 1)]);
        let result = service
            .validate_stock(&[
                OrderItem::new(ItemId::new(1), 1),
                OrderItem::new(ItemId::new(2), 4),
            ])
            .await
            .unwrap();
        assert!(!result.ok);
        assert_eq!(result.reason, "Insufficient stock for item 2");
    }

    #[tokio::test]
    async fn test_remove_decrements_levels() {
        let service = InMemoryStockService::new();
        service.set_level(ItemId::new(1), 5);
        service
            .remove_stock(&key("remove_stock"), &[OrderItem::new(ItemId::new(1), 2)])
            .await
            .unwrap();
        assert_eq!(service.level(ItemId::new(1)), Some(3));
        assert_eq!(service.removal_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent_per_key() {
        let service = InMemoryStockService::with_stock([(ItemId::new(1), 5)]);
        let items = [OrderItem::new(ItemId::new(1), 2)];
        let k = key("remove_stock");
        service.remove_stock(&k, &items).await.unwrap();
        service.remove_stock(&k, &items).await.unwrap();
        assert_eq!(service.level(ItemId::new(1)), Some(3));
        assert_eq!(service.removal_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_rejects_when_understocked() {
        let service = InMemoryStockService::with_stock([(ItemId::new(1), 1)]);
        let result = service
            .remove_stock(&key("remove_stock"), &[OrderItem::new(ItemId::new(1), 2)])
            .await;
        assert!(matches!(result, Err(SagaError::Rejected(_))));
        assert_eq!(service.level(ItemId::new(1)), Some(1));
    }

    #[tokio::test]
    async fn test_induced_outages_are_consumed() {
        let service = InMemoryStockService::with_stock([(ItemId::new(1), 5)]);
        service.fail_validations(1);

        let err = service
            .validate_stock(&[OrderItem::new(ItemId::new(1), 1)])
            .await
            .unwrap_err();
        assert!(err.is_transient());

        let result = service
            .validate_stock(&[OrderItem::new(ItemId::new(1), 1)])
            .await
            .unwrap();
        assert!(result.ok);
    }
}
