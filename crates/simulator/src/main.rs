//! Batch simulation of the fulfillment saga.
//!
//! Seeds an in-memory stock catalog and courier pool, generates a batch of
//! randomized orders (some deliberately oversized so cancellations show up),
//! runs the worker until every saga reaches a terminal state, and prints a
//! summary.
//!
//! Environment:
//! - `ORDER_COUNT` — orders to generate (default: 10)
//! - `COURIER_COUNT` — couriers in the pool (default: 3)
//! - `RUST_LOG` — tracing filter (default: `info`)

use std::sync::Arc;
use std::time::Duration;

use common::{CourierId, ItemId, OrderId, OrderItem};
use dispatch::{DispatchConfig, Worker, channel};
use rand::Rng;
use saga::{
    CourierStatus, FulfillmentConfig, FulfillmentTask, InMemoryCourierDirectory,
    InMemoryOrderRecord, InMemoryStockService, OrderFulfillmentRequest, RetryPolicy,
    SagaCoordinator, TaskDispatcher,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

fn env_count(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Production timings compressed so a batch finishes in seconds.
fn simulation_config() -> FulfillmentConfig {
    FulfillmentConfig {
        poll_interval: Duration::from_millis(300),
        max_poll_cycles: 40,
        transit_base_secs: (1, 2),
        transit_secs_per_km: 0.2,
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(400),
        },
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let order_count = env_count("ORDER_COUNT", 10);
    let courier_count = env_count("COURIER_COUNT", 3);

    let catalog = [
        (ItemId::new(1), 40u32),
        (ItemId::new(2), 25),
        (ItemId::new(3), 12),
        (ItemId::new(4), 4),
    ];
    let stock = InMemoryStockService::with_stock(catalog);
    let couriers = InMemoryCourierDirectory::new();
    for id in 1..=courier_count {
        couriers.add_courier(CourierId::new(id), CourierStatus::Idle);
    }
    let orders = InMemoryOrderRecord::new();

    let (queue, receiver) = channel();
    let coordinator = Arc::new(SagaCoordinator::new(
        stock.clone(),
        couriers.clone(),
        orders.clone(),
        queue.clone(),
        simulation_config(),
    ));
    let mut worker = Worker::new(
        coordinator,
        queue.clone(),
        receiver,
        DispatchConfig::from_env(),
    );

    tracing::info!(order_count, courier_count, "starting fulfillment simulation");

    let mut order_ids = Vec::new();
    {
        let mut rng = rand::rng();
        for _ in 0..order_count {
            let order_id = OrderId::new(Uuid::new_v4().to_string());
            // Item 5 does not exist and item 4 runs out quickly, so some
            // orders exercise the cancellation paths.
            let item_id = ItemId::new(rng.random_range(1..=5));
            let quantity = rng.random_range(1..=4);
            let distance = rng.random_range(1..=12) as f64;

            orders.open(order_id.clone());
            let request = OrderFulfillmentRequest::new(
                order_id.clone(),
                distance,
                vec![OrderItem::new(item_id, quantity)],
            );
            if let Err(err) = queue.dispatch(FulfillmentTask::ProcessOrder(request)).await {
                tracing::error!(error = %err, "failed to enqueue order");
            }
            order_ids.push(order_id);
        }
    }

    worker.run_until_idle().await;

    println!("--- simulation results ---");
    let mut delivered = 0;
    let mut cancelled = 0;
    for order_id in &order_ids {
        let status = orders
            .status(order_id)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let message = orders
            .message(order_id)
            .unwrap_or_else(|| "no message".to_string());
        match status.as_str() {
            "completed" => delivered += 1,
            "cancelled" => cancelled += 1,
            _ => {}
        }
        println!("{order_id}  {status:<9}  {message}");
    }
    println!("delivered: {delivered}, cancelled: {cancelled}");

    println!("--- remaining stock ---");
    for (item_id, _) in catalog {
        if let Some(level) = stock.level(item_id) {
            println!("item {item_id}: {level}");
        }
    }
    println!("deliveries created: {}", couriers.delivery_count());
}
