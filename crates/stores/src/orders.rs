//! Order store: the append-only purchase ledger.
//!
//! Orders are snapshots — service and plan display fields are copied in at
//! checkout so later catalog edits or deletions never rewrite history. The
//! core provides no path to edit an order once placed.

use std::sync::Arc;

use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Order;

/// Store owning the order ledger.
#[derive(Debug, Clone)]
pub struct OrderStore {
    storage: Storage,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderStore {
    /// Load the ledger from storage, defaulting to empty.
    pub async fn load(storage: Storage) -> Result<Self> {
        let orders = storage
            .load::<Vec<Order>>(keys::ORDERS)
            .await?
            .unwrap_or_default();

        Ok(Self {
            storage,
            orders: Arc::new(RwLock::new(orders)),
        })
    }

    /// Append an order, most recent first.
    pub async fn place(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(0, order);
        self.storage.save(keys::ORDERS, &*orders).await?;
        Ok(())
    }

    /// Full ledger, most recent first.
    pub async fn list(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Orders placed by one user.
    pub async fn for_user(&self, user_id: &str) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }
}
