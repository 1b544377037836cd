//! Client store: the operator's hand-kept CRM ledger.
//!
//! Entries are typed free text with no relationship to services or users.

use std::sync::Arc;

use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Client;

/// Store owning the CRM clients collection.
#[derive(Debug, Clone)]
pub struct ClientStore {
    storage: Storage,
    clients: Arc<RwLock<Vec<Client>>>,
}

impl ClientStore {
    /// Load clients from storage, defaulting to empty.
    pub async fn load(storage: Storage) -> Result<Self> {
        let clients = storage
            .load::<Vec<Client>>(keys::CLIENTS)
            .await?
            .unwrap_or_default();

        Ok(Self {
            storage,
            clients: Arc::new(RwLock::new(clients)),
        })
    }

    /// Append a client and persist.
    pub async fn add(&self, client: Client) -> Result<()> {
        let mut clients = self.clients.write().await;
        clients.push(client);
        self.storage.save(keys::CLIENTS, &*clients).await?;
        Ok(())
    }

    /// All clients, insertion order.
    pub async fn list(&self) -> Vec<Client> {
        self.clients.read().await.clone()
    }

    /// Number of entries.
    pub async fn count(&self) -> usize {
        self.clients.read().await.len()
    }
}
