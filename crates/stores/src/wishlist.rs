//! Wishlist store: a persisted toggle-set of services.
//!
//! Unlike the cart, the wishlist survives reloads. The asymmetry is
//! inherited product behavior and kept as-is.

use std::sync::Arc;

use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Service;

/// Store owning the wishlist.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    storage: Storage,
    entries: Arc<RwLock<Vec<Service>>>,
}

impl WishlistStore {
    /// Load the wishlist from storage, defaulting to empty.
    pub async fn load(storage: Storage) -> Result<Self> {
        let entries = storage
            .load::<Vec<Service>>(keys::WISHLIST)
            .await?
            .unwrap_or_default();

        Ok(Self {
            storage,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Toggle a service: adds it when absent, removes it when present
    /// (matched by service id). Returns `true` when the service is on the
    /// wishlist after the call.
    pub async fn toggle(&self, service: Service) -> Result<bool> {
        let mut entries = self.entries.write().await;

        let present = entries.iter().any(|s| s.id == service.id);
        if present {
            entries.retain(|s| s.id != service.id);
        } else {
            entries.push(service);
        }

        self.storage.save(keys::WISHLIST, &*entries).await?;
        Ok(!present)
    }

    /// Whether a service id is on the wishlist.
    pub async fn contains(&self, service_id: &str) -> bool {
        self.entries.read().await.iter().any(|s| s.id == service_id)
    }

    /// Current wishlist entries.
    pub async fn list(&self) -> Vec<Service> {
        self.entries.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Plan, ServiceStatus};

    fn svc(id: &str) -> Service {
        Service {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            logo_url: String::new(),
            category: Category::Music,
            brand_color: String::new(),
            bg_gradient: String::new(),
            status: ServiceStatus::Online,
            plans: vec![Plan {
                id: format!("{id}_p1"),
                name: "Monthly".to_string(),
                price: 10000,
            }],
            stock: None,
            flash_offer_ends: None,
            wholesale_price: None,
            preview_content: Vec::new(),
        }
    }

    async fn test_storage() -> Storage {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let wishlist = WishlistStore::load(test_storage().await).await.unwrap();

        assert!(wishlist.toggle(svc("spotify")).await.unwrap());
        assert!(wishlist.contains("spotify").await);

        assert!(!wishlist.toggle(svc("spotify")).await.unwrap());
        assert!(!wishlist.contains("spotify").await);
        assert!(wishlist.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_persists_across_reload() {
        let storage = test_storage().await;

        let wishlist = WishlistStore::load(storage.clone()).await.unwrap();
        wishlist.toggle(svc("netflix")).await.unwrap();
        wishlist.toggle(svc("spotify")).await.unwrap();

        let reloaded = WishlistStore::load(storage).await.unwrap();
        assert_eq!(reloaded.list().await.len(), 2);
        assert!(reloaded.contains("netflix").await);
    }
}
