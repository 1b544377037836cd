//! Catalog store: the sellable services and their nested plans.
//!
//! Operator-only mutations go through [`ServiceEdit`], a closed command enum
//! rather than a stringly-typed field patch, so every editable field is
//! matched exhaustively at compile time. Deleting a service is gated on an
//! explicit [`Confirmation`]; orders and reviews that reference a deleted
//! service are left behind as orphaned history, never cascaded.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Category, Plan, Service, ServiceStatus};
use crate::seed;

/// Default plan prices for a freshly added service.
const DEFAULT_PLAN_PRICES: [i64; 2] = [10000, 20000];

/// Stock assigned to a freshly added service.
const DEFAULT_STOCK: i64 = 50;

/// One editable field of a service. Plan edits carry the plan id and touch
/// only the matching plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEdit {
    Rename(String),
    SetDescription(String),
    SetLogoUrl(String),
    SetCategory(Category),
    SetBrandColor(String),
    SetGradient(String),
    SetStatus(ServiceStatus),
    SetStock(Option<i64>),
    SetFlashOfferEnds(Option<DateTime<Utc>>),
    SetWholesalePrice(Option<i64>),
    RepricePlan { plan_id: String, price: i64 },
    RenamePlan { plan_id: String, name: String },
}

/// Human-in-the-loop gate for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Store owning the service catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    storage: Storage,
    services: Arc<RwLock<Vec<Service>>>,
}

impl CatalogStore {
    /// Load the catalog from storage, seeding the default lineup when no
    /// usable document exists.
    pub async fn load_or_seed(storage: Storage, now: DateTime<Utc>) -> Result<Self> {
        let services = match storage.load::<Vec<Service>>(keys::SERVICES).await? {
            Some(services) if !services.is_empty() => services,
            _ => {
                let seeded = seed::default_services(now);
                storage.save(keys::SERVICES, &seeded).await?;
                tracing::info!(count = seeded.len(), "Seeded default catalog");
                seeded
            }
        };

        Ok(Self {
            storage,
            services: Arc::new(RwLock::new(services)),
        })
    }

    /// Current catalog, insertion order (newest first).
    pub async fn list(&self) -> Vec<Service> {
        self.services.read().await.clone()
    }

    /// Look up one service by id.
    pub async fn get(&self, service_id: &str) -> Option<Service> {
        self.services
            .read()
            .await
            .iter()
            .find(|s| s.id == service_id)
            .cloned()
    }

    /// Add a new service with placeholder content and two default plans,
    /// prepended to the catalog.
    pub async fn add_service(&self, category: Category, now: DateTime<Utc>) -> Result<Service> {
        let id = format!("svc_{}", uuid::Uuid::new_v4().simple());
        let (name, brand_color, bg_gradient) = match category {
            Category::Combo => ("New Combo", "#FFD700", "from-yellow-900 to-black"),
            _ => ("New Service", "#808080", "from-gray-900 to-black"),
        };

        let service = Service {
            id: id.clone(),
            name: name.to_string(),
            description: "Description here...".to_string(),
            logo_url: "https://cdn.combokart.app/logos/placeholder.png".to_string(),
            category,
            brand_color: brand_color.to_string(),
            bg_gradient: bg_gradient.to_string(),
            status: ServiceStatus::Online,
            plans: DEFAULT_PLAN_PRICES
                .iter()
                .enumerate()
                .map(|(i, &price)| Plan {
                    id: format!("{}_p{}", id, i + 1),
                    name: format!("Plan {}", i + 1),
                    price,
                })
                .collect(),
            stock: Some(DEFAULT_STOCK),
            flash_offer_ends: None,
            wholesale_price: None,
            preview_content: Vec::new(),
        };

        let mut services = self.services.write().await;
        services.insert(0, service.clone());
        self.storage.save(keys::SERVICES, &*services).await?;

        tracing::info!(service_id = %service.id, ?category, at = %now, "Added service");
        Ok(service)
    }

    /// Apply one edit to the named service.
    ///
    /// Returns `false` without touching state when the service id (or, for
    /// plan edits, the plan id) does not match anything.
    pub async fn apply(&self, service_id: &str, edit: ServiceEdit) -> Result<bool> {
        let mut services = self.services.write().await;

        let Some(service) = services.iter_mut().find(|s| s.id == service_id) else {
            return Ok(false);
        };

        let applied = match edit {
            ServiceEdit::Rename(name) => {
                service.name = name;
                true
            }
            ServiceEdit::SetDescription(description) => {
                service.description = description;
                true
            }
            ServiceEdit::SetLogoUrl(logo_url) => {
                service.logo_url = logo_url;
                true
            }
            ServiceEdit::SetCategory(category) => {
                service.category = category;
                true
            }
            ServiceEdit::SetBrandColor(color) => {
                service.brand_color = color;
                true
            }
            ServiceEdit::SetGradient(gradient) => {
                service.bg_gradient = gradient;
                true
            }
            ServiceEdit::SetStatus(status) => {
                service.status = status;
                true
            }
            ServiceEdit::SetStock(stock) => {
                service.stock = stock;
                true
            }
            ServiceEdit::SetFlashOfferEnds(ends) => {
                service.flash_offer_ends = ends;
                true
            }
            ServiceEdit::SetWholesalePrice(price) => {
                service.wholesale_price = price;
                true
            }
            ServiceEdit::RepricePlan { plan_id, price } => {
                match service.plans.iter_mut().find(|p| p.id == plan_id) {
                    Some(plan) => {
                        plan.price = price;
                        true
                    }
                    None => false,
                }
            }
            ServiceEdit::RenamePlan { plan_id, name } => {
                match service.plans.iter_mut().find(|p| p.id == plan_id) {
                    Some(plan) => {
                        plan.name = name;
                        true
                    }
                    None => false,
                }
            }
        };

        if applied {
            self.storage.save(keys::SERVICES, &*services).await?;
        }
        Ok(applied)
    }

    /// Delete a service. Declined confirmation aborts with no state change.
    ///
    /// Returns `true` only when a service was actually removed.
    pub async fn delete_service(
        &self,
        service_id: &str,
        confirmation: Confirmation,
    ) -> Result<bool> {
        if confirmation != Confirmation::Confirmed {
            return Ok(false);
        }

        let mut services = self.services.write().await;
        let before = services.len();
        services.retain(|s| s.id != service_id);

        if services.len() == before {
            return Ok(false);
        }

        self.storage.save(keys::SERVICES, &*services).await?;
        tracing::info!(service_id, "Deleted service");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_catalog() -> CatalogStore {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        CatalogStore::load_or_seed(storage, Utc::now()).await.unwrap()
    }

    #[tokio::test]
    async fn test_seeds_on_first_load() {
        let catalog = test_catalog().await;
        let services = catalog.list().await;
        assert!(!services.is_empty());
        assert!(services.iter().all(|s| !s.plans.is_empty()));
    }

    #[tokio::test]
    async fn test_reload_round_trips_catalog() {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();

        let catalog = CatalogStore::load_or_seed(storage.clone(), Utc::now())
            .await
            .unwrap();
        let added = catalog.add_service(Category::Iptv, Utc::now()).await.unwrap();
        let before = catalog.list().await;

        let reloaded = CatalogStore::load_or_seed(storage, Utc::now()).await.unwrap();
        let after = reloaded.list().await;

        assert_eq!(before, after);
        assert_eq!(after[0].id, added.id);
        assert_eq!(after[0].plans.len(), 2);
    }

    #[tokio::test]
    async fn test_add_service_prepends_with_default_plans() {
        let catalog = test_catalog().await;
        let before = catalog.list().await.len();

        let added = catalog.add_service(Category::Combo, Utc::now()).await.unwrap();

        let services = catalog.list().await;
        assert_eq!(services.len(), before + 1);
        assert_eq!(services[0].id, added.id);
        assert_eq!(services[0].name, "New Combo");
        let prices: Vec<i64> = services[0].plans.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10000, 20000]);
    }

    #[tokio::test]
    async fn test_reprice_plan_touches_only_that_plan() {
        let catalog = test_catalog().await;
        let before = catalog.list().await;
        let target = before.iter().find(|s| s.plans.len() >= 2).unwrap().clone();
        let plan_id = target.plans[0].id.clone();

        let applied = catalog
            .apply(
                &target.id,
                ServiceEdit::RepricePlan {
                    plan_id: plan_id.clone(),
                    price: 99999,
                },
            )
            .await
            .unwrap();
        assert!(applied);

        let after = catalog.list().await;
        for (was, is) in before.iter().zip(after.iter()) {
            if is.id != target.id {
                assert_eq!(was, is);
                continue;
            }
            for (old_plan, new_plan) in was.plans.iter().zip(is.plans.iter()) {
                if new_plan.id == plan_id {
                    assert_eq!(new_plan.price, 99999);
                    assert_eq!(new_plan.name, old_plan.name);
                } else {
                    assert_eq!(old_plan, new_plan);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_edit_unknown_service_is_noop() {
        let catalog = test_catalog().await;
        let before = catalog.list().await;

        let applied = catalog
            .apply("no_such_service", ServiceEdit::Rename("X".to_string()))
            .await
            .unwrap();

        assert!(!applied);
        assert_eq!(before, catalog.list().await);
    }

    #[tokio::test]
    async fn test_reprice_unknown_plan_is_noop() {
        let catalog = test_catalog().await;
        let before = catalog.list().await;
        let target_id = before[0].id.clone();

        let applied = catalog
            .apply(
                &target_id,
                ServiceEdit::RepricePlan {
                    plan_id: "no_such_plan".to_string(),
                    price: 1,
                },
            )
            .await
            .unwrap();

        assert!(!applied);
        assert_eq!(before, catalog.list().await);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let catalog = test_catalog().await;
        let before = catalog.list().await;
        let target_id = before[0].id.clone();

        let deleted = catalog
            .delete_service(&target_id, Confirmation::Declined)
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(before, catalog.list().await);

        let deleted = catalog
            .delete_service(&target_id, Confirmation::Confirmed)
            .await
            .unwrap();
        assert!(deleted);

        let after = catalog.list().await;
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|s| s.id != target_id));
    }
}
