//! Notification store: the system-generated feed.
//!
//! Prepended append-only entries with a read flag. Besides seed data and
//! order confirmations, a periodic scan announces active flash offers. The
//! scan deduplicates on an explicit `(service id, offer end)` key carried by
//! the notification — not on title text — and checks the live collection
//! while holding the write lock, so interleaved scans cannot double-post.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use storage::{keys, Storage};
use tokio::sync::RwLock;

use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::models::{AppNotification, NotificationKind, Order, Service};
use crate::seed;

/// Store owning the notification feed.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    storage: Storage,
    notifications: Arc<RwLock<Vec<AppNotification>>>,
}

impl NotificationStore {
    /// Load the feed from storage, seeding the welcome entries when no
    /// usable document exists. An empty document counts as unusable, same
    /// as the catalog.
    pub async fn load_or_seed(storage: Storage, now: DateTime<Utc>) -> Result<Self> {
        let notifications = match storage.load::<Vec<AppNotification>>(keys::NOTIFICATIONS).await? {
            Some(notifications) if !notifications.is_empty() => notifications,
            _ => {
                let seeded = seed::default_notifications(now);
                storage.save(keys::NOTIFICATIONS, &seeded).await?;
                seeded
            }
        };

        Ok(Self {
            storage,
            notifications: Arc::new(RwLock::new(notifications)),
        })
    }

    /// Full feed, most recent first.
    pub async fn list(&self) -> Vec<AppNotification> {
        self.notifications.read().await.clone()
    }

    /// Number of unread entries.
    pub async fn unread_count(&self) -> usize {
        self.notifications.read().await.iter().filter(|n| !n.read).count()
    }

    /// Prepend an entry and persist.
    pub async fn push(&self, notification: AppNotification) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        notifications.insert(0, notification);
        self.storage.save(keys::NOTIFICATIONS, &*notifications).await?;
        Ok(())
    }

    /// Mark one entry read. Unknown id is a no-op.
    pub async fn mark_read(&self, id: &str) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        let Some(entry) = notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(());
        };
        entry.read = true;
        self.storage.save(keys::NOTIFICATIONS, &*notifications).await?;
        Ok(())
    }

    /// Mark every entry read.
    pub async fn mark_all_read(&self) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        for entry in notifications.iter_mut() {
            entry.read = true;
        }
        self.storage.save(keys::NOTIFICATIONS, &*notifications).await?;
        Ok(())
    }

    /// Announce active flash offers, at most one unread entry per offer.
    ///
    /// An offer is identified by its dedup key; an unread entry with the
    /// same key suppresses a repeat. Returns the number of entries added.
    pub async fn scan_flash_offers(
        &self,
        services: &[Service],
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let mut notifications = self.notifications.write().await;
        let mut added = 0;

        for service in services.iter().filter(|s| s.flash_offer_active(now)) {
            let key = offer_key(service);
            let already_announced = notifications
                .iter()
                .any(|n| !n.read && n.offer_key.as_deref() == Some(key.as_str()));
            if already_announced {
                continue;
            }

            notifications.insert(
                0,
                AppNotification {
                    id: format!("offer_{}", uuid::Uuid::new_v4().simple()),
                    title: format!("Flash offer: {}", service.name),
                    message: format!("{} has an active offer. Don't miss it!", service.name),
                    kind: NotificationKind::Offer,
                    date: now,
                    read: false,
                    offer_key: Some(key),
                },
            );
            added += 1;
        }

        if added > 0 {
            self.storage.save(keys::NOTIFICATIONS, &*notifications).await?;
            tracing::info!(added, "Announced flash offers");
        }
        Ok(added)
    }

    /// Feed entry confirming a freshly placed order.
    pub fn order_placed(order: &Order, now: DateTime<Utc>) -> AppNotification {
        AppNotification {
            id: format!("order_{}", uuid::Uuid::new_v4().simple()),
            title: "Order registered".to_string(),
            message: format!(
                "Your order for {} ({}) was registered.",
                order.service_name, order.plan_name
            ),
            kind: NotificationKind::Info,
            date: now,
            read: false,
            offer_key: None,
        }
    }
}

/// Stable dedup key for one flash-offer window of one service.
fn offer_key(service: &Service) -> String {
    let ends = service.flash_offer_ends.map(|t| t.timestamp()).unwrap_or(0);
    format!("{}:{}", service.id, ends)
}

/// Drive the flash-offer scan on a fixed period until the task is aborted.
pub fn spawn_flash_offer_scan(
    catalog: CatalogStore,
    notifications: NotificationStore,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The immediate first tick would re-announce on every boot.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let services = catalog.list().await;
            if let Err(e) = notifications.scan_flash_offers(&services, Utc::now()).await {
                tracing::warn!(error = %e, "Flash-offer scan failed");
            }
        }
    })
}
