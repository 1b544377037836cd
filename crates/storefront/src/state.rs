//! Application state: every store, constructed once at startup.
//!
//! One logical instance per running app, passed to consumers explicitly —
//! no ambient singletons. Stores are cheap cloneable handles over shared
//! state, so the flash-offer scan task can hold its own copies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::Storage;
use stores::cart::CartStore;
use stores::catalog::CatalogStore;
use stores::clients::ClientStore;
use stores::config::ConfigStore;
use stores::identity::IdentityStore;
use stores::notifications::NotificationStore;
use stores::orders::OrderStore;
use stores::reviews::ReviewStore;
use stores::testimonials::TestimonialStore;
use stores::wishlist::WishlistStore;

/// Months shown on the dashboard revenue chart.
const DASHBOARD_WINDOW_MONTHS: u32 = 6;

/// All dashboard metrics in one snapshot.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub revenue: i64,
    pub status_counts: reports::StatusCounts,
    pub popularity: Vec<reports::ServicePopularity>,
    pub monthly: Vec<reports::MonthBucket>,
    pub review_kpis: reports::ReviewKpis,
    pub customers: usize,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub identity: IdentityStore,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub orders: OrderStore,
    pub reviews: ReviewStore,
    pub notifications: NotificationStore,
    pub clients: ClientStore,
    pub config: ConfigStore,
    pub testimonials: TestimonialStore,
    operator_secret: String,
    operator: Arc<AtomicBool>,
    reseller: Arc<AtomicBool>,
}

impl AppState {
    /// Construct every store from storage, seeding defaults on first run.
    pub async fn init(
        storage: Storage,
        operator_secret: String,
        now: DateTime<Utc>,
    ) -> stores::Result<Self> {
        Ok(Self {
            catalog: CatalogStore::load_or_seed(storage.clone(), now).await?,
            identity: IdentityStore::load(storage.clone()).await?,
            cart: CartStore::new(),
            wishlist: WishlistStore::load(storage.clone()).await?,
            orders: OrderStore::load(storage.clone()).await?,
            reviews: ReviewStore::load(storage.clone()).await?,
            notifications: NotificationStore::load_or_seed(storage.clone(), now).await?,
            clients: ClientStore::load(storage.clone()).await?,
            config: ConfigStore::load_or_seed(storage).await?,
            testimonials: TestimonialStore::new(),
            operator_secret,
            operator: Arc::new(AtomicBool::new(false)),
            reseller: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Unlock operator mutations with the shared secret. Wrong secret
    /// leaves the gate closed.
    pub fn unlock_operator(&self, secret: &str) -> bool {
        let unlocked = secret == self.operator_secret;
        if unlocked {
            self.operator.store(true, Ordering::Relaxed);
        }
        unlocked
    }

    /// Re-lock operator mutations.
    pub fn lock_operator(&self) {
        self.operator.store(false, Ordering::Relaxed);
    }

    /// Whether operator mutations are currently unlocked.
    pub fn is_operator(&self) -> bool {
        self.operator.load(Ordering::Relaxed)
    }

    /// Flip reseller pricing on or off, returning the new value. Unlike the
    /// operator gate this needs no secret; it only switches which price the
    /// catalog displays.
    pub fn toggle_reseller(&self) -> bool {
        !self.reseller.fetch_xor(true, Ordering::Relaxed)
    }

    /// Whether wholesale prices are currently shown.
    pub fn is_reseller(&self) -> bool {
        self.reseller.load(Ordering::Relaxed)
    }

    /// Compute the full dashboard from current snapshots.
    pub async fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        let services = self.catalog.list().await;
        let orders = self.orders.list().await;
        let reviews = self.reviews.list().await;
        let clients = self.clients.list().await;
        let users = self.identity.user_count().await;

        DashboardSnapshot {
            revenue: reports::total_revenue(&orders),
            status_counts: reports::orders_by_status(&orders),
            popularity: reports::service_popularity(&services, &orders),
            monthly: reports::monthly_revenue(&orders, now, DASHBOARD_WINDOW_MONTHS),
            review_kpis: reports::review_kpis(&reviews),
            customers: reports::customer_count(&clients, users),
        }
    }
}
