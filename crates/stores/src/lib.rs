//! Entity models and application stores for ComboKart.
//!
//! Each store owns one or more persisted collections exclusively: it
//! initializes from storage (falling back to seed data), mutates in memory,
//! and ends every mutating operation with an explicit whole-document save.
//! Cross-store coupling happens only through reads — checkout reads the
//! session and writes orders plus notifications, registration reads the
//! user list and credits the referrer in place.
//!
//! Derived views (catalog queries, cart totals, dashboard metrics) are
//! recomputed on read and never cached.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use storage::Storage;
//! use stores::catalog::CatalogStore;
//! use stores::query::{CatalogQuery, SortKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Storage::connect("sqlite:combokart.db?mode=rwc").await?;
//!     storage.migrate().await?;
//!
//!     let catalog = CatalogStore::load_or_seed(storage, Utc::now()).await?;
//!     let cheap_first = stores::query::search(
//!         &catalog.list().await,
//!         &CatalogQuery { sort: SortKey::PriceAsc, ..Default::default() },
//!     );
//!     println!("{} services", cheap_first.len());
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod notifications;
pub mod orders;
pub mod query;
pub mod reviews;
pub mod seed;
pub mod testimonials;
pub mod wishlist;

pub use error::{Result, StoreError};
pub use models::{
    AppNotification, CartLine, Category, Client, GlobalConfig, NotificationKind, Order,
    OrderStatus, PaymentConfig, Plan, Review, Service, ServiceStatus, SessionUser, Testimonial,
    UserRecord, UserRole,
};
