//! Document keys for each persisted collection.
//!
//! Keys are versioned informally by suffix: changing a document's shape means
//! bumping the suffix and abandoning data under the old key. There is no
//! migration path between key versions.

/// Catalog of sellable services.
pub const SERVICES: &str = "services_v2";

/// Registered user records (includes passwords — prototype-grade).
pub const USERS: &str = "users_v1";

/// Current session projection of the logged-in user.
pub const SESSION: &str = "session_v1";

/// Manually entered CRM clients.
pub const CLIENTS: &str = "clients_v1";

/// Wishlist entries.
pub const WISHLIST: &str = "wishlist_v1";

/// Global promotional/banner configuration.
pub const GLOBAL_CONFIG: &str = "global_config_v2";

/// Payment instruction configuration.
pub const PAYMENT_CONFIG: &str = "payment_config_v2";

/// Service reviews.
pub const REVIEWS: &str = "reviews_v1";

/// Order ledger.
pub const ORDERS: &str = "orders_v1";

/// Notification feed.
pub const NOTIFICATIONS: &str = "notifications_v1";
