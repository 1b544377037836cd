//! Entity models persisted by the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog category of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Streaming,
    Music,
    Combo,
    Iptv,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Combo,
        Category::Streaming,
        Category::Music,
        Category::Iptv,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Streaming => "Streaming",
            Category::Music => "Music",
            Category::Combo => "Combos",
            Category::Iptv => "IPTV",
        }
    }
}

/// Availability status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Online,
    Maintenance,
}

/// A priced variant of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Price in the smallest currency unit. Always positive.
    pub price: i64,
}

/// A sellable subscription product.
///
/// Anything offered through checkout carries at least one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo_url: String,
    pub category: Category,
    /// Brand accent color for cards and charts.
    pub brand_color: String,
    /// Display gradient tag consumed by the UI.
    pub bg_gradient: String,
    pub status: ServiceStatus,
    pub plans: Vec<Plan>,
    /// Remaining stock, doubling as the popularity-sort proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// End of an active flash offer, if one is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_offer_ends: Option<DateTime<Utc>>,
    /// Wholesale price shown in reseller mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<i64>,
    /// Preview content image references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_content: Vec<String>,
}

impl Service {
    /// Cheapest plan price, used by price sorting and the max-price filter.
    pub fn cheapest_price(&self) -> Option<i64> {
        self.plans.iter().map(|p| p.price).min()
    }

    /// Whether a flash offer is active at `now`.
    pub fn flash_offer_active(&self, now: DateTime<Utc>) -> bool {
        self.flash_offer_ends.map(|ends| ends > now).unwrap_or(false)
    }
}

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

/// A registered user record as persisted in the users collection.
///
/// The password is stored in plaintext. This is a deliberate prototype
/// contract inherited from the product: storage is client-local and the
/// login flow is not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// This user's own code, handed out to invitees.
    pub referral_code: String,
    /// Accumulated referral credit, smallest currency unit.
    pub referral_balance: i64,
    /// Number of registrations credited to this user.
    pub referral_count: i64,
    /// Code this user supplied at registration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_referral: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Session projection of a [`UserRecord`] — everything but the password.
///
/// Persisted under its own key and cleared on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub referral_code: String,
    pub referral_balance: i64,
    pub referral_count: i64,
}

impl SessionUser {
    /// Project a stored record into a session.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
            referral_code: record.referral_code.clone(),
            referral_balance: record.referral_balance,
            referral_count: record.referral_count,
        }
    }
}

/// A manually entered CRM client. Purely descriptive: no relationship to
/// [`Service`] or [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Free-text service name.
    pub service: String,
    pub phone: String,
    pub purchase_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub active: bool,
}

/// Status of an order. The core never transitions status itself; `Active`
/// and `Expired` only ever arrive from persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Active,
    Expired,
}

/// Sentinel user id for checkouts placed without a session.
pub const GUEST_USER_ID: &str = "guest";

/// A placed order. Service and plan fields are snapshots taken at checkout
/// time, so later catalog edits or deletions never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub service_name: String,
    pub service_logo_url: String,
    pub plan_name: String,
    pub price: i64,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    /// Display label of the payment method chosen at checkout.
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// A user review of a service. The service id is a live reference: reviews
/// are silently orphaned if the service is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub service_id: String,
    /// 1 to 5.
    pub rating: i64,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// Kind tag of a notification, driving its feed icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Offer,
    PriceDrop,
    Info,
    Referral,
}

/// An entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub date: DateTime<Utc>,
    pub read: bool,
    /// Stable dedup key for flash-offer alerts: `"{service_id}:{offer_end}"`.
    /// Absent on every other kind of notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_key: Option<String>,
}

/// An operator-curated quote shown on the landing page. Unrelated to
/// [`Review`]: testimonials are hand-edited display content with full CRUD,
/// not tied to any service, and live only for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar_url: String,
    pub quote: String,
    /// 1 to 5.
    pub rating: i64,
}

/// Global promotional banner configuration. Singleton document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub promo_text: String,
    pub promo_code: String,
    pub promo_detail: String,
    pub show_banner: bool,
    pub maintenance_mode: bool,
}

/// Payment instruction configuration. Singleton document; values are free
/// text, validation is the UI's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub whatsapp_number: String,
    pub qr_image_url: String,
    pub primary_wallet_number: String,
    pub secondary_wallet_number: String,
    pub bank_name: String,
    pub bank_account_type: String,
    pub bank_account_number: String,
    pub bank_account_holder: String,
}

/// A cart line: a service and the chosen plan, held by value for the
/// duration of the shopping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub service: Service,
    pub plan: Plan,
}
