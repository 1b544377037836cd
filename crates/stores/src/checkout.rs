//! Checkout: the one cross-store flow.
//!
//! Turns the cart into orders (one per line, status pending), appends one
//! confirmation notification per order, and composes the outbound text block
//! the customer carries to the messaging channel. Delivery is external; this
//! module's responsibility ends at a fully populated message and a phone
//! number. Checkout does not clear the cart — that stays an explicit caller
//! action.

use chrono::{DateTime, Utc};

use crate::cart::{totals_for, CartStore, CartTotals};
use crate::error::Result;
use crate::models::{CartLine, Order, OrderStatus, PaymentConfig, SessionUser, GUEST_USER_ID};
use crate::notifications::NotificationStore;
use crate::orders::OrderStore;

/// Payment rail chosen at checkout. Only the display label enters the order
/// snapshot and the outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    BankQr,
    PrimaryWallet,
    SecondaryWallet,
    BankTransfer,
}

impl PaymentMethod {
    /// Display label used in orders and the outbound message.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::BankQr => "Bank QR",
            PaymentMethod::PrimaryWallet => "Mobile wallet",
            PaymentMethod::SecondaryWallet => "Mobile wallet (alt)",
            PaymentMethod::BankTransfer => "Bank transfer",
        }
    }
}

/// Checkout parameters gathered by the UI.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Name the customer typed in; also the display name on the orders.
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    /// Promo/referral code the customer applied, carried on the orders.
    pub referral_code: Option<String>,
}

/// Message handed to the external channel: a phone number and a fully
/// populated text block.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub phone: String,
    pub text: String,
}

/// What a completed checkout produced.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub orders: Vec<Order>,
    pub totals: CartTotals,
    pub message: OutboundMessage,
}

/// Snapshot the cart into pending orders, notify each one, and compose the
/// outbound message. Returns `None` for an empty cart.
///
/// Order and notification saves are independent documents: if a
/// notification write fails after its order was recorded, the mismatch is
/// logged and checkout continues, matching the per-collection persistence
/// contract.
pub async fn checkout(
    cart: &CartStore,
    orders: &OrderStore,
    notifications: &NotificationStore,
    payment_config: &PaymentConfig,
    session: Option<&SessionUser>,
    request: CheckoutRequest,
    now: DateTime<Utc>,
) -> Result<Option<CheckoutReceipt>> {
    let lines = cart.lines().await;
    if lines.is_empty() {
        return Ok(None);
    }
    let totals = totals_for(&lines);

    let user_id = session.map(|s| s.id.as_str()).unwrap_or(GUEST_USER_ID);
    let mut placed = Vec::with_capacity(lines.len());

    for line in &lines {
        let order = Order {
            id: format!("order_{}", uuid::Uuid::new_v4().simple()),
            user_id: user_id.to_string(),
            user_name: request.customer_name.clone(),
            service_name: line.service.name.clone(),
            service_logo_url: line.service.logo_url.clone(),
            plan_name: line.plan.name.clone(),
            price: line.plan.price,
            date: now,
            status: OrderStatus::Pending,
            payment_method: request.payment_method.label().to_string(),
            referral_code: request.referral_code.clone(),
        };
        orders.place(order.clone()).await?;

        // One confirmation entry per order. The order itself is already
        // durable at this point, so a failed notification write is logged
        // rather than unwinding the checkout.
        let entry = NotificationStore::order_placed(&order, now);
        if let Err(e) = notifications.push(entry).await {
            tracing::warn!(order_id = %order.id, error = %e, "Order recorded but its notification failed to persist");
        }

        placed.push(order);
    }

    let text = compose_message(&lines, totals, request.payment_method, &request.customer_name);
    tracing::info!(
        orders = placed.len(),
        total = totals.total,
        "Checkout completed"
    );

    Ok(Some(CheckoutReceipt {
        orders: placed,
        totals,
        message: OutboundMessage {
            phone: payment_config.whatsapp_number.clone(),
            text,
        },
    }))
}

/// Deterministic outbound text block: itemized lines, total after discount,
/// payment method and customer name.
pub fn compose_message(
    lines: &[CartLine],
    totals: CartTotals,
    payment_method: PaymentMethod,
    customer_name: &str,
) -> String {
    let mut out = Vec::new();
    out.push("Hi ComboKart, I want to order this custom combo:".to_string());
    out.push(String::new());
    for line in lines {
        out.push(format!("> {} ({})", line.service.name, line.plan.name));
    }
    out.push(String::new());
    out.push(format!("*TOTAL TO PAY:* {}", format_amount(totals.total)));
    if totals.discount > 0 {
        out.push("(bundle discount included)".to_string());
    }
    out.push(format!("*PAYMENT METHOD:* {}", payment_method.label()));
    out.push(String::new());
    out.push(format!("*CUSTOMER:* {}", customer_name));
    out.push(String::new());
    out.push("*Payment receipt attached below*".to_string());
    out.join("\n")
}

/// `$` plus the amount with dots as thousands separators, e.g. `$30.600`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Plan, Service, ServiceStatus};
    use storage::Storage;

    fn line(name: &str, plan_name: &str, price: i64) -> (Service, Plan) {
        let plan = Plan {
            id: format!("{name}_plan"),
            name: plan_name.to_string(),
            price,
        };
        let service = Service {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: String::new(),
            logo_url: format!("https://cdn.combokart.app/logos/{}.png", name.to_lowercase()),
            category: Category::Streaming,
            brand_color: String::new(),
            bg_gradient: String::new(),
            status: ServiceStatus::Online,
            plans: vec![plan.clone()],
            stock: None,
            flash_offer_ends: None,
            wholesale_price: None,
            preview_content: Vec::new(),
        };
        (service, plan)
    }

    async fn stores() -> (Storage, CartStore, OrderStore, NotificationStore) {
        let storage = Storage::connect("sqlite::memory:").await.unwrap();
        storage.migrate().await.unwrap();
        let cart = CartStore::new();
        let orders = OrderStore::load(storage.clone()).await.unwrap();
        let notifications = NotificationStore::load_or_seed(storage.clone(), Utc::now())
            .await
            .unwrap();
        (storage, cart, orders, notifications)
    }

    fn payment_config() -> PaymentConfig {
        crate::seed::default_payment_config()
    }

    #[tokio::test]
    async fn test_three_line_checkout_scenario() {
        let (_storage, cart, orders, notifications) = stores().await;
        for (name, plan_name, price) in [
            ("ServiceA", "Monthly", 15000),
            ("ServiceB", "Monthly", 12000),
            ("ServiceC", "Monthly", 9000),
        ] {
            let (s, p) = line(name, plan_name, price);
            cart.add(s, p).await;
        }
        let feed_before = notifications.list().await.len();

        let receipt = checkout(
            &cart,
            &orders,
            &notifications,
            &payment_config(),
            None,
            CheckoutRequest {
                customer_name: "Alice".to_string(),
                payment_method: PaymentMethod::BankQr,
                referral_code: None,
            },
            Utc::now(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(receipt.totals.subtotal, 36000);
        assert_eq!(receipt.totals.discount, 5400);
        assert_eq!(receipt.totals.total, 30600);

        // Three pending orders, one notification per order.
        assert_eq!(receipt.orders.len(), 3);
        let ledger = orders.list().await;
        assert_eq!(ledger.len(), 3);
        assert!(ledger.iter().all(|o| o.status == OrderStatus::Pending));
        assert!(ledger.iter().all(|o| o.user_id == GUEST_USER_ID));
        assert_eq!(notifications.list().await.len(), feed_before + 3);

        // Checkout leaves the cart alone.
        assert_eq!(cart.lines().await.len(), 3);
    }

    #[tokio::test]
    async fn test_orders_snapshot_display_fields() {
        let (_storage, cart, orders, notifications) = stores().await;
        let (s, p) = line("Netflix", "1 Screen HD", 15000);
        cart.add(s.clone(), p.clone()).await;

        let session = SessionUser {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            role: crate::models::UserRole::User,
            referral_code: "ALIC1234".to_string(),
            referral_balance: 0,
            referral_count: 0,
        };

        let receipt = checkout(
            &cart,
            &orders,
            &notifications,
            &payment_config(),
            Some(&session),
            CheckoutRequest {
                customer_name: "Alice".to_string(),
                payment_method: PaymentMethod::PrimaryWallet,
                referral_code: Some("KART2026".to_string()),
            },
            Utc::now(),
        )
        .await
        .unwrap()
        .unwrap();

        let order = &receipt.orders[0];
        assert_eq!(order.user_id, "u1");
        assert_eq!(order.service_name, "Netflix");
        assert_eq!(order.service_logo_url, s.logo_url);
        assert_eq!(order.plan_name, "1 Screen HD");
        assert_eq!(order.price, 15000);
        assert_eq!(order.payment_method, "Mobile wallet");
        assert_eq!(order.referral_code.as_deref(), Some("KART2026"));
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_is_noop() {
        let (_storage, cart, orders, notifications) = stores().await;
        let feed_before = notifications.list().await.len();

        let receipt = checkout(
            &cart,
            &orders,
            &notifications,
            &payment_config(),
            None,
            CheckoutRequest {
                customer_name: "Alice".to_string(),
                payment_method: PaymentMethod::BankTransfer,
                referral_code: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();

        assert!(receipt.is_none());
        assert!(orders.list().await.is_empty());
        assert_eq!(notifications.list().await.len(), feed_before);
    }

    #[test]
    fn test_compose_message_is_deterministic_and_complete() {
        let (s1, p1) = line("Netflix", "1 Screen HD", 15000);
        let (s2, p2) = line("Disney+", "Standard", 12000);
        let (s3, p3) = line("Spotify", "Individual", 9000);
        let lines = vec![
            CartLine { service: s1, plan: p1 },
            CartLine { service: s2, plan: p2 },
            CartLine { service: s3, plan: p3 },
        ];
        let totals = totals_for(&lines);

        let text = compose_message(&lines, totals, PaymentMethod::BankQr, "Alice");
        assert_eq!(
            text,
            "Hi ComboKart, I want to order this custom combo:\n\
             \n\
             > Netflix (1 Screen HD)\n\
             > Disney+ (Standard)\n\
             > Spotify (Individual)\n\
             \n\
             *TOTAL TO PAY:* $30.600\n\
             (bundle discount included)\n\
             *PAYMENT METHOD:* Bank QR\n\
             \n\
             *CUSTOMER:* Alice\n\
             \n\
             *Payment receipt attached below*"
        );
    }

    #[test]
    fn test_no_discount_line_below_threshold() {
        let (s1, p1) = line("Netflix", "1 Screen HD", 15000);
        let lines = vec![CartLine { service: s1, plan: p1 }];
        let totals = totals_for(&lines);

        let text = compose_message(&lines, totals, PaymentMethod::BankTransfer, "Bob");
        assert!(!text.contains("discount"));
        assert!(text.contains("*TOTAL TO PAY:* $15.000"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(900), "$900");
        assert_eq!(format_amount(30600), "$30.600");
        assert_eq!(format_amount(1234567), "$1.234.567");
    }
}
