//! Cart store: the in-progress shopping session.
//!
//! The cart is deliberately not persisted — it lives for one session, unlike
//! the wishlist. Totals are derived on read; a bundle discount applies
//! automatically once the cart holds enough lines.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{CartLine, Plan, Service};

/// Minimum line count for the bundle discount.
pub const BUNDLE_MIN_LINES: usize = 3;

/// Bundle discount rate, in percent.
pub const BUNDLE_DISCOUNT_PERCENT: i64 = 15;

/// Derived cart totals, all in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub line_count: usize,
    /// Sum of plan prices before discount.
    pub subtotal: i64,
    /// Bundle discount; zero below [`BUNDLE_MIN_LINES`] lines.
    pub discount: i64,
    /// Amount due.
    pub total: i64,
}

/// Store owning the session cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Arc<RwLock<Vec<CartLine>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a service/plan pair.
    pub async fn add(&self, service: Service, plan: Plan) {
        self.lines.write().await.push(CartLine { service, plan });
    }

    /// Remove the line at `index`. Out of range is a no-op.
    pub async fn remove(&self, index: usize) {
        let mut lines = self.lines.write().await;
        if index < lines.len() {
            lines.remove(index);
        }
    }

    /// Empty the cart. Checkout does not call this; clearing is the
    /// caller's explicit follow-up action.
    pub async fn clear(&self) {
        self.lines.write().await.clear();
    }

    /// Current lines, in insertion order.
    pub async fn lines(&self) -> Vec<CartLine> {
        self.lines.read().await.clone()
    }

    /// Derived totals for the current contents.
    pub async fn totals(&self) -> CartTotals {
        let lines = self.lines.read().await;
        totals_for(&lines)
    }
}

/// Totals for a slice of cart lines. Integer math on smallest units.
pub fn totals_for(lines: &[CartLine]) -> CartTotals {
    let subtotal: i64 = lines.iter().map(|l| l.plan.price).sum();
    let discount = if lines.len() >= BUNDLE_MIN_LINES {
        subtotal * BUNDLE_DISCOUNT_PERCENT / 100
    } else {
        0
    };

    CartTotals {
        line_count: lines.len(),
        subtotal,
        discount,
        total: subtotal - discount,
    }
}
