//! Dashboard aggregation over ComboKart store snapshots.
//!
//! Pure functions only: every metric is recomputed from the snapshots it is
//! handed, with no caching or incremental maintenance. Orders carry
//! snapshotted service names, so popularity and per-service revenue match on
//! the name as sold, not on live catalog state.

use chrono::{DateTime, Datelike, Utc};

use stores::models::{Client, Order, OrderStatus, Review, Service};

/// Number of top services shown on the popularity chart.
const POPULARITY_TOP_N: usize = 6;

/// Order counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub active: usize,
    pub expired: usize,
}

/// Popularity chart entry for one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePopularity {
    pub name: String,
    /// Brand accent color for chart rendering.
    pub color: String,
    /// Orders whose snapshotted service name matches.
    pub order_count: usize,
    /// Revenue from those orders.
    pub revenue: i64,
}

/// One month's revenue bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    /// Short month label, e.g. `"Jan"`.
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub revenue: i64,
}

/// Site-wide review KPIs for the dashboard tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewKpis {
    /// Mean rating across all reviews, one-decimal precision; 0.0 with none.
    pub average_rating: f64,
    pub review_count: usize,
}

/// Sum of all order prices regardless of status.
pub fn total_revenue(orders: &[Order]) -> i64 {
    orders.iter().map(|o| o.price).sum()
}

/// Count orders per status.
pub fn orders_by_status(orders: &[Order]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for order in orders {
        match order.status {
            OrderStatus::Pending => counts.pending += 1,
            OrderStatus::Active => counts.active += 1,
            OrderStatus::Expired => counts.expired += 1,
        }
    }
    counts
}

/// Per-service order count and revenue, sorted by count descending, top 6.
///
/// Matching is on the order's snapshotted service name, so orders for a
/// since-renamed or deleted service count toward the name they were sold
/// under.
pub fn service_popularity(services: &[Service], orders: &[Order]) -> Vec<ServicePopularity> {
    let mut entries: Vec<ServicePopularity> = services
        .iter()
        .map(|service| {
            let matching: Vec<&Order> = orders
                .iter()
                .filter(|o| o.service_name == service.name)
                .collect();
            ServicePopularity {
                name: service.name.clone(),
                color: service.brand_color.clone(),
                order_count: matching.len(),
                revenue: matching.iter().map(|o| o.price).sum(),
            }
        })
        .collect();

    entries.sort_by_key(|e| std::cmp::Reverse(e.order_count));
    entries.truncate(POPULARITY_TOP_N);
    entries
}

/// Revenue bucketed by calendar month over a rolling window of
/// `window_months` months ending at the month of `now`, oldest first.
///
/// The product this replaces hardcoded a January–June window regardless of
/// the current date; the rolling window is the intended behavior.
pub fn monthly_revenue(orders: &[Order], now: DateTime<Utc>, window_months: u32) -> Vec<MonthBucket> {
    let mut buckets = Vec::with_capacity(window_months as usize);

    for offset in (0..window_months).rev() {
        let total_months = (now.year() * 12 + now.month() as i32 - 1) - offset as i32;
        let year = total_months.div_euclid(12);
        let month = total_months.rem_euclid(12) as u32 + 1;

        let revenue = orders
            .iter()
            .filter(|o| o.date.year() == year && o.date.month() == month)
            .map(|o| o.price)
            .sum();

        buckets.push(MonthBucket {
            label: month_label(month).to_string(),
            year,
            month,
            revenue,
        });
    }

    buckets
}

/// Site-wide average rating and count for the KPI tile.
pub fn review_kpis(reviews: &[Review]) -> ReviewKpis {
    if reviews.is_empty() {
        return ReviewKpis {
            average_rating: 0.0,
            review_count: 0,
        };
    }
    let sum: i64 = reviews.iter().map(|r| r.rating).sum();
    let mean = sum as f64 / reviews.len() as f64;

    ReviewKpis {
        average_rating: (mean * 10.0).round() / 10.0,
        review_count: reviews.len(),
    }
}

/// Total customers: CRM clients plus registered users.
pub fn customer_count(clients: &[Client], registered_users: usize) -> usize {
    clients.len() + registered_users
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => unreachable!("month out of range"),
    }
}
