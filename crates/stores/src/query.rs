//! Read-side catalog filtering and sorting.
//!
//! Queries are pure: they take the current catalog snapshot and produce a
//! view for one render, nothing is cached or stored.

use crate::models::{Category, Service, ServiceStatus};

/// Sort order for catalog views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the catalog's own order.
    #[default]
    Default,
    /// Cheapest plan, ascending.
    PriceAsc,
    /// Cheapest plan, descending.
    PriceDesc,
    /// Stock descending — the catalog's popularity proxy.
    Popularity,
}

/// A catalog query. All predicates are ANDed; `None` means "don't filter".
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub category: Option<Category>,
    /// Case-insensitive substring match on the service name.
    pub search: Option<String>,
    /// A service qualifies when any plan's price is at or below this.
    pub max_price: Option<i64>,
    pub status: Option<ServiceStatus>,
    pub sort: SortKey,
}

/// Apply a query to a catalog snapshot.
pub fn search(services: &[Service], query: &CatalogQuery) -> Vec<Service> {
    let needle = query.search.as_deref().map(str::to_lowercase);

    let mut matched: Vec<Service> = services
        .iter()
        .filter(|s| query.category.map_or(true, |c| s.category == c))
        .filter(|s| {
            needle
                .as_deref()
                .map_or(true, |n| s.name.to_lowercase().contains(n))
        })
        .filter(|s| {
            query
                .max_price
                .map_or(true, |max| s.plans.iter().any(|p| p.price <= max))
        })
        .filter(|s| query.status.map_or(true, |st| s.status == st))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Default => {}
        SortKey::PriceAsc => matched.sort_by_key(|s| s.cheapest_price().unwrap_or(0)),
        SortKey::PriceDesc => {
            matched.sort_by_key(|s| std::cmp::Reverse(s.cheapest_price().unwrap_or(0)))
        }
        SortKey::Popularity => matched.sort_by_key(|s| std::cmp::Reverse(s.stock.unwrap_or(0))),
    }

    matched
}
