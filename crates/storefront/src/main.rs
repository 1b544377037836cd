//! ComboKart storefront daemon.
//!
//! Wires every store to storage, seeds defaults on first run, and keeps the
//! flash-offer notification scan ticking until shutdown.

mod config;
mod state;

use chrono::Utc;
use storage::Storage;
use stores::notifications::spawn_flash_offer_scan;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(db = %config.database_url, "Starting storefront");

    let storage = Storage::connect(&config.database_url).await?;
    storage.migrate().await?;

    let state = AppState::init(storage.clone(), config.operator_secret.clone(), Utc::now()).await?;

    let dashboard = state.dashboard(Utc::now()).await;
    info!(
        services = state.catalog.list().await.len(),
        orders_pending = dashboard.status_counts.pending,
        revenue = dashboard.revenue,
        customers = dashboard.customers,
        "Stores ready"
    );

    let scan = spawn_flash_offer_scan(
        state.catalog.clone(),
        state.notifications.clone(),
        config.flash_scan_period,
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    scan.abort();
    storage.close().await;
    Ok(())
}
