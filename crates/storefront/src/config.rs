//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Storefront daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL.
    pub database_url: String,
    /// Shared secret unlocking operator mutations. Compared client-side;
    /// prototype-grade by design, not a security contract.
    pub operator_secret: String,
    /// Period of the flash-offer notification scan.
    pub flash_scan_period: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:combokart.db?mode=rwc` |
    /// | `OPERATOR_SECRET` | Operator unlock secret | `admin123` |
    /// | `FLASH_SCAN_SECS` | Flash-offer scan period, seconds | `60` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:combokart.db?mode=rwc".to_string());

        let operator_secret =
            env::var("OPERATOR_SECRET").unwrap_or_else(|_| "admin123".to_string());

        let flash_scan_secs = match env::var("FLASH_SCAN_SECS") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidScanPeriod)?,
            Err(_) => 60,
        };

        Ok(Self {
            database_url,
            operator_secret,
            flash_scan_period: Duration::from_secs(flash_scan_secs),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FLASH_SCAN_SECS must be a number of seconds")]
    InvalidScanPeriod,
}
