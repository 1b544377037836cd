//! SQLite document persistence layer for ComboKart.
//!
//! Every store in the application owns one or more logical collections, each
//! persisted as a single JSON document under a versioned key in the
//! `documents` table. The contract is deliberately small: `load` a document
//! or get `None`, `save` a document whole. There are no cross-document
//! transactions; a crash between two saves can leave related collections
//! inconsistent, and callers treat a missing or unreadable document as
//! "no prior state" and fall back to seed data.
//!
//! # Example
//!
//! ```no_run
//! use storage::{keys, Storage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Storage::connect("sqlite:combokart.db?mode=rwc").await?;
//!     storage.migrate().await?;
//!
//!     let names: Vec<String> = storage.load(keys::WISHLIST).await?.unwrap_or_default();
//!     storage.save(keys::WISHLIST, &names).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod keys;

pub use error::{Result, StorageError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Document storage over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Default pool size. Small: the application is a single cooperative
    /// event loop, with only the flash-offer scan running alongside it.
    const DEFAULT_POOL_SIZE: u32 = 4;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to storage: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run storage migrations.
    ///
    /// This should be called once after connecting to ensure the `documents`
    /// table exists.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Load and decode the document stored under `key`.
    ///
    /// Returns `Ok(None)` when no document exists. A document that fails to
    /// decode is logged and also treated as absent, so callers fall back to
    /// their defaults instead of crashing on a stale or corrupt body.
    pub async fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        let body = sqlx::query_scalar::<_, String>(
            r#"
            SELECT body
            FROM documents
            WHERE doc_key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some(body) = body else {
            return Ok(None);
        };

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable document");
                Ok(None)
            }
        }
    }

    /// Encode `value` and write it whole under `key`, replacing any previous
    /// document.
    pub async fn save<T: Serialize>(&self, key: &'static str, value: &T) -> Result<()> {
        let body =
            serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;

        sqlx::query(
            r#"
            INSERT INTO documents (doc_key, body, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(doc_key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete the document stored under `key`, if any.
    pub async fn remove(&self, key: &'static str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM documents
            WHERE doc_key = ?
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
