//! SQLite pool for the user account store.
//!
//! Accounts are the only mutable state in Shopline; the catalog never touches
//! the database. WAL journal mode keeps signin reads from queueing behind a
//! concurrent signup write, and a busy timeout covers the brief writer lock.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

use crate::config::Config;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool on the configured account database, creating the file and its
/// parent directory on first use. Pool size comes from `[db].max_connections`.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = &config.db.path;

    if let Some(dir) = db_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| {
            format!("Failed to create database directory: {}", dir.display())
        })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(config.db.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open user database: {}", db_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, Config, DbConfig, RecommendConfig, ServerConfig};
    use std::path::PathBuf;

    fn test_config(db_path: PathBuf) -> Config {
        Config {
            db: DbConfig {
                path: db_path,
                max_connections: 2,
            },
            catalog: CatalogConfig {
                products_path: PathBuf::from("unused.csv"),
                trending_path: PathBuf::from("unused.csv"),
                trending_rows: 8,
            },
            recommend: RecommendConfig::default(),
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_connect_creates_missing_parent_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = test_config(tmp.path().join("nested").join("shop.sqlite"));

        let pool = connect(&cfg).await.unwrap();
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();
        assert!(cfg.db.path.exists());
        pool.close().await;
    }

    #[tokio::test]
    async fn test_connect_uses_wal_journal_mode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = test_config(tmp.path().join("shop.sqlite"));

        let pool = connect(&cfg).await.unwrap();
        let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.0.to_lowercase(), "wal");
        pool.close().await;
    }
}
