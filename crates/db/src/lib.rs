//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The Postgres implementation of the core `BudgetStore`
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::BudgetRepository;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::sync::OnceCell;
use tracing::info;

use budgetlens_shared::config::DatabaseConfig;

static CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Returns the process-wide connection pool, opening it on first use.
///
/// Later calls reuse the first pool regardless of `config`.
///
/// # Errors
///
/// Returns an error if the first connection attempt fails; the next call retries.
pub async fn shared_connection(config: &DatabaseConfig) -> Result<&'static DatabaseConnection, DbErr> {
    CONNECTION
        .get_or_try_init(|| async {
            let mut options = ConnectOptions::new(config.url.clone());
            options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect_timeout(Duration::from_secs(10))
                .sqlx_logging(false);

            let db = Database::connect(options).await?;
            info!(max_connections = config.max_connections, "Database pool opened");
            Ok(db)
        })
        .await
}
