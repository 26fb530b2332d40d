pub mod config;
pub mod migrate;
pub mod operations;

use std::ops::{Deref, DerefMut};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::db::config::DbConfig;
use crate::db::migrate::MigrationError;
use crate::response::AppError;
use crate::state::AppState;

pub async fn connect(config: &DbConfig) -> Result<SqlitePool, DbInitError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(DbInitError::Io)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(path = %config.path.display(), "sqlite pool opened");

    migrate::run_migrations(&pool).await?;

    Ok(pool)
}

/// A pooled connection scoped to a single request.
///
/// Handlers take this extractor and pass `&mut conn` to the query functions in
/// [`operations`]. The connection goes back to the pool when the handler
/// returns, whichever path it returns on.
pub struct DbConn(PoolConnection<Sqlite>);

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.pool().acquire().await.map_err(|err| {
            tracing::error!(error = %err, "failed to acquire database connection");
            AppError::internal(err.to_string())
        })?;
        Ok(Self(conn))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("failed to create database directory: {0}")]
    Io(#[source] std::io::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] MigrationError),
}
