use sqlx::migrate::MigrateError;
use thiserror::Error;

/// The message store does three things: open the database, migrate it,
/// and run its append/history queries. These are the corresponding ways
/// it can fail.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("Failed to open the database: {0}")]
	Open(sqlx::Error),
	#[error("Failed to migrate the database: {0}")]
	Migration(#[from] MigrateError),
	#[error("Database query failed: {0}")]
	Query(#[from] sqlx::Error),
}
