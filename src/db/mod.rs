pub mod queries;

use std::str::FromStr;

use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if !matches!(db_error.kind(), ErrorKind::Other) => {
                StoreError::Constraint(db_error.message().to_owned())
            }
            _ => StoreError::Database(error),
        }
    }
}

pub async fn establish_connection(path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// A migrated in-memory database, one per call. Used to give each test its own store.
///
/// Every connection to `sqlite::memory:` opens its own database, so the pool is pinned to a
/// single connection that is never recycled.
pub async fn in_memory() -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    run_migrations(&pool)
        .await
        .map_err(|err| StoreError::Database(sqlx::Error::Migrate(Box::new(err))))?;
    Ok(pool)
}
