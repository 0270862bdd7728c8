use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

/// Fixed pause between connection attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Attempts used when the configured retry count is zero.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to database after {attempts} attempts: {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// connect_with_retry
///
/// Opens the Postgres pool, retrying every `RETRY_INTERVAL` up to `max_retries` times so the
/// API can start before the database container is ready.
pub async fn connect_with_retry(db_url: &str, max_retries: u32) -> Result<PgPool, DatabaseError> {
    retry_with_interval(max_retries, RETRY_INTERVAL, || {
        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(5))
            .connect(db_url)
    })
    .await
}

/// The retry loop behind `connect_with_retry`, generic over the connect attempt.
pub async fn retry_with_interval<T, F, Fut>(
    max_retries: u32,
    interval: Duration,
    mut attempt: F,
) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = if max_retries == 0 {
        DEFAULT_MAX_RETRIES
    } else {
        max_retries
    };

    let mut n = 1;
    loop {
        tracing::info!("Attempting to connect to database (attempt {n}/{attempts})");

        match attempt().await {
            Ok(value) => {
                tracing::info!("Database connected successfully");
                return Ok(value);
            }
            Err(source) if n >= attempts => {
                return Err(DatabaseError::Connect { attempts, source });
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to database: {e}. Retrying in {}s...",
                    interval.as_secs()
                );
                tokio::time::sleep(interval).await;
                n += 1;
            }
        }
    }
}

/// Applies the migrations embedded from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
