use crate::connector::Connector;
use crate::error::DbError;
use configuration::Settings;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Establishes the bounded connection pool for the managed instance.
///
/// The pool builds every connection through the secure connector's factory,
/// never holds more than `max_connections` live connections, and bounds each
/// acquisition by `acquire_timeout_secs`. Waiting on a saturated pool is the
/// application's only backpressure mechanism, so the bound is what turns an
/// overloaded process into fast server errors instead of hanging requests.
pub async fn connect(settings: &Settings) -> Result<PgPool, DbError> {
    let connector = Connector::new(settings)?;

    tracing::info!(
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout_secs,
        "Creating connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(connector.connect_options())
        .await?;

    Ok(pool)
}

/// Applies the `votes` schema migration.
///
/// This is useful for ensuring the database schema is up-to-date when the
/// application starts, which is especially important in production deployments.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
