use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The connector or an individual connection attempt failed. Malformed
    /// instance identifiers, an unreachable proxy socket, and rejected
    /// credentials all surface as this one kind.
    #[error("Failed to establish a database connection: {0}")]
    Connection(String),

    /// No pooled connection became available within the acquire bound.
    #[error("Timed out waiting for a database connection from the pool")]
    PoolTimeout,

    /// A statement or transaction failed after a valid connection was
    /// obtained. The enclosing transaction has been rolled back.
    #[error("Database statement failed: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row holds a candidate outside the closed set. Nothing in
    /// this system writes such rows, so this indicates external tampering.
    #[error("Corrupt vote row: {0}")]
    CorruptRow(String),
}

impl From<sqlx::Error> for DbError {
    /// Classifies driver errors into the crate taxonomy. Pool saturation is
    /// kept distinct from a failing connection factory so that the latter is
    /// never masked as a timeout.
    ///
    /// One caveat on the factory case: the startup `connect_with` call fails
    /// fast and classifies as `Connection`, but once the pool is live,
    /// `acquire` retries a failing factory internally until its deadline and
    /// then reports `PoolTimedOut`. Mid-flight factory failures can therefore
    /// still reach the caller as `PoolTimeout`; both kinds map to the same
    /// server error, so the distinction only affects log taxonomy.
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => DbError::PoolTimeout,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolClosed => DbError::Connection(e.to_string()),
            other => DbError::Storage(other),
        }
    }
}
