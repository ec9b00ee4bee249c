use crate::error::DbError;
use configuration::Settings;
use sqlx::postgres::PgConnectOptions;

/// Builds the connection factory for the managed database instance.
///
/// The application never sees a host, port, or certificate: the Cloud SQL
/// Auth Proxy runs alongside the process and exposes each instance as a Unix
/// socket named after its connection name (`<socket_dir>/<project:region:instance>`).
/// The proxy owns the mutually-authenticated, encrypted transport and keeps
/// its credentials refreshed for the process lifetime; this type only derives
/// where to find the socket and which database identity to present.
///
/// The produced `PgConnectOptions` is the no-argument factory: every time the
/// pool invokes it, one live authenticated connection is established, or the
/// attempt fails with `DbError::Connection`. The connector itself never
/// retries; retry-on-acquire is the pool's concern.
#[derive(Debug, Clone)]
pub struct Connector {
    options: PgConnectOptions,
}

impl Connector {
    pub fn new(settings: &Settings) -> Result<Self, DbError> {
        // The settings were validated at startup, but the connector is the
        // component that turns the identifier into a filesystem path, so it
        // re-checks the shape it depends on.
        let parts: Vec<&str> = settings.instance_connection_name.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(DbError::Connection(format!(
                "malformed instance connection name '{}': expected 'project:region:instance'",
                settings.instance_connection_name
            )));
        }

        tracing::info!(
            instance = %settings.instance_connection_name,
            database = %settings.db_name,
            user = %settings.db_user,
            "Initializing secure connector"
        );

        let options = PgConnectOptions::new_without_pgpass()
            .socket(settings.socket_path())
            .username(&settings.db_user)
            .password(&settings.db_pass)
            .database(&settings.db_name)
            .application_name("voteboard");

        Ok(Self { options })
    }

    /// The connection factory consumed by `PgPoolOptions::connect_with`.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options.clone()
    }
}
