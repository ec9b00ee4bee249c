use crate::error::ConfigError;
use serde::Deserialize;

pub const DEFAULT_SOCKET_DIR: &str = "/cloudsql";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PORT: u16 = 8080;

/// The root configuration structure for the entire application.
///
/// Field names map one-to-one onto upper-cased environment variables
/// (`instance_connection_name` ⇐ `INSTANCE_CONNECTION_NAME`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The managed instance identifier, in `project:region:instance` form.
    /// Also names the auth-proxy socket the application connects through.
    pub instance_connection_name: String,
    /// The database role to authenticate as.
    pub db_user: String,
    /// The password for `db_user`.
    pub db_pass: String,
    /// The logical database to open.
    pub db_name: String,
    /// Directory where the auth proxy mounts its per-instance Unix sockets.
    pub socket_dir: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Bound on how long a request may wait for a pooled connection.
    pub acquire_timeout_secs: u64,
    /// TCP port for the HTTP listener.
    pub port: u16,
}

impl Settings {
    /// Validates the loaded settings once, at startup. Anything rejected
    /// here can never produce a half-working process later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instance_connection_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "INSTANCE_CONNECTION_NAME must be set".to_string(),
            ));
        }

        // The identifier doubles as a socket filename, so its shape matters.
        let parts: Vec<&str> = self.instance_connection_name.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "INSTANCE_CONNECTION_NAME must look like 'project:region:instance', got '{}'",
                self.instance_connection_name
            )));
        }

        if self.db_user.is_empty() {
            return Err(ConfigError::ValidationError("DB_USER must not be empty".to_string()));
        }
        if self.db_name.is_empty() {
            return Err(ConfigError::ValidationError("DB_NAME must not be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// The full path of the auth-proxy socket for this instance.
    pub fn socket_path(&self) -> String {
        format!("{}/{}", self.socket_dir, self.instance_connection_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Settings {
        Settings {
            instance_connection_name: "my-project:europe-west1:votes-db".to_string(),
            db_user: "voter".to_string(),
            db_pass: "hunter2".to_string(),
            db_name: "votes".to_string(),
            socket_dir: DEFAULT_SOCKET_DIR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn accepts_a_well_formed_configuration() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_a_missing_instance_name() {
        let mut settings = valid();
        settings.instance_connection_name = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_a_malformed_instance_name() {
        for bad in ["votes-db", "project:instance", "a:b:c:d", "a::c"] {
            let mut settings = valid();
            settings.instance_connection_name = bad.to_string();
            assert!(settings.validate().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_an_empty_pool() {
        let mut settings = valid();
        settings.max_connections = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn socket_path_joins_dir_and_instance() {
        assert_eq!(
            valid().socket_path(),
            "/cloudsql/my-project:europe-west1:votes-db"
        );
    }
}
