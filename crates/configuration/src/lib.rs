//! # Voteboard Configuration Crate
//!
//! Reads and validates every piece of deployment configuration exactly once,
//! at startup. The rest of the application receives a `&Settings` and never
//! touches the environment directly.
//!
//! A missing or malformed required value is a fatal startup error: the
//! process must refuse to serve traffic rather than fail connection by
//! connection at runtime.

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::Settings;

/// Loads the application settings from the process environment.
///
/// This function is the primary entry point for this crate. It reads the
/// environment variables (`INSTANCE_CONNECTION_NAME`, `DB_USER`, `DB_PASS`,
/// `DB_NAME`, plus the optional tuning knobs), deserializes them into our
/// strongly-typed `Settings` struct, validates the result, and returns it.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Defaults for the optional knobs; the required values have none.
        .set_default("socket_dir", settings::DEFAULT_SOCKET_DIR)?
        .set_default("max_connections", settings::DEFAULT_MAX_CONNECTIONS as i64)?
        .set_default("acquire_timeout_secs", settings::DEFAULT_ACQUIRE_TIMEOUT_SECS as i64)?
        .set_default("port", settings::DEFAULT_PORT as i64)?
        // `INSTANCE_CONNECTION_NAME` in the environment becomes the
        // `instance_connection_name` field, and so on. Values stay strings
        // here; the numeric fields are parsed during deserialization.
        .add_source(config::Environment::default())
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct.
    let settings = builder.try_deserialize::<Settings>()?;

    settings.validate()?;
    Ok(settings)
}
