//! # Voteboard Database Crate
//!
//! This crate is the application's data-access layer for the managed
//! PostgreSQL instance holding the `votes` table.
//!
//! ## Architectural Principles
//!
//! - **Secure connector:** connections are established through the Cloud SQL
//!   Auth Proxy socket, so no raw host, port, or certificate material ever
//!   reaches application code. The connector yields a connection factory and
//!   nothing else.
//! - **Bounded pooling:** a `PgPool` built from that factory amortizes
//!   connection establishment across requests. The pool is owned by `main`,
//!   passed into the store explicitly, and closed on shutdown; there is no
//!   ambient global state.
//! - **Single SQL boundary:** `VoteStore` is the only component that issues
//!   statements. Everything above it works with domain types.
//!
//! ## Public API
//!
//! - `connect`: the async function to establish the database connection pool.
//! - `run_migrations`: applies the `votes` schema, ensuring it is up-to-date.
//! - `VoteStore`: the high-level data access methods (`insert_vote`,
//!   `recent_votes`, `count_by_candidate`, `tally`).
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod connector;
pub mod error;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use connector::Connector;
pub use error::DbError;
pub use store::VoteStore;
