//! pg-init: validated Postgres connection setup
//!
//! Builds a verified [`postgres::Client`] from a small configuration
//! (host, port, database name, credentials file path) and a JSON
//! credentials file.
//!
//! # Example
//!
//! ```no_run
//! # fn example() -> pg_init::Result<()> {
//! // Everything at its default: 127.0.0.1:5432,
//! // credentials from configuration/DBCredentials.json
//! let _client = pg_init::connect_default("orders")?;
//!
//! // Or adjust the configuration first
//! let mut config = pg_init::ConnectionConfig::new("orders");
//! config.set_host("10.0.0.5")?;
//! config.set_port(6432)?;
//! config.set_credentials_path("/etc/orders/DBCredentials.json");
//! let _client = config.connect()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod connection;
pub mod error;

pub use client::{connect, connect_default, ConnectionDescriptor, Credentials};
pub use connection::{ConnectionConfig, ConnectionConfigBuilder};
pub use error::{Error, Result};

/// Re-export of the driver client type returned by `connect`
pub use postgres::Client;
