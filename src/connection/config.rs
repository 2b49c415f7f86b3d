//! Connection configuration

use crate::client::{ConnectionDescriptor, Credentials};
use crate::{Error, Result};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// Default location of the credentials file, relative to the working directory
pub const DEFAULT_CREDENTIALS_PATH: &str = "configuration/DBCredentials.json";

/// Default server address (loopback)
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Default Postgres port
pub const DEFAULT_PORT: u16 = 5432;

/// Connection configuration
///
/// Holds everything needed to locate and authenticate against a database,
/// except the credentials themselves, which are read from
/// [`credentials_path`](Self::credentials_path) at connect time.
///
/// Host and port can only be changed through validating setters, so a
/// configuration always holds a well-formed address. A rejected value leaves
/// the previous one in place.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    credentials_path: PathBuf,
    host: IpAddr,
    port: u16,
    database: String,
}

impl ConnectionConfig {
    /// Create new configuration with defaults
    ///
    /// # Defaults
    ///
    /// - `credentials_path`: [`DEFAULT_CREDENTIALS_PATH`]
    /// - `host`: [`DEFAULT_HOST`]
    /// - `port`: [`DEFAULT_PORT`]
    ///
    /// The database name is not validated; a bad name surfaces when connecting.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database: database.into(),
        }
    }

    /// Create a builder that validates every field in one go
    ///
    /// # Examples
    ///
    /// ```
    /// use pg_init::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::builder("orders")
    ///     .host("10.0.0.5")
    ///     .port(6432)
    ///     .credentials_path("/etc/orders/credentials.json")
    ///     .build()?;
    ///
    /// assert_eq!(config.port(), 6432);
    /// # Ok::<(), pg_init::Error>(())
    /// ```
    pub fn builder(database: impl Into<String>) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            credentials_path: None,
            host: None,
            port: None,
            database: database.into(),
        }
    }

    /// Path of the credentials file
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Server address
    pub fn host(&self) -> IpAddr {
        self.host
    }

    /// Server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Set the credentials file location
    ///
    /// The file is not checked until [`connect`](Self::connect).
    pub fn set_credentials_path(&mut self, path: impl Into<PathBuf>) {
        self.credentials_path = path.into();
    }

    /// Set the server address
    ///
    /// Accepts IPv4 and IPv6 literals only. Hostnames are rejected.
    pub fn set_host(&mut self, address: &str) -> Result<()> {
        self.host = parse_host(address)?;
        Ok(())
    }

    /// Set the server port
    ///
    /// Fails with [`Error::PortOutOfRange`] unless `0 <= port <= 65535`.
    pub fn set_port(&mut self, port: i64) -> Result<()> {
        self.port = parse_port(port)?;
        Ok(())
    }

    /// Set the database name
    pub fn set_database(&mut self, name: impl Into<String>) {
        self.database = name.into();
    }

    /// Assemble the connection descriptor for the given credentials
    pub fn descriptor(&self, credentials: &Credentials) -> ConnectionDescriptor {
        ConnectionDescriptor::new(credentials, self.host, self.port, &self.database)
    }

    /// Load credentials, open a connection and verify it
    ///
    /// See [`crate::client::connect`].
    pub fn connect(self) -> Result<postgres::Client> {
        crate::client::connect(self)
    }
}

/// Builder for creating a validated `ConnectionConfig`
///
/// Unset fields fall back to the same defaults as [`ConnectionConfig::new`].
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    credentials_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<i64>,
    database: String,
}

impl ConnectionConfigBuilder {
    /// Set the credentials file location
    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Set the server address (validated in `build`)
    pub fn host(mut self, address: impl Into<String>) -> Self {
        self.host = Some(address.into());
        self
    }

    /// Set the server port (validated in `build`)
    pub fn port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ConnectionConfig> {
        let mut config = ConnectionConfig::new(self.database);
        if let Some(path) = self.credentials_path {
            config.set_credentials_path(path);
        }
        if let Some(ref host) = self.host {
            config.set_host(host)?;
        }
        if let Some(port) = self.port {
            config.set_port(port)?;
        }
        Ok(config)
    }
}

fn parse_host(address: &str) -> Result<IpAddr> {
    address
        .parse()
        .map_err(|_| Error::InvalidAddress(address.to_string()))
}

fn parse_port(port: i64) -> Result<u16> {
    u16::try_from(port).map_err(|_| Error::PortOutOfRange(port))
}
