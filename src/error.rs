//! Error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by configuration setters and the connect path
#[derive(Debug, Error)]
pub enum Error {
    /// Host is not an IPv4 or IPv6 literal
    #[error("malformed IP address: {0:?}")]
    InvalidAddress(String),

    /// Port outside the 16-bit range
    #[error("port {0} out of range (expected 0..=65535)")]
    PortOutOfRange(i64),

    /// Credentials file could not be read
    #[error("cannot read credentials file {path}: {source}")]
    CredentialsUnreadable {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Credentials file is not a `{Username, Password}` record
    #[error("malformed credentials file {path}: {source}")]
    CredentialsMalformed {
        /// Path that was read
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Driver rejected the connection descriptor
    #[error("connection descriptor rejected: {0}")]
    OpenFailed(#[source] postgres::Error),

    /// Server could not be reached or failed the liveness check
    #[error("database unreachable: {0}")]
    Unreachable(#[source] postgres::Error),
}

impl Error {
    /// Stable short name for the error kind, used as a log field and metric label
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidAddress(_) => "invalid_address",
            Error::PortOutOfRange(_) => "port_out_of_range",
            Error::CredentialsUnreadable { .. } => "credentials_unreadable",
            Error::CredentialsMalformed { .. } => "credentials_malformed",
            Error::OpenFailed(_) => "open_failed",
            Error::Unreachable(_) => "unreachable",
        }
    }

    /// Whether this error comes from local validation rather than the connect path
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::InvalidAddress(_) | Error::PortOutOfRange(_))
    }
}
