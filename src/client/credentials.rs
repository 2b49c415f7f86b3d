//! Credentials file loading
//!
//! The file is a JSON object with two string fields:
//!
//! ```json
//! { "Username": "app", "Password": "secret" }
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Username/password pair read from the credentials file
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Username", alias = "username")]
    username: String,
    #[serde(rename = "Password", alias = "password")]
    password: String,
}

impl Credentials {
    /// Create credentials directly
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read and parse the credentials file at `path`
    ///
    /// The file is read in full on every call. Empty values are accepted; a
    /// missing field is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::CredentialsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::CredentialsMalformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
