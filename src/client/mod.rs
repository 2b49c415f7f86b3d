//! Client connect path
//!
//! This module handles:
//! * Credentials file loading
//! * Connection descriptor assembly
//! * Opening and verifying the driver connection

mod connector;
mod credentials;
mod descriptor;

pub use connector::{connect, connect_default, PING_QUERY};
pub use credentials::Credentials;
pub use descriptor::{ConnectionDescriptor, SCHEME};
