//! Connection configuration
//!
//! This module handles:
//! * Connection parameters with validated setters
//! * Connect stage ordering

mod config;
mod state;

pub use config::{
    ConnectionConfig, ConnectionConfigBuilder, DEFAULT_CREDENTIALS_PATH, DEFAULT_HOST,
    DEFAULT_PORT,
};
pub use state::ConnectStage;
