//! Connect to Postgres and run a liveness query
//!
//! Run with:
//!
//! ```bash
//! RUST_LOG=pg_init=debug cargo run --example connect -- orders 10.0.0.5 6432 ./DBCredentials.json
//! ```
//!
//! Arguments are positional and optional: database, host, port, credentials path.

use pg_init::ConnectionConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pg_init=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let database = args.next().unwrap_or_else(|| "postgres".to_string());

    let mut config = ConnectionConfig::new(database);
    if let Some(host) = args.next() {
        config.set_host(&host)?;
    }
    if let Some(port) = args.next() {
        config.set_port(port.parse()?)?;
    }
    if let Some(path) = args.next() {
        config.set_credentials_path(path);
    }

    let mut client = config.connect()?;
    let row = client.query_one("SELECT current_database(), version()", &[])?;
    let database: String = row.get(0);
    let version: String = row.get(1);
    println!("connected to {} ({})", database, version);

    client.close()?;
    Ok(())
}
