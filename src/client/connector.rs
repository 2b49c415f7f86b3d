//! Connect path: credentials, descriptor, open, liveness check

use super::credentials::Credentials;
use super::descriptor::ConnectionDescriptor;
use crate::connection::{ConnectStage, ConnectionConfig};
use crate::{Error, Result};
use postgres::{Client, NoTls};
use std::str::FromStr;

/// Query used for the liveness check
pub const PING_QUERY: &str = "SELECT 1";

/// Connect using a configuration
///
/// Steps run in a fixed order, and a failure is reported as the error of the
/// step that failed:
///
/// 1. read the credentials file ([`Error::CredentialsUnreadable`])
/// 2. parse it ([`Error::CredentialsMalformed`])
/// 3. assemble the descriptor
/// 4. hand it to the driver ([`Error::OpenFailed`])
/// 5. connect and run `SELECT 1` ([`Error::Unreachable`])
///
/// No handle is returned unless every step succeeds. The returned client is
/// owned by the caller.
///
/// # Examples
///
/// ```no_run
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use pg_init::ConnectionConfig;
///
/// let mut config = ConnectionConfig::new("orders");
/// config.set_host("10.0.0.5")?;
/// config.set_port(6432)?;
///
/// let mut client = config.connect()?;
/// client.batch_execute("SELECT 1")?;
/// # Ok(())
/// # }
/// ```
pub fn connect(config: ConnectionConfig) -> Result<Client> {
    let _span = tracing::info_span!(
        "connect",
        database = %config.database(),
        host = %config.host(),
        port = config.port()
    )
    .entered();

    metrics::counter!("pg_init_connect_attempts_total").increment(1);

    let mut stage = ConnectStage::Initial;
    match run_stages(&config, &mut stage) {
        Ok(client) => {
            metrics::counter!("pg_init_connect_success_total").increment(1);
            tracing::info!("connection verified");
            Ok(client)
        }
        Err(e) => {
            metrics::counter!("pg_init_connect_errors_total", "category" => e.category())
                .increment(1);
            tracing::warn!(
                stage = %stage,
                category = e.category(),
                error = %e,
                "connect failed"
            );
            Err(e)
        }
    }
}

/// Connect with every setting at its default
///
/// Shorthand for `ConnectionConfig::new(database).connect()`.
pub fn connect_default(database: impl Into<String>) -> Result<Client> {
    connect(ConnectionConfig::new(database))
}

fn run_stages(config: &ConnectionConfig, stage: &mut ConnectStage) -> Result<Client> {
    let credentials = Credentials::load(config.credentials_path())?;
    stage.advance(ConnectStage::CredentialsLoaded);
    tracing::debug!(
        path = %config.credentials_path().display(),
        user = credentials.username(),
        "credentials loaded"
    );

    let descriptor = config.descriptor(&credentials);
    stage.advance(ConnectStage::DescriptorAssembled);
    tracing::debug!(descriptor = descriptor.redacted(), "descriptor assembled");

    let driver_config = open(&descriptor)?;
    stage.advance(ConnectStage::Opened);

    let client = verify(&driver_config)?;
    stage.advance(ConnectStage::Verified);
    Ok(client)
}

/// Hand the descriptor to the driver without touching the network
fn open(descriptor: &ConnectionDescriptor) -> Result<postgres::Config> {
    postgres::Config::from_str(descriptor.as_str()).map_err(Error::OpenFailed)
}

/// Connect and ping; the client is dropped if the ping fails
fn verify(driver_config: &postgres::Config) -> Result<Client> {
    let mut client = driver_config.connect(NoTls).map_err(Error::Unreachable)?;
    client.batch_execute(PING_QUERY).map_err(Error::Unreachable)?;
    tracing::debug!("liveness check passed");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use tempfile::NamedTempFile;

    fn credentials_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_open_accepts_assembled_descriptor() {
        let creds = Credentials::new("app", "secret");
        let descriptor = ConnectionDescriptor::new(
            &creds,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            6432,
            "orders",
        );
        let driver_config = open(&descriptor).unwrap();
        assert_eq!(driver_config.get_user(), Some("app"));
        assert_eq!(driver_config.get_password(), Some(&b"secret"[..]));
        assert_eq!(driver_config.get_dbname(), Some("orders"));
        assert_eq!(driver_config.get_ports(), &[6432u16]);
    }

    #[test]
    fn test_open_accepts_ipv6_host() {
        let creds = Credentials::new("app", "secret");
        let descriptor =
            ConnectionDescriptor::new(&creds, IpAddr::V6(Ipv6Addr::LOCALHOST), 5432, "orders");
        let driver_config = open(&descriptor).unwrap();
        assert_eq!(driver_config.get_ports(), &[5432u16]);
        assert_eq!(driver_config.get_hosts().len(), 1);
    }

    #[test]
    fn test_connect_missing_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConnectionConfig::new("orders");
        config.set_credentials_path(dir.path().join("DBCredentials.json"));

        let err = connect(config).err().expect("connect must fail");
        assert!(matches!(err, Error::CredentialsUnreadable { .. }));
    }

    #[test]
    fn test_connect_missing_password_field() {
        let file = credentials_file(r#"{"Username": "app"}"#);
        let mut config = ConnectionConfig::new("orders");
        config.set_credentials_path(file.path());

        let err = connect(config).err().expect("connect must fail");
        assert!(matches!(err, Error::CredentialsMalformed { .. }));
    }

    #[test]
    fn test_stage_reached_on_credentials_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConnectionConfig::new("orders");
        config.set_credentials_path(dir.path().join("missing.json"));

        let mut stage = ConnectStage::Initial;
        assert!(run_stages(&config, &mut stage).is_err());
        assert_eq!(stage, ConnectStage::Initial);
    }

    #[test]
    fn test_open_rejects_descriptor_before_network() {
        let file = credentials_file(r#"{"Username": "app", "Password": "secret"}"#);
        let mut config = ConnectionConfig::new("orders?bogus=1");
        config.set_credentials_path(file.path());
        config.set_port(1).unwrap();

        let mut stage = ConnectStage::Initial;
        let err = run_stages(&config, &mut stage)
            .err()
            .expect("connect must fail");
        assert!(matches!(err, Error::OpenFailed(_)));
        assert_eq!(err.category(), "open_failed");
        assert_eq!(stage, ConnectStage::DescriptorAssembled);
    }

    #[test]
    fn test_stage_reached_on_unreachable_server() {
        let file = credentials_file(r#"{"Username": "app", "Password": "secret"}"#);
        let mut config = ConnectionConfig::new("orders");
        config.set_credentials_path(file.path());
        // Nothing listens on port 1 on loopback
        config.set_port(1).unwrap();

        let mut stage = ConnectStage::Initial;
        let err = run_stages(&config, &mut stage)
            .err()
            .expect("connect must fail");
        assert!(matches!(err, Error::Unreachable(_)));
        assert_eq!(stage, ConnectStage::Opened);
    }
}
