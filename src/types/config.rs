//! Configuration structures.
//!
//! All configuration is read from environment variables exactly once at
//! startup and passed by reference into the components that need it. There is
//! no module-global state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::{Error, Result};

/// Connection settings for the RabbitMQ HTTP Management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabbitConfig {
    /// Management host.
    pub host: String,

    /// Management port (the HTTP API listener, not AMQP).
    pub port: u16,

    /// HTTP Basic auth username.
    pub username: String,

    /// HTTP Basic auth password.
    pub password: String,

    /// `http` or `https`.
    pub protocol: Protocol,

    /// Path prefix of the management API.
    pub base_path: String,

    /// Client certificate material for mutual TLS, when required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_identity: Option<TlsIdentity>,

    /// Verify the server certificate. Disabling this is only meant for
    /// self-signed development brokers.
    pub tls_verify: bool,

    /// Deadline applied to every outbound request.
    pub request_timeout: Duration,
}

/// URL scheme for the management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Client certificate plus private key, already loaded into memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsIdentity {
    pub cert_pem: String,
    pub key_pem: String,
}

impl Default for RabbitConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 443,
            username: "guest".to_string(),
            password: "guest".to_string(),
            protocol: Protocol::Https,
            base_path: "/api".to_string(),
            tls_identity: None,
            tls_verify: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl RabbitConfig {
    /// Read configuration from `RABBITMQ_*` environment variables, falling
    /// back to the defaults above for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env_or("RABBITMQ_HOST", defaults.host);
        let port = match std::env::var("RABBITMQ_MANAGEMENT_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::config(format!("invalid RABBITMQ_MANAGEMENT_PORT: {raw}")))?,
            Err(_) => defaults.port,
        };
        let username = env_or("RABBITMQ_USERNAME", defaults.username);
        let password = env_or("RABBITMQ_PASSWORD", defaults.password);

        let protocol = match std::env::var("RABBITMQ_PROTOCOL") {
            Ok(raw) => match raw.to_ascii_lowercase().as_str() {
                "http" => Protocol::Http,
                "https" => Protocol::Https,
                other => {
                    return Err(Error::config(format!(
                        "invalid RABBITMQ_PROTOCOL: {other} (expected http or https)"
                    )))
                }
            },
            Err(_) => defaults.protocol,
        };

        let base_path = env_or("RABBITMQ_BASE_PATH", defaults.base_path);

        let tls_verify = match std::env::var("RABBITMQ_TLS_VERIFY") {
            Ok(raw) => !matches!(raw.to_ascii_lowercase().as_str(), "false" | "0" | "no"),
            Err(_) => defaults.tls_verify,
        };

        let request_timeout = match std::env::var("RABBITMQ_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    Error::config(format!("invalid RABBITMQ_REQUEST_TIMEOUT_SECS: {raw}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.request_timeout,
        };

        Ok(Self {
            host,
            port,
            username,
            password,
            protocol,
            base_path,
            tls_identity: load_tls_identity()?,
            tls_verify,
            request_timeout,
        })
    }

    /// Root URL of the management API, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol.as_str(),
            self.host,
            self.port,
            self.base_path
        )
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Client identity from the environment. Inline PEM takes precedence over
/// file paths; a cert without a key (or vice versa) is a configuration error.
fn load_tls_identity() -> Result<Option<TlsIdentity>> {
    let inline_cert = std::env::var("RABBITMQ_TLS_CERT_PEM").ok();
    let inline_key = std::env::var("RABBITMQ_TLS_KEY_PEM").ok();
    match (inline_cert, inline_key) {
        (Some(cert_pem), Some(key_pem)) => return Ok(Some(TlsIdentity { cert_pem, key_pem })),
        (Some(_), None) | (None, Some(_)) => {
            return Err(Error::config(
                "RABBITMQ_TLS_CERT_PEM and RABBITMQ_TLS_KEY_PEM must be set together",
            ))
        }
        (None, None) => {}
    }

    let cert_file = std::env::var("RABBITMQ_TLS_CERT_FILE").ok();
    let key_file = std::env::var("RABBITMQ_TLS_KEY_FILE").ok();
    match (cert_file, key_file) {
        (Some(cert), Some(key)) => {
            let cert_pem = std::fs::read_to_string(&cert)
                .map_err(|e| Error::config(format!("cannot read {cert}: {e}")))?;
            let key_pem = std::fs::read_to_string(&key)
                .map_err(|e| Error::config(format!("cannot read {key}: {e}")))?;
            Ok(Some(TlsIdentity { cert_pem, key_pem }))
        }
        (Some(_), None) | (None, Some(_)) => Err(Error::config(
            "RABBITMQ_TLS_CERT_FILE and RABBITMQ_TLS_KEY_FILE must be set together",
        )),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_management_conventions() {
        let config = RabbitConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 443);
        assert_eq!(config.username, "guest");
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.protocol, Protocol::Https);
        assert!(config.tls_verify);
    }

    #[test]
    fn base_url_concatenates_parts() {
        let config = RabbitConfig {
            host: "rabbit.internal".to_string(),
            port: 15672,
            protocol: Protocol::Http,
            ..RabbitConfig::default()
        };
        assert_eq!(config.base_url(), "http://rabbit.internal:15672/api");
    }
}
