//! Connection settings for the WAPI connector
//!
//! Settings can be built directly or loaded from environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `INFOBLOX_HOST` | required |
//! | `INFOBLOX_WAPI_VERSION` | `2.5` |
//! | `INFOBLOX_PORT` | `443` |
//! | `INFOBLOX_USERNAME` | required |
//! | `INFOBLOX_PASSWORD` | required |
//! | `INFOBLOX_SSL_VERIFY` | `true` |
//! | `INFOBLOX_HTTP_TIMEOUT` | `60` (seconds) |
//! | `INFOBLOX_POOL_CONNECTIONS` | `10` |

use std::env;
use std::time::Duration;

use crate::error::InfobloxError;

pub const DEFAULT_WAPI_VERSION: &str = "2.5";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_POOL_CONNECTIONS: usize = 10;

/// Grid master address and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub host: String,
    pub version: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl HostConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            version: DEFAULT_WAPI_VERSION.to_string(),
            port: DEFAULT_PORT,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load from `INFOBLOX_*` environment variables
    pub fn from_env() -> Result<Self, InfobloxError> {
        let host = required_var("INFOBLOX_HOST")?;
        let username = required_var("INFOBLOX_USERNAME")?;
        let password = required_var("INFOBLOX_PASSWORD")?;

        let version = env::var("INFOBLOX_WAPI_VERSION")
            .unwrap_or_else(|_| DEFAULT_WAPI_VERSION.to_string());
        let port = parse_var("INFOBLOX_PORT", DEFAULT_PORT)?;

        Ok(Self {
            host,
            version,
            port,
            username,
            password,
        })
    }

    /// Base URL of the WAPI, always ending in '/'
    pub fn base_url(&self) -> String {
        format!(
            "https://{}:{}/wapi/v{}/",
            self.host.trim_end_matches('/'),
            self.port,
            self.version
        )
    }
}

/// HTTP transport behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub ssl_verify: bool,
    pub http_request_timeout: Duration,
    pub http_pool_connections: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ssl_verify: true,
            http_request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            http_pool_connections: DEFAULT_POOL_CONNECTIONS,
        }
    }
}

impl TransportConfig {
    /// Load from `INFOBLOX_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, InfobloxError> {
        Ok(Self {
            ssl_verify: parse_var("INFOBLOX_SSL_VERIFY", true)?,
            http_request_timeout: Duration::from_secs(parse_var(
                "INFOBLOX_HTTP_TIMEOUT",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            http_pool_connections: parse_var("INFOBLOX_POOL_CONNECTIONS", DEFAULT_POOL_CONNECTIONS)?,
        })
    }
}

fn required_var(name: &str) -> Result<String, InfobloxError> {
    env::var(name)
        .map_err(|_| InfobloxError::InvalidConfig(format!("{} environment variable is required", name)))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, InfobloxError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| InfobloxError::InvalidConfig(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
