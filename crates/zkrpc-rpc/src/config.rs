//! JSON-RPC listener configuration, read from the environment.

use std::net::SocketAddr;

/// Environment variable holding the listen address.
pub const ADDR_ENV: &str = "ZK_JSONRPC_ADDR";

/// Listen address when [`ADDR_ENV`] is unset.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8547";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub addr: SocketAddr,
}

impl RpcConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. An unset or empty variable
    /// selects the default; an unparseable one is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(ADDR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                var: ADDR_ENV,
                value: raw.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { addr })
    }
}
