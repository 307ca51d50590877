//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. The HTTP adapter is stateless with respect to proofs:
//! it holds only the prover and configuration, never a handle registry.

use std::sync::Arc;

use zkrpc_prover::{Prover, StatelessProver, TransparentBackend};

/// Environment variable selecting the HTTP listen port.
pub const PORT_ENV: &str = "ZK_RPC_PORT";

/// Port used when [`PORT_ENV`] is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

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

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. An unset or empty variable
    /// selects the default; an unparseable one is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup(PORT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: PORT_ENV,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub prover: Arc<dyn StatelessProver>,
    pub config: AppConfig,
}

impl AppState {
    /// State backed by a fresh transparent prover and default configuration.
    pub fn new() -> Self {
        Self::with_prover(
            Arc::new(Prover::new(TransparentBackend::new())),
            AppConfig::default(),
        )
    }

    pub fn with_prover(prover: Arc<dyn StatelessProver>, config: AppConfig) -> Self {
        Self { prover, config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
