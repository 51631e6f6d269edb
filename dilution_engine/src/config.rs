//! Server configuration.
//!
//! Settings come from environment variables with sensible defaults and
//! may be overridden from the command line.

use crate::error::ConfigError;
use std::net::SocketAddr;

/// Environment variable holding the HTTP bind address.
pub const BIND_ADDR_VAR: &str = "DILUTION_BIND_ADDR";
/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "DILUTION_LOG";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "dilution_engine=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let log_filter = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            bind_addr: parse_bind_addr(&addr)?,
            log_filter,
        })
    }

    /// Replace the bind address, e.g. from a `--bind` flag.
    pub fn with_bind_addr(mut self, addr: &str) -> Result<Self, ConfigError> {
        self.bind_addr = parse_bind_addr(addr)?;
        Ok(self)
    }
}

fn parse_bind_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.trim().parse().map_err(|source| ConfigError::BindAddr {
        addr: addr.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(
            config.bind_addr,
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (LOG_VAR, "dilution_engine=debug"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_filter, "dilution_engine=debug");
    }

    #[test]
    fn test_malformed_bind_addr() {
        let err = ServerConfig::from_lookup(|k| (k == BIND_ADDR_VAR).then(|| "nope".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("invalid bind address 'nope'"));

        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert!(config.clone().with_bind_addr("localhost").is_err());
        assert_eq!(config.with_bind_addr("[::1]:4000").unwrap().bind_addr.port(), 4000);
    }
}
