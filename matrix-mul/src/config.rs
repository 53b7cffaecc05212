//! Connection and block-size settings.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use block_client::BlockClient;

use crate::error::{Error, Result};
use crate::multiplier::{BlockMultiplier, DEFAULT_BLOCK_SIZE};

/// Settings for reaching the block compute service.
///
/// `from_env` reads `HOST`, `PORT`, `BLOCK_SIZE` and `REQUEST_TIMEOUT_MS`;
/// unset variables keep their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub block_size: usize,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 30043,
            block_size: DEFAULT_BLOCK_SIZE,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse("PORT", lookup("PORT"))?.unwrap_or(defaults.port),
            block_size: parse("BLOCK_SIZE", lookup("BLOCK_SIZE"))?
                .unwrap_or(defaults.block_size),
            timeout: parse("REQUEST_TIMEOUT_MS", lookup("REQUEST_TIMEOUT_MS"))?
                .map(Duration::from_millis),
        })
    }

    /// Overrides host and port from a `host:port` string.
    pub fn set_server_addr(&mut self, addr: &str) -> Result<()> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| Error::Config(format!("expected host:port, got {addr:?}")))?;
        self.port = parse("port", Some(port.to_string()))?.unwrap_or(self.port);
        self.host = host.to_string();
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connects a [`BlockClient`] and wraps it in a [`BlockMultiplier`].
    pub async fn connect(&self) -> Result<BlockMultiplier<BlockClient>> {
        let client = match self.timeout {
            Some(timeout) => BlockClient::connect_with_timeout(self.server_addr(), timeout).await?,
            None => BlockClient::connect(self.server_addr()).await?,
        };
        BlockMultiplier::with_block_size(client, self.block_size)
    }
}

fn parse<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|v| {
            v.parse()
                .map_err(|e| Error::Config(format!("{key}={v:?}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_addr(), "127.0.0.1:30043");
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "compute.local"),
            ("PORT", "9000"),
            ("BLOCK_SIZE", "8"),
            ("REQUEST_TIMEOUT_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr(), "compute.local:9000");
        assert_eq!(config.block_size, 8);
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn server_addr_override() {
        let mut config = Config::default();
        config.set_server_addr("10.0.0.2:4000").unwrap();
        assert_eq!(config.server_addr(), "10.0.0.2:4000");

        assert!(config.set_server_addr("nohost").is_err());
    }
}
