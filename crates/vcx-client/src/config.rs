//! Client configuration.
//!
//! Base URLs for the issuer and holder services plus the fetch policy.
//! Defaults point at the local three-role setup. Override via environment
//! variables or explicit construction for tests.

use std::time::Duration;

use url::Url;

pub const DEFAULT_ISSUER_URL: &str = "http://localhost:3001";
pub const DEFAULT_HOLDER_URL: &str = "http://localhost:3002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the issuer and holder live and how patiently to fetch from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the issuer service.
    pub issuer_url: Url,
    /// Base URL of the holder service.
    pub holder_url: Url,
    /// Per-request timeout. Expiry is a transport error.
    pub timeout: Duration,
    /// Retries after the first attempt, on transport errors only.
    /// `0` disables retrying.
    pub max_retries: u32,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VCX_ISSUER_URL` (default: `http://localhost:3001`)
    /// - `VCX_HOLDER_URL` (default: `http://localhost:3002`)
    /// - `VCX_FETCH_TIMEOUT_SECS` (default: 30)
    /// - `VCX_FETCH_MAX_RETRIES` (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            issuer_url: env_url("VCX_ISSUER_URL", DEFAULT_ISSUER_URL)?,
            holder_url: env_url("VCX_HOLDER_URL", DEFAULT_HOLDER_URL)?,
            timeout: Duration::from_secs(env_number(
                "VCX_FETCH_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_retries: env_number("VCX_FETCH_MAX_RETRIES", 0)?,
        })
    }

    /// Configuration pointing at explicit base URLs with default fetch policy.
    pub fn new(issuer_url: &str, holder_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            issuer_url: parse_url("issuer_url", issuer_url)?,
            holder_url: parse_url("holder_url", holder_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 0,
        })
    }

    /// Configuration pointing at services on localhost ports (for testing).
    pub fn local(issuer_port: u16, holder_port: u16) -> Result<Self, ConfigError> {
        let mut cfg = Self::new(
            &format!("http://127.0.0.1:{issuer_port}"),
            &format!("http://127.0.0.1:{holder_port}"),
        )?;
        cfg.timeout = Duration::from_secs(5);
        Ok(cfg)
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn env_number<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidNumber(var.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_builds_valid_config() {
        let cfg = ClientConfig::local(9001, 9002).unwrap();
        assert_eq!(cfg.issuer_url.as_str(), "http://127.0.0.1:9001/");
        assert_eq!(cfg.holder_url.as_str(), "http://127.0.0.1:9002/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_retries, 0);
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("VCX_NONEXISTENT_VAR_12345", "http://localhost:3001").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("VCX_TEST_BAD_URL", "not a url");
        let result = env_url("VCX_TEST_BAD_URL", "http://localhost:3001");
        std::env::remove_var("VCX_TEST_BAD_URL");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(..))));
    }

    #[test]
    fn env_number_defaults_and_rejects_garbage() {
        assert_eq!(env_number("VCX_NONEXISTENT_NUM_12345", 30u64).unwrap(), 30);
        std::env::set_var("VCX_TEST_BAD_NUM", "soon");
        let result = env_number("VCX_TEST_BAD_NUM", 30u64);
        std::env::remove_var("VCX_TEST_BAD_NUM");
        assert!(matches!(result, Err(ConfigError::InvalidNumber(..))));
    }

    #[test]
    fn new_rejects_relative_urls() {
        assert!(ClientConfig::new("/issuer", "http://localhost:3002").is_err());
    }
}
