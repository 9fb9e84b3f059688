//! Configuration management for the solar quick-check service.
//!
//! Every setting has a default, so the service starts without any
//! environment. A `.env` file in the working directory is honored if present.

use crate::error::{ConfigError, ConfigResult};
use crate::verdict::Verdict;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the solar quick-check service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Largest accepted request body in bytes (default: 65536)
    pub max_body_bytes: usize,

    /// Seconds a client has to deliver a full request (default: 10)
    pub request_timeout: u64,

    /// Answer every valid submission with this verdict instead of a coin flip
    pub fixed_verdict: Option<Verdict>,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SOLAR_CHECK_BIND_ADDR`: listen address (default: 127.0.0.1:3000)
    /// - `SOLAR_CHECK_MAX_BODY_BYTES`: body size limit (default: 65536)
    /// - `REQUEST_TIMEOUT`: request read timeout in seconds (default: 10)
    /// - `SOLAR_CHECK_FIXED_VERDICT`: `yes` or `no` to disable the coin flip
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();

        let bind_addr = match env::var("SOLAR_CHECK_BIND_ADDR") {
            Ok(val) => val
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "SOLAR_CHECK_BIND_ADDR".to_string(),
                    reason: format!("Must be a socket address like 0.0.0.0:3000, got: {}", val),
                })?,
            Err(_) => Self::default_bind_addr(),
        };

        let max_body_bytes = Self::parse_env_usize("SOLAR_CHECK_MAX_BODY_BYTES", 64 * 1024)?;
        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SOLAR_CHECK_MAX_BODY_BYTES".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let fixed_verdict = match env::var("SOLAR_CHECK_FIXED_VERDICT") {
            Ok(val) if !val.trim().is_empty() => {
                Some(val.parse::<Verdict>().map_err(|reason| ConfigError::InvalidValue {
                    var: "SOLAR_CHECK_FIXED_VERDICT".to_string(),
                    reason,
                })?)
            }
            _ => None,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bind_addr,
            max_body_bytes,
            request_timeout,
            fixed_verdict,
            log_level,
        })
    }

    /// The request read timeout as a `Duration`.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    fn default_bind_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: Self::default_bind_addr(),
            max_body_bytes: 64 * 1024,
            request_timeout: 10,
            fixed_verdict: None,
            log_level: "info".to_string(),
        }
    }
}
