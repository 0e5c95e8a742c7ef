//! Runtime configuration read from the environment.

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub const BIND_ADDR_ENV: &str = "BATHS_BIND_ADDR";
pub const CORS_ORIGIN_ENV: &str = "BATHS_CORS_ORIGIN";
pub const LOG_FILTER_ENV: &str = "BATHS_LOG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Single allowed CORS origin; any origin when unset
    pub cors_origin: Option<HeaderValue>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = socket_addr_from_env(BIND_ADDR_ENV, DEFAULT_BIND_ADDR)?;

        let cors_origin = optional_env(CORS_ORIGIN_ENV)
            .map(|origin| {
                HeaderValue::from_str(&origin)
                    .with_context(|| format!("invalid {CORS_ORIGIN_ENV}: {origin}"))
            })
            .transpose()?;

        let log_filter =
            optional_env(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr,
            cors_origin,
            log_filter,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origin: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Unset and blank values are treated the same
fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn socket_addr_from_env(name: &str, default: &str) -> Result<SocketAddr> {
    let value = optional_env(name).unwrap_or_else(|| default.to_string());
    SocketAddr::from_str(&value).map_err(|err| anyhow!("invalid socket addr for {name}: {err}"))
}
