//! # Configuration
//!
//! Settings are read from the process environment. The binary calls `dotenv` first, so a
//! `.env` file next to the working directory works too.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TMDB_API_KEY` | *(required)* | Bearer credential for the metadata API |
//! | `TMDB_API_BASE_URL` | `https://api.themoviedb.org/3` | API root, no trailing slash needed |
//! | `DISCOVERY_DEBOUNCE_MS` | `500` | Quiet window before typed text is searched |
//! | `DISCOVERY_MAILBOX_CAPACITY` | `32` | Controller mailbox size |

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings injected into the [`FetchGateway`](crate::gateway::FetchGateway).
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Timing and sizing for the query controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub debounce: Duration,
    pub mailbox_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub controller: ControllerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any name → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = read("TMDB_API_KEY").ok_or(ConfigError::Missing("TMDB_API_KEY"))?;
        let base_url = read("TMDB_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let debounce = match read("DISCOVERY_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(parse_number("DISCOVERY_DEBOUNCE_MS", &raw)?),
            None => DEFAULT_DEBOUNCE,
        };
        let mailbox_capacity = match read("DISCOVERY_MAILBOX_CAPACITY") {
            Some(raw) => match parse_number("DISCOVERY_MAILBOX_CAPACITY", &raw)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        name: "DISCOVERY_MAILBOX_CAPACITY",
                        value: raw,
                    })
                }
                n => n as usize,
            },
            None => DEFAULT_MAILBOX_CAPACITY,
        };

        Ok(Self {
            gateway: GatewayConfig { base_url, api_key },
            controller: ControllerConfig {
                debounce,
                mailbox_capacity,
            },
        })
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
