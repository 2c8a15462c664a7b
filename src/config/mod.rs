//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SCREENER_*` environment variables.
//! Provider credentials (for example `GEMINI_API_KEY`) are read by `genai` directly.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::constants::{
    DEFAULT_MODEL, DEFAULT_RATE_LIMIT, DEFAULT_RATE_SWEEP_SECS, DEFAULT_RATE_WINDOW_SECS,
    DEFAULT_SCORING_TIMEOUT_SECS, DEFAULT_SERVICE_NAME,
};

/// Log line format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SCREENER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Name reported by `/health` and `/`.
    pub service_name: String,

    /// Model identifier handed to the provider client. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Upper bound on a single upstream scoring call. Default: `30`.
    pub scoring_timeout_secs: u64,

    /// Extra attempts after an upstream failure. Default: `0`.
    pub scoring_max_retries: u32,

    /// Requests admitted per client within one window. Default: `10`.
    pub rate_limit: u32,

    /// Sliding window length. Default: `60`.
    pub rate_window_secs: u64,

    /// How often idle client records are swept. Default: `300`.
    pub rate_sweep_secs: u64,

    /// Allowed CORS origins; `["*"]` allows any. Default: `*`.
    pub cors_origins: Vec<String>,

    /// Optional prefix for the scoring routes (for example `/api/v1`). Default: empty.
    pub api_prefix: String,

    /// Use the deterministic mock scorer instead of a real provider.
    pub mock_provider: bool,

    pub log_format: LogFormat,

    /// Default filter directive when `RUST_LOG` is unset. Default: `info`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            model: DEFAULT_MODEL.to_string(),
            scoring_timeout_secs: DEFAULT_SCORING_TIMEOUT_SECS,
            scoring_max_retries: 0,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
            rate_sweep_secs: DEFAULT_RATE_SWEEP_SECS,
            cors_origins: vec!["*".to_string()],
            api_prefix: String::new(),
            mock_provider: false,
            log_format: LogFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SCREENER_PORT";
    const ENV_BIND_ADDR: &'static str = "SCREENER_BIND_ADDR";
    const ENV_SERVICE_NAME: &'static str = "SCREENER_SERVICE_NAME";
    const ENV_MODEL: &'static str = "SCREENER_MODEL";
    const ENV_SCORING_TIMEOUT: &'static str = "SCREENER_SCORING_TIMEOUT_SECS";
    const ENV_SCORING_MAX_RETRIES: &'static str = "SCREENER_SCORING_MAX_RETRIES";
    const ENV_RATE_LIMIT: &'static str = "SCREENER_RATE_LIMIT";
    const ENV_RATE_WINDOW: &'static str = "SCREENER_RATE_WINDOW_SECS";
    const ENV_RATE_SWEEP: &'static str = "SCREENER_RATE_SWEEP_SECS";
    const ENV_CORS_ORIGINS: &'static str = "SCREENER_CORS_ORIGINS";
    const ENV_API_PREFIX: &'static str = "SCREENER_API_PREFIX";
    const ENV_MOCK_PROVIDER: &'static str = "SCREENER_MOCK_PROVIDER";
    const ENV_LOG_FORMAT: &'static str = "SCREENER_LOG_FORMAT";
    const ENV_LOG_LEVEL: &'static str = "SCREENER_LOG_LEVEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let service_name =
            Self::parse_string_from_env(Self::ENV_SERVICE_NAME, defaults.service_name);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let scoring_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_SCORING_TIMEOUT, defaults.scoring_timeout_secs);
        let scoring_max_retries = Self::parse_u64_from_env(
            Self::ENV_SCORING_MAX_RETRIES,
            u64::from(defaults.scoring_max_retries),
        )
        .min(u64::from(u32::MAX)) as u32;
        let rate_limit =
            Self::parse_u64_from_env(Self::ENV_RATE_LIMIT, u64::from(defaults.rate_limit))
                .min(u64::from(u32::MAX)) as u32;
        let rate_window_secs =
            Self::parse_u64_from_env(Self::ENV_RATE_WINDOW, defaults.rate_window_secs);
        let rate_sweep_secs =
            Self::parse_u64_from_env(Self::ENV_RATE_SWEEP, defaults.rate_sweep_secs);
        let cors_origins = env::var(Self::ENV_CORS_ORIGINS)
            .map(|v| parse_cors_origins(&v))
            .unwrap_or(defaults.cors_origins);
        let api_prefix = env::var(Self::ENV_API_PREFIX)
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.api_prefix);
        let mock_provider =
            env::var_os(Self::ENV_MOCK_PROVIDER).is_some_and(|v| !v.is_empty());
        let log_format = match env::var(Self::ENV_LOG_FORMAT) {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => defaults.log_format,
        };
        let log_level = Self::parse_string_from_env(Self::ENV_LOG_LEVEL, defaults.log_level);

        Ok(Self {
            port,
            bind_addr,
            service_name,
            model,
            scoring_timeout_secs,
            scoring_max_retries,
            rate_limit,
            rate_window_secs,
            rate_sweep_secs,
            cors_origins,
            api_prefix,
            mock_provider,
            log_format,
            log_level,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.scoring_timeout_secs == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_SCORING_TIMEOUT,
            });
        }
        if self.rate_limit == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_RATE_LIMIT,
            });
        }
        if self.rate_window_secs == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_RATE_WINDOW,
            });
        }
        if self.rate_sweep_secs == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_RATE_SWEEP,
            });
        }

        if !self.api_prefix.is_empty()
            && (!self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/'))
        {
            return Err(ConfigError::InvalidApiPrefix {
                value: self.api_prefix.clone(),
            });
        }

        for origin in self.cors_origins.iter().filter(|o| o.as_str() != "*") {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidCorsOrigin {
                    value: origin.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn scoring_timeout(&self) -> Duration {
        Duration::from_secs(self.scoring_timeout_secs)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }

    pub fn rate_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.rate_sweep_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Splits a comma-separated origin list; `*` (alone or anywhere in the list) allows any.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        vec!["*".to_string()]
    } else {
        origins
    }
}
