//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroValue { name: &'static str },

    /// The model identifier was empty.
    #[error("model identifier must not be empty")]
    EmptyModel,

    /// API prefix must be empty or look like `/segment[/segment...]`.
    #[error("invalid API prefix '{value}': must start with '/' and not end with '/'")]
    InvalidApiPrefix { value: String },

    /// A CORS origin could not be used as a header value.
    #[error("invalid CORS origin '{value}'")]
    InvalidCorsOrigin { value: String },
}
