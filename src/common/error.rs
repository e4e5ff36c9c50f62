//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Validation errors raised while building an announcement draft.
///
/// Every variant renders as a message suitable for sending straight back
/// to the announcement author, naming exactly what was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("No target channel. Add a `channel: name` line to your message.")]
    MissingChannel,

    #[error("Could not find any channel matching `{query}`.")]
    ChannelNotFound { query: String },

    #[error("Could not find these roles: {}.", .queries.join(", "))]
    RolesNotFound { queries: Vec<String> },

    #[error("`{value}` is not a color I know. Use a palette name (red, blue, ...) or a hex literal like 0x3498db.")]
    BadColor { value: String },

    #[error("Could not read `{value}` as a delay. Use tokens like `30s`, `45m`, `1h 30m`.")]
    BadDuration { value: String },

    #[error("Button needs exactly one `|` separator: `button: Label | https://...` (got `{spec}`).")]
    BadButton { spec: String },

    #[error("Button URL `{url}` must start with http:// or https://.")]
    BadButtonUrl { url: String },
}

/// Result type alias for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for draft building.
pub type DraftResult<T> = std::result::Result<T, DraftError>;
