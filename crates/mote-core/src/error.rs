//! Error types for Mote

use thiserror::Error;

/// The main error type for Mote operations
#[derive(Debug, Error)]
pub enum MoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown shape: {value} is not one of {allowed:?}")]
    UnknownShape { value: String, allowed: Vec<String> },
}

/// Result type alias for Mote operations
pub type Result<T> = std::result::Result<T, MoteError>;

impl From<toml::de::Error> for MoteError {
    fn from(err: toml::de::Error) -> Self {
        MoteError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for MoteError {
    fn from(err: toml::ser::Error) -> Self {
        MoteError::TomlSerError(err.to_string())
    }
}
