//! Error types for Marrow

use thiserror::Error;

/// The main error type for Marrow operations
#[derive(Debug, Error)]
pub enum MarrowError {
    #[error("Clip error: {0}")]
    ClipError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Marrow operations
pub type Result<T> = std::result::Result<T, MarrowError>;

impl From<toml::de::Error> for MarrowError {
    fn from(err: toml::de::Error) -> Self {
        MarrowError::TomlParseError(err.to_string())
    }
}
