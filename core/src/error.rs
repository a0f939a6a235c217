//! Error types for documentation and configuration.
//!
//! [`DocumentError::Introspection`] is the only failure that aborts document
//! generation. [`DocumentError::TableIntrospection`] is produced per table
//! and rendered inline instead of being propagated.

use thiserror::Error;

/// Errors raised while introspecting a database for documentation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The table list could not be read; the database is unusable.
    #[error("cannot enumerate tables: {0}")]
    Introspection(String),

    /// A single table could not be described.
    #[error("error processing table `{table}`: {message}")]
    TableIntrospection { table: String, message: String },
}

impl DocumentError {
    /// The underlying failure, without the table or context prefix.
    pub fn message(&self) -> &str {
        match self {
            DocumentError::Introspection(message) => message,
            DocumentError::TableIntrospection { message, .. } => message,
        }
    }
}

/// Errors loading or saving a [`DocConfig`](crate::DocConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`DocumentError`].
pub type Result<T> = std::result::Result<T, DocumentError>;
