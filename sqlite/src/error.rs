//! Error types for SQLite script execution and introspection.

use schema_doc_core::DocumentError;
use thiserror::Error;

/// Errors that can occur while executing scripts or documenting a SQLite database.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// The database could not be opened.
    #[error("failed to open database '{target}': {message}")]
    OpenError { target: String, message: String },

    /// A script statement failed; the whole script was rolled back.
    #[error("statement {statement} failed, no changes were committed: {message}")]
    ExecutionError { statement: usize, message: String },

    /// A script statement ended the surrounding transaction while running,
    /// so statements before it may already be committed.
    #[error("statement {statement} ended the script transaction early, earlier statements may have been committed")]
    TransactionEnded { statement: usize },

    /// Documentation failed before any table could be described.
    #[error(transparent)]
    DocumentError(#[from] DocumentError),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
