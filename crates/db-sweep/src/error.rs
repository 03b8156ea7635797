//! Error types for truncation operations.

use thiserror::Error;

/// Main error type for truncation operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// An option key the constructor does not recognize.
    #[error("unknown option: '{key}' (supported options: only, except)")]
    UnknownOption { key: String },

    /// Both `only` and `except` were supplied with non-empty values.
    #[error("the 'only' and 'except' options are mutually exclusive")]
    ConflictingOptions,

    /// Configuration error (malformed options document, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// A vendor identifier with no registered truncation strategy.
    #[error("unknown database vendor: '{0}'. Supported vendors: mysql, sqlite, jdbc, postgres, mssql, oracle")]
    UnknownVendor(String),

    /// The server rejected a SQL statement.
    ///
    /// Connection implementations must use this kind for statement
    /// rejections, not for connectivity failures - the JDBC fallback
    /// discriminates on it.
    #[error("statement rejected: {statement}: {message}")]
    StatementInvalid { statement: String, message: String },

    /// Connectivity or I/O failure on the database connection.
    #[error("database connection error: {0}")]
    Transport(String),
}

impl SweepError {
    /// Create a StatementInvalid error for a statement.
    pub fn statement_invalid(statement: impl Into<String>, message: impl Into<String>) -> Self {
        SweepError::StatementInvalid {
            statement: statement.into(),
            message: message.into(),
        }
    }

    /// Create a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        SweepError::Transport(message.into())
    }
}

/// Result type alias for truncation operations.
pub type Result<T> = std::result::Result<T, SweepError>;
