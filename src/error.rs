//! Error handling for pidbm
//!
//! This module defines the custom error types for the pidbm application.
//! It categorizes the failure modes of the tool (resolution failures,
//! argument-shape errors, schema precondition failures, storage errors)
//! and supplies the user-facing messages for each of them.
//!
//! The module uses thiserror to minimize boilerplate code and create
//! a consistent error handling approach throughout the codebase.

use thiserror::Error;

/// PidbmError represents all possible errors that can occur in the pidbm application
///
/// Each variant carries enough context to name the offending argument or
/// table in the message printed to the operator. All errors terminate the
/// current invocation; there is no retry or partial-success recovery.
#[derive(Error, Debug)]
pub enum PidbmError {
    /// Error during file system operations (config file, database file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by the underlying SQLite engine, propagated verbatim
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A referenced name or id does not resolve in its target view
    #[error("invalid {view} '{token}', use `list {view}` to see them")]
    NotFound { view: String, token: String },

    /// Wrong arity, malformed sub-command or malformed numeric literal
    #[error("{0}")]
    InvalidArgument(String),

    /// The database schema does not match the version this tool understands
    #[error("invalid database schema version, should be {expected}, version {found} found")]
    SchemaVersionMismatch { expected: String, found: String },

    /// No usable connection string could be discovered
    #[error("no connection info, use -c or set PIDUINO_CONN_INFO")]
    NoConnectionInfo,
}

impl PidbmError {
    /// Shorthand for a [`PidbmError::NotFound`] naming the view and token
    pub fn not_found(view: &str, token: &str) -> Self {
        PidbmError::NotFound {
            view: view.to_string(),
            token: token.to_string(),
        }
    }

    /// Shorthand for an [`PidbmError::InvalidArgument`] with a formatted message
    pub fn invalid(msg: impl Into<String>) -> Self {
        PidbmError::InvalidArgument(msg.into())
    }
}

/// Result type alias for operations that can produce a PidbmError
pub type PidbmResult<T> = std::result::Result<T, PidbmError>;
