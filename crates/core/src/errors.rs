//! Error types and handling
//!
//! This module provides domain-specific error types for the configuration
//! resolver. The taxonomy follows the recovery policy: invalid environment
//! variable names are recoverable (logged and skipped), a missing mounted
//! configuration file is a legitimate non-error, an unreadable mounted file
//! is fatal, and a refused license gate aborts before resolution starts.

use thiserror::Error;

/// Configuration-file related errors
#[derive(Error, Debug)]
pub enum ConfError {
    /// No configuration file is mounted at the expected path.
    ///
    /// This is not a hard failure: resolution proceeds with defaults and
    /// environment variables only. Callers decide whether to treat it as one.
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    /// The mounted configuration file exists but could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resolved configuration file could not be written
    #[error("Failed to write configuration file {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Environment-variable related errors
#[derive(Error, Debug)]
pub enum EnvError {
    /// Candidate variable fails the setting naming grammar.
    ///
    /// The message text is load-bearing: the orchestration harness greps the
    /// container log for it.
    #[error("{name} not written to conf file because settings that start with a number are not permitted")]
    InvalidSettingName { name: String },
}

/// License-gate errors, raised before configuration resolution
#[derive(Error, Debug)]
pub enum LicenseError {
    /// Enterprise edition started without an accepted license agreement
    #[error(
        "In order to use Neo4j Enterprise Edition you must accept the license agreement.\n\
         To accept the license agreement set the environment variable\n\
         NEO4J_ACCEPT_LICENSE_AGREEMENT=yes\n\
         To accept the terms of the evaluation agreement set it to \"eval\"."
    )]
    NotAccepted,
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum EntrypointError {
    /// Configuration-file errors
    #[error("Configuration error: {0}")]
    Conf(#[from] ConfError),

    /// Environment-variable errors
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    /// License-gate errors
    #[error("License error: {0}")]
    License(#[from] LicenseError),

    /// Unrecognized server version string
    #[error("Invalid server version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// Internal/generic errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Convenience type alias for Results with EntrypointError
pub type Result<T> = std::result::Result<T, EntrypointError>;
