//! Error types for configuration and credential resolution.
//!
//! Every variant is fatal for a run: without a configuration and a password
//! there is nothing to connect to.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration or resolving
/// credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A password file line does not have the expected shape.
    #[error("invalid password file {}: line {line}: {reason}", path.display())]
    InvalidPasswordFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// No password file entry matches the connection coordinates.
    #[error("no password found for {username}@{host}:{port}/{database}")]
    PasswordNotFound {
        host: String,
        port: u16,
        database: String,
        username: String,
    },

    /// No database name was given on the command line, in the environment
    /// or in the configuration file.
    #[error("no database specified (use -d, ORACLE_SID, or connection.database)")]
    MissingDatabase,
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
