//! Configuration and credential resolution for oradex.
//!
//! - [`ExtractConfig`] is the optional YAML configuration file.
//! - [`PasswordFile`] reads `host:port:database:username:password` lines.
//! - [`ConnectionSettings`] merges command-line values with the file and
//!   resolves them into [`Credentials`].

mod config;
mod credentials;
mod error;
mod passfile;

pub use config::{ConnectionConfig, ExtractConfig, ExtractionConfig};
pub use credentials::{ConnectionSettings, Credentials, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{ConfigError, Result};
pub use passfile::{DEFAULT_PASSWORD_FILE, PASSWORD_FILE_ENV, PasswordFile, locate_password_file};
