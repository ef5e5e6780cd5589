//! YAML configuration for extraction runs.
//!
//! Every section and field is optional. Command-line flags override the
//! values found here; see [`ConnectionSettings`](crate::ConnectionSettings)
//! for how connection coordinates are merged.
//!
//! # Example YAML
//!
//! ```yaml
//! connection:
//!   host: dbhost
//!   port: 1521
//!   database: ORCL
//!   username: scott
//!   password_file: /home/scott/.orapass
//! extract:
//!   base_dir: ./ddl
//!   schemas: [HR, SALES]
//!   exclude: []
//!   alter: false
//!   force: false
//!   storage: false
//!   needed_grants: false
//!   grants: true
//!   synonyms: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use oradex_core::{AssembleOptions, TransformConfig};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where and as whom to connect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Service name for EZConnect, or a TNS alias when no host is set.
    pub database: Option<String>,
    pub username: Option<String>,
    pub password_file: Option<PathBuf>,
}

/// What to extract and how the DDL is shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Root directory for schema-wide output.
    pub base_dir: Option<PathBuf>,
    /// Schemas to extract (empty = every non-vendor schema).
    pub schemas: Vec<String>,
    /// Schemas to skip when `schemas` is empty.
    pub exclude: Vec<String>,
    /// Emit constraints as separate `ALTER TABLE` statements.
    pub alter: bool,
    /// Emit `CREATE OR REPLACE FORCE` for views.
    pub force: bool,
    /// Keep storage and segment attribute clauses.
    pub storage: bool,
    pub needed_grants: bool,
    pub grants: bool,
    pub synonyms: bool,
}

/// Top-level configuration file.
///
/// # Examples
///
/// ```no_run
/// use oradex_config::ExtractConfig;
///
/// let config = ExtractConfig::load("oradex.yml").unwrap();
/// if config.is_schema_selected("HR") {
///     println!("HR will be extracted");
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub connection: ConnectionConfig,
    #[serde(rename = "extract")]
    pub extraction: ExtractionConfig,
}

impl ExtractConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ConfigError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::ConfigError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` if `schema` is in the exclusion list.
    pub fn is_excluded(&self, schema: &str) -> bool {
        self.extraction
            .exclude
            .iter()
            .any(|s| s.eq_ignore_ascii_case(schema))
    }

    /// Returns `true` if `schema` should be extracted.
    ///
    /// A non-empty allow-list decides on its own and the exclusion list is
    /// ignored. Otherwise every schema not excluded is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// # let yaml = "extract: { schemas: [HR], exclude: [HR, SCOTT] }";
    /// # let config: oradex_config::ExtractConfig = serde_yaml::from_str(yaml).unwrap();
    /// assert!(config.is_schema_selected("HR"));
    /// assert!(!config.is_schema_selected("SALES"));
    /// ```
    pub fn is_schema_selected(&self, schema: &str) -> bool {
        if !self.extraction.schemas.is_empty() {
            return self
                .extraction
                .schemas
                .iter()
                .any(|s| s.eq_ignore_ascii_case(schema));
        }
        !self.is_excluded(schema)
    }

    /// Session transforms requested by this configuration.
    pub fn transform(&self) -> TransformConfig {
        TransformConfig {
            constraints_as_alter: self.extraction.alter,
            force: self.extraction.force,
            storage: self.extraction.storage,
        }
    }

    /// Assembly toggles requested by this configuration.
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            needed_grants: self.extraction.needed_grants,
            grants: self.extraction.grants,
            synonyms: self.extraction.synonyms,
        }
    }
}
