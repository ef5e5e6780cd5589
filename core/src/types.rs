//! Object model for DDL extraction.
//!
//! This module defines the catalogue object types the extractor understands,
//! the resolved reference to a single object, and the per-call toggles of the
//! assembly pipeline. The types serialize with [`serde`] using the catalogue
//! spelling of each type (e.g. `"MATERIALIZED VIEW"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Kind of schema object, as named by the database catalogue.
///
/// The set is closed: catalogue names outside of it are rejected when
/// parsed, so every extracted object maps to a known DDL-generation keyword.
///
/// # Examples
///
/// ```
/// use oradex_core::ObjectType;
///
/// let ty: ObjectType = "MATERIALIZED VIEW".parse().unwrap();
/// assert_eq!(ty, ObjectType::MaterializedView);
/// assert_eq!(ty.ddl_keyword(), "MATERIALIZED_VIEW");
/// assert_eq!(ty.dir_name(), "MATERIALIZED_VIEW");
/// assert!("INDEX".parse::<ObjectType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "VIEW")]
    View,
    #[serde(rename = "MATERIALIZED VIEW")]
    MaterializedView,
    #[serde(rename = "DATABASE LINK")]
    DatabaseLink,
    #[serde(rename = "PACKAGE")]
    Package,
    #[serde(rename = "PROCEDURE")]
    Procedure,
    #[serde(rename = "FUNCTION")]
    Function,
    #[serde(rename = "SEQUENCE")]
    Sequence,
    #[serde(rename = "TYPE")]
    Type,
    #[serde(rename = "SYNONYM")]
    Synonym,
}

impl ObjectType {
    /// All supported object types, in catalogue enumeration order.
    pub const ALL: [ObjectType; 10] = [
        Self::DatabaseLink,
        Self::Function,
        Self::MaterializedView,
        Self::Package,
        Self::Procedure,
        Self::Sequence,
        Self::Synonym,
        Self::Table,
        Self::Type,
        Self::View,
    ];

    /// Returns the catalogue spelling of the type.
    pub fn catalog_name(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED VIEW",
            Self::DatabaseLink => "DATABASE LINK",
            Self::Package => "PACKAGE",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::Sequence => "SEQUENCE",
            Self::Type => "TYPE",
            Self::Synonym => "SYNONYM",
        }
    }

    /// Returns the keyword the DDL-generation service expects for the type.
    ///
    /// Only database links and materialized views differ from the catalogue
    /// name.
    pub fn ddl_keyword(self) -> &'static str {
        match self {
            Self::DatabaseLink => "DB_LINK",
            Self::MaterializedView => "MATERIALIZED_VIEW",
            other => other.catalog_name(),
        }
    }

    /// Returns the output directory name: the catalogue name with each run
    /// of whitespace replaced by a single underscore.
    pub fn dir_name(self) -> String {
        self.catalog_name()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Tables, views and materialized views carry indexes, comments and
    /// triggers, and are assembled from several facets.
    pub fn is_relation(self) -> bool {
        matches!(self, Self::Table | Self::View | Self::MaterializedView)
    }

    /// Views and materialized views get the trailing terminator fixup.
    pub fn is_view_like(self) -> bool {
        matches!(self, Self::View | Self::MaterializedView)
    }

    /// Tables and materialized views own indexes.
    pub fn has_indexes(self) -> bool {
        matches!(self, Self::Table | Self::MaterializedView)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}

impl FromStr for ObjectType {
    type Err = ExtractError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|ty| ty.catalog_name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ExtractError::UnsupportedObjectType(raw.to_string()))
    }
}

/// A resolved reference to one schema object.
///
/// # Examples
///
/// ```
/// use oradex_core::{ObjectRef, ObjectType};
///
/// let obj = ObjectRef::new("HR", "EMPLOYEES", ObjectType::Table);
/// assert_eq!(obj.to_string(), "\"HR\".\"EMPLOYEES\" (TABLE)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Owning schema.
    pub schema: String,
    /// Object name, exactly as stored in the catalogue.
    pub name: String,
    /// Resolved object type.
    pub object_type: ObjectType,
}

impl ObjectRef {
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        object_type: ObjectType,
    ) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            object_type,
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".\"{}\" ({})", self.schema, self.name, self.object_type)
    }
}

/// Optional facets included by [`assemble`](crate::assemble).
///
/// All toggles default to off; with every toggle off the privilege and
/// synonym queries are never issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleOptions {
    /// Prepend the inferred privileges the object needs on the objects it
    /// references.
    pub needed_grants: bool,
    /// Append the privileges granted on the object.
    pub grants: bool,
    /// Append the synonyms created on the object.
    pub synonyms: bool,
}
