//! The metadata source seam.
//!
//! The assembly pipeline only talks to the database through
//! [`MetadataSource`]. The Oracle backend implements it over a live
//! connection; tests implement it over in-memory fixtures.

use std::fmt;

use crate::error::Result;
use crate::types::{ObjectRef, ObjectType};

/// One category of supplementary metadata, each backed by a parameterized
/// catalogue query taking `(schema, name)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// `COMMENT ON COLUMN` statements, in column order.
    ColumnComments,
    /// `COMMENT ON TABLE` statement for a table or view.
    TableComments,
    /// `COMMENT ON MATERIALIZED VIEW` statement.
    MaterializedViewComments,
    /// `GRANT` statements for privileges granted on the object.
    GrantedPrivileges,
    /// `GRANT` statements the object is inferred to need. Over-approximates.
    NeededPrivileges,
    /// Index DDL for indexes not backing a constraint.
    Indexes,
    /// `CREATE SYNONYM` statements pointing at the object.
    Synonyms,
}

impl Facet {
    pub fn label(self) -> &'static str {
        match self {
            Self::ColumnComments => "column comments",
            Self::TableComments => "table comments",
            Self::MaterializedViewComments => "materialized view comments",
            Self::GrantedPrivileges => "granted privileges",
            Self::NeededPrivileges => "needed privileges",
            Self::Indexes => "indexes",
            Self::Synonyms => "synonyms",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read access to the catalogue and the DDL-generation service.
///
/// Implementations are used from a single thread, one call at a time; each
/// call blocks until the database answers.
pub trait MetadataSource {
    /// Generates the DDL for one object. `ddl_keyword` is the generation
    /// service's name for the type (see
    /// [`ObjectType::ddl_keyword`](crate::ObjectType::ddl_keyword)).
    ///
    /// Returns `Ok(None)` when the service produced no DDL.
    fn object_ddl(&self, ddl_keyword: &str, name: &str, schema: &str) -> Result<Option<String>>;

    /// Generates the DDL of every trigger defined on `schema.table`, ordered
    /// by trigger owner and name.
    fn trigger_ddl(&self, schema: &str, table: &str) -> Result<Vec<String>>;

    /// Runs the query behind `facet` and returns its rows in query order.
    fn facet_rows(&self, facet: Facet, schema: &str, name: &str) -> Result<Vec<String>>;
}

/// Enumeration of the catalogue: which schemas and objects exist.
pub trait Catalog {
    /// Owners of extractable objects, excluding vendor-internal schemas.
    fn schemas(&self) -> Result<Vec<String>>;

    /// Extractable objects owned by `schema`, one entry per object name.
    fn objects(&self, schema: &str) -> Result<Vec<ObjectRef>>;

    /// Resolves the type of `schema.name`.
    ///
    /// When several objects share the name, materialized views, packages
    /// and types win over their underlying tables and bodies, and synonyms
    /// come last.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectNotFound`](crate::ExtractError::ObjectNotFound) when
    /// the catalogue has no such object.
    fn object_type(&self, schema: &str, name: &str) -> Result<ObjectType>;
}
