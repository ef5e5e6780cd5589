//! DDL assembly pipeline for Oracle schema objects.
//!
//! This crate turns the raw output of a database's DDL-generation service
//! and metadata dictionary into one normalized DDL document per object:
//!
//! - [`ObjectType`] / [`ObjectRef`] — the objects that can be extracted.
//! - [`MetadataSource`] — the seam to the database: generated object DDL,
//!   trigger DDL, and the per-[`Facet`] catalogue queries.
//! - [`Catalog`] — enumeration of schemas and objects, and type lookup.
//! - [`fetch_ddl`], [`fetch_triggers`], [`fetch_facet`] — fetch one piece and
//!   normalize it.
//! - [`assemble`] — concatenate all pieces of one object in a fixed order.
//! - [`TransformConfig`] — session-scoped generation toggles a backend
//!   applies when it opens its connection.
//!
//! # Example
//!
//! ```
//! use oradex_core::*;
//!
//! struct Fixed;
//!
//! impl MetadataSource for Fixed {
//!     fn object_ddl(&self, _: &str, _: &str, _: &str) -> Result<Option<String>> {
//!         Ok(Some("\n  CREATE SEQUENCE \"HR\".\"EMP_SEQ\" START WITH 1;\n".into()))
//!     }
//!     fn trigger_ddl(&self, _: &str, _: &str) -> Result<Vec<String>> {
//!         Ok(Vec::new())
//!     }
//!     fn facet_rows(&self, _: Facet, _: &str, _: &str) -> Result<Vec<String>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let seq = ObjectRef::new("HR", "EMP_SEQ", ObjectType::Sequence);
//! let ddl = assemble(&Fixed, &seq, &AssembleOptions::default()).unwrap();
//! assert_eq!(ddl, "CREATE SEQUENCE \"HR\".\"EMP_SEQ\" START WITH 1;");
//! ```

mod assemble;
mod error;
mod fetch;
mod source;
pub mod text;
mod transform;
pub mod trigger;
mod types;

pub use assemble::assemble;
pub use error::{ExtractError, Result};
pub use fetch::{fetch_ddl, fetch_facet, fetch_triggers};
pub use source::{Catalog, Facet, MetadataSource};
pub use transform::TransformConfig;
pub use types::*;
