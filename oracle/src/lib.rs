//! Oracle backend for DDL extraction.
//!
//! [`OracleSource`] implements [`MetadataSource`](oradex_core::MetadataSource)
//! and [`Catalog`](oradex_core::Catalog) over one `oracle` connection:
//!
//! - **`queries`** — the SQL catalogue against the `DBA_*` dictionary views
//!   and `DBMS_METADATA.GET_DDL`
//! - **`session`** — the session transform block built from a
//!   [`TransformConfig`](oradex_core::TransformConfig)
//!
//! The connecting user needs `SELECT` on the `DBA_*` views (for example
//! through `SELECT_CATALOG_ROLE`) to see objects outside its own schema.
//!
//! # Quick start
//!
//! ```no_run
//! use oradex_core::{AssembleOptions, Catalog, ObjectRef, TransformConfig, assemble};
//! use oradex_oracle::OracleSource;
//!
//! let source = OracleSource::connect("scott", "tiger", "//localhost:1521/ORCL",
//!     &TransformConfig::default()).unwrap();
//! let object_type = source.object_type("HR", "EMPLOYEES").unwrap();
//! let employees = ObjectRef::new("HR", "EMPLOYEES", object_type);
//! println!("{}", assemble(&source, &employees, &AssembleOptions::default()).unwrap());
//! ```

pub mod queries;
mod session;
mod source;

pub use session::transform_block;
pub use source::OracleSource;
