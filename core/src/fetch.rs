//! Fetchers: turn raw source output into normalized fragments.

use tracing::debug;

use crate::error::Result;
use crate::source::{Facet, MetadataSource};
use crate::text::{
    collapse_block_terminators, join_fragments, normalize_line_endings, terminate_view, trim_blank,
};
use crate::trigger::fixup_trigger;
use crate::types::ObjectType;

/// Fetches and normalizes the generated DDL of one object.
///
/// Returns an empty string when the service has no DDL for the object.
/// Views and materialized views get a terminator line after a trailing
/// comment; every other type has the blank lines in front of its block
/// terminators collapsed.
pub fn fetch_ddl<S: MetadataSource>(
    source: &S,
    object_type: ObjectType,
    name: &str,
    schema: &str,
) -> Result<String> {
    debug!(schema, name, object_type = %object_type, "fetching object DDL");

    let Some(raw) = source.object_ddl(object_type.ddl_keyword(), name, schema)? else {
        return Ok(String::new());
    };

    let normalized = normalize_line_endings(&raw);
    let ddl = trim_blank(&normalized);
    if ddl.is_empty() {
        return Ok(String::new());
    }

    if object_type.is_view_like() {
        Ok(terminate_view(ddl))
    } else {
        Ok(collapse_block_terminators(ddl))
    }
}

/// Fetches every trigger on `schema.table` as one text block, fragments
/// separated by a blank line.
pub fn fetch_triggers<S: MetadataSource>(source: &S, schema: &str, table: &str) -> Result<String> {
    debug!(schema, table, "fetching triggers");

    let fragments: Vec<String> = source
        .trigger_ddl(schema, table)?
        .iter()
        .flat_map(|ddl| fixup_trigger(ddl, schema, table))
        .collect();
    Ok(join_fragments(fragments))
}

/// Runs one facet query and joins its rows, in query order, into one
/// fragment. Each row is trimmed on both ends.
pub fn fetch_facet<S: MetadataSource>(
    source: &S,
    facet: Facet,
    schema: &str,
    name: &str,
) -> Result<String> {
    debug!(schema, name, facet = %facet, "fetching facet");

    let rows = source.facet_rows(facet, schema, name)?;
    Ok(join_fragments(rows.iter().map(|row| {
        trim_blank(&normalize_line_endings(row)).to_string()
    })))
}
