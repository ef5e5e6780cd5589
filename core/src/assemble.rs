//! Object assembly: the ordered concatenation of all fragments of one
//! object into a single DDL document.
//!
//! For tables, views and materialized views the document order is:
//!
//! 1. needed grants (optional)
//! 2. the `CREATE` statement
//! 3. indexes (tables and materialized views only)
//! 4. `ALTER` statements, sorted
//! 5. the object comment
//! 6. column comments
//! 7. triggers
//! 8. granted privileges (optional)
//! 9. synonyms (optional)
//!
//! Every other type is its generated DDL, wrapped by the same optional
//! grant and synonym fragments.
//!
//! Only a failure of the primary DDL fetch aborts assembly. Any other facet
//! that fails is logged and contributes nothing.

use tracing::warn;

use crate::error::Result;
use crate::fetch::{fetch_ddl, fetch_facet, fetch_triggers};
use crate::source::{Facet, MetadataSource};
use crate::text::{join_fragments, split_alter_statements};
use crate::types::{AssembleOptions, ObjectRef, ObjectType};

/// Assembles the complete DDL document for `object`.
///
/// # Errors
///
/// Returns the error of the primary object DDL fetch. Facet failures are
/// logged at `WARN` and never returned.
pub fn assemble<S: MetadataSource>(
    source: &S,
    object: &ObjectRef,
    options: &AssembleOptions,
) -> Result<String> {
    let ddl = fetch_ddl(source, object.object_type, &object.name, &object.schema)?;

    let mut fragments = Vec::new();

    if options.needed_grants {
        fragments.push(facet_or_empty(source, object, Facet::NeededPrivileges));
    }

    if object.object_type.is_relation() {
        fragments.extend(relation_fragments(source, object, &ddl));
    } else {
        fragments.push(ddl);
    }

    if options.grants {
        fragments.push(facet_or_empty(source, object, Facet::GrantedPrivileges));
    }

    if options.synonyms {
        fragments.push(facet_or_empty(source, object, Facet::Synonyms));
    }

    Ok(join_fragments(fragments))
}

fn relation_fragments<S: MetadataSource>(source: &S, object: &ObjectRef, ddl: &str) -> Vec<String> {
    let (create, alters) = split_alter_statements(ddl);

    let mut fragments = vec![create];

    if object.object_type.has_indexes() {
        fragments.push(facet_or_empty(source, object, Facet::Indexes));
    }

    fragments.extend(alters);

    let comment_facet = if object.object_type == ObjectType::MaterializedView {
        Facet::MaterializedViewComments
    } else {
        Facet::TableComments
    };
    fragments.push(facet_or_empty(source, object, comment_facet));
    fragments.push(facet_or_empty(source, object, Facet::ColumnComments));

    match fetch_triggers(source, &object.schema, &object.name) {
        Ok(triggers) => fragments.push(triggers),
        Err(err) => {
            warn!(object = %object, error = %err, "failed to fetch triggers; skipping");
        }
    }

    fragments
}

fn facet_or_empty<S: MetadataSource>(source: &S, object: &ObjectRef, facet: Facet) -> String {
    fetch_facet(source, facet, &object.schema, &object.name).unwrap_or_else(|err| {
        warn!(object = %object, facet = %facet, error = %err, "failed to fetch facet; skipping");
        String::new()
    })
}
