//! Trigger DDL fixups.
//!
//! Generated trigger DDL does not always name the schema of the table in its
//! `ON <table>` clause, and it carries the `ALTER TRIGGER ... ENABLE`
//! statements glued to the end of the `CREATE TRIGGER` block. The helpers
//! here qualify the table reference and cut the text into one fragment per
//! statement.
//!
//! The trigger owner and the table owner are assumed to be the same schema;
//! cross-schema triggers already carry a qualified table reference.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::text::{
    BLOCK_TERMINATOR, STATEMENT_TERMINATOR, normalize_line_endings, trim_blank, trim_block_end,
};

const ALTER_TRIGGER: &str = "ALTER TRIGGER";

/// Qualifies the table named by the first `ON` clause with `schema` when it
/// has no schema of its own.
///
/// Returns `None` when no `ON` clause is found. The clause must be the word
/// `ON` (any case) with whitespace on both sides.
///
/// # Examples
///
/// ```
/// use oradex_core::trigger::qualify_on_clause;
///
/// let ddl = "CREATE TRIGGER trg\nBEFORE INSERT ON EMPLOYEES\nBEGIN NULL; END;";
/// assert_eq!(
///     qualify_on_clause(ddl, "HR").unwrap(),
///     "CREATE TRIGGER trg\nBEFORE INSERT ON \"HR\".EMPLOYEES\nBEGIN NULL; END;"
/// );
///
/// let qualified = "CREATE TRIGGER trg BEFORE INSERT ON \"HR\".\"EMPLOYEES\" BEGIN NULL; END;";
/// assert_eq!(qualify_on_clause(qualified, "HR").unwrap(), qualified);
/// assert!(qualify_on_clause("CREATE TRIGGER trg", "HR").is_none());
/// ```
pub fn qualify_on_clause(ddl: &str, schema: &str) -> Option<String> {
    // SAFETY: compile-time constant pattern, exercised by the tests below.
    static ON_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[\n\r\t ][Oo][Nn][\n\r\t ]+").expect("static regex must compile")
    });

    let clause = ON_RE.find(ddl)?;
    let head = &ddl[..clause.start()];
    let tail = &ddl[clause.end()..];
    let table_ref = tail
        .split(|ch: char| matches!(ch, '\n' | '\r' | '\t' | ' '))
        .next()
        .unwrap_or_default();

    if table_ref.contains('.') {
        Some(ddl.to_string())
    } else {
        Some(format!("{head} ON \"{schema}\".{tail}"))
    }
}

/// Cuts trigger DDL into its `CREATE TRIGGER` block and any trailing
/// `ALTER TRIGGER` statements.
///
/// An `ALTER TRIGGER` statement only starts at the beginning of a line that
/// follows the block's standalone `/` line, so text inside the trigger body
/// is never split. Without a `/` line any line starting with
/// `ALTER TRIGGER` is a boundary.
///
/// The block gets a `/` terminator line; each `ALTER TRIGGER` statement
/// becomes its own fragment ending in `;`.
///
/// # Examples
///
/// ```
/// use oradex_core::trigger::split_trigger_statements;
///
/// let ddl = "CREATE TRIGGER trg BEFORE INSERT ON \"HR\".T\nBEGIN\n  NULL;\nEND;\n/\nALTER TRIGGER \"HR\".\"TRG\" ENABLE;";
/// assert_eq!(split_trigger_statements(ddl), vec![
///     "CREATE TRIGGER trg BEFORE INSERT ON \"HR\".T\nBEGIN\n  NULL;\nEND;\n/".to_string(),
///     "ALTER TRIGGER \"HR\".\"TRG\" ENABLE;".to_string(),
/// ]);
/// ```
pub fn split_trigger_statements(ddl: &str) -> Vec<String> {
    let is_terminator = |line: &str| line.trim() == BLOCK_TERMINATOR;
    let has_terminator = ddl.lines().any(is_terminator);

    let mut block = String::new();
    let mut statements: Vec<String> = Vec::new();
    let mut past_block = !has_terminator;
    for line in ddl.lines() {
        if past_block && line.trim_start().starts_with(ALTER_TRIGGER) {
            statements.push(line.trim_start().to_string());
            continue;
        }
        if is_terminator(line) {
            past_block = true;
        }
        let current = statements.last_mut().unwrap_or(&mut block);
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    let mut fragments = vec![format!("{}\n{BLOCK_TERMINATOR}", trim_block_end(&block))];
    for statement in &statements {
        let statement = trim_block_end(statement);
        if statement.ends_with(STATEMENT_TERMINATOR) {
            fragments.push(statement.to_string());
        } else {
            fragments.push(format!("{statement}{STATEMENT_TERMINATOR}"));
        }
    }
    fragments
}

/// Applies every trigger fixup to the generated DDL of one trigger on
/// `schema.table`.
///
/// When no `ON` clause can be found a warning is logged and the text is
/// only split and terminated.
pub fn fixup_trigger(ddl: &str, schema: &str, table: &str) -> Vec<String> {
    let normalized = normalize_line_endings(ddl);
    let trimmed = trim_blank(&normalized);

    let qualified = match qualify_on_clause(trimmed, schema) {
        Some(text) => text,
        None => {
            warn!(schema, table, "no ON clause found in trigger DDL; left unqualified");
            trimmed.to_string()
        }
    };

    split_trigger_statements(&qualified)
}
