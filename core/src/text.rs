//! Text normalization for generated DDL.
//!
//! The generation service pretty-prints its output; these helpers remove
//! the noise it leaves behind (CRLF line endings, surrounding blank lines,
//! blank lines before block terminators) and cut documents into fragments.

use regex::Regex;
use std::sync::LazyLock;

/// Separator placed between two fragments of an assembled document.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Line holding only the statement terminator.
pub const STATEMENT_TERMINATOR: &str = ";";

/// Line holding only the PL/SQL block terminator.
pub const BLOCK_TERMINATOR: &str = "/";

const COMMENT_MARKER: &str = "--";

fn is_blank(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\t' | ' ')
}

/// Converts CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strips leading and trailing blanks (space, tab, CR, LF).
pub fn trim_blank(raw: &str) -> &str {
    raw.trim_matches(is_blank)
}

/// Strips trailing blanks (space, tab, CR, LF).
pub fn trim_trailing(raw: &str) -> &str {
    raw.trim_end_matches(is_blank)
}

/// Strips trailing blanks and block terminators.
pub fn trim_block_end(raw: &str) -> &str {
    raw.trim_end_matches(|ch: char| is_blank(ch) || ch == '/')
}

/// Appends a bare `;` line when the last line of a view definition is a
/// comment.
///
/// The generation service omits the terminator in that case, which leaves
/// the view definition unterminated. Already terminated text is returned
/// unchanged, so the fixup is idempotent.
///
/// # Examples
///
/// ```
/// use oradex_core::text::terminate_view;
///
/// let ddl = "CREATE VIEW v AS\nSELECT 1 FROM dual\n-- trailing note";
/// let fixed = terminate_view(ddl);
/// assert_eq!(fixed, format!("{ddl}\n;"));
/// assert_eq!(terminate_view(&fixed), fixed);
/// ```
pub fn terminate_view(ddl: &str) -> String {
    let last_line = ddl.lines().last().unwrap_or_default();
    if last_line.contains(COMMENT_MARKER) {
        format!("{ddl}\n{STATEMENT_TERMINATOR}")
    } else {
        ddl.to_string()
    }
}

/// Collapses the whitespace run in front of each standalone `/` line into a
/// single newline.
///
/// # Examples
///
/// ```
/// use oradex_core::text::collapse_block_terminators;
///
/// let ddl = "BEGIN\n  NULL;\nEND;\n\n  \n/\nGRANT x;";
/// assert_eq!(collapse_block_terminators(ddl), "BEGIN\n  NULL;\nEND;\n/\nGRANT x;");
/// ```
pub fn collapse_block_terminators(ddl: &str) -> String {
    // SAFETY: compile-time constant pattern, exercised by the tests below.
    static BLOCK_END_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)[\n\r\t ]*\n[\r\t ]*/[\t ]*$").expect("static regex must compile")
    });

    BLOCK_END_RE
        .replace_all(ddl, format!("\n{BLOCK_TERMINATOR}").as_str())
        .into_owned()
}

/// Splits a generated document into its leading `CREATE` statement and the
/// `ALTER` statements that follow it.
///
/// A boundary is an `ALTER ` keyword at the start of a line (indentation
/// allowed), together with the whitespace in front of it. The returned
/// `ALTER` statements keep their keyword, are trimmed of trailing blanks and
/// are sorted lexicographically, independent of generation order.
///
/// # Examples
///
/// ```
/// use oradex_core::text::split_alter_statements;
///
/// let ddl = "CREATE TABLE t (a NUMBER);\n  ALTER TABLE t ADD CONSTRAINT z CHECK (a > 0);\n  ALTER TABLE t ADD CONSTRAINT a UNIQUE (a);";
/// let (create, alters) = split_alter_statements(ddl);
/// assert_eq!(create, "CREATE TABLE t (a NUMBER);");
/// assert_eq!(alters, vec![
///     "ALTER TABLE t ADD CONSTRAINT a UNIQUE (a);".to_string(),
///     "ALTER TABLE t ADD CONSTRAINT z CHECK (a > 0);".to_string(),
/// ]);
/// ```
pub fn split_alter_statements(ddl: &str) -> (String, Vec<String>) {
    // SAFETY: compile-time constant pattern, exercised by the tests below.
    static ALTER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[\n\r\t ]*\n[\t ]*ALTER ").expect("static regex must compile")
    });

    let mut segments = ALTER_RE.split(ddl);
    let create = trim_trailing(segments.next().unwrap_or_default()).to_string();
    let mut alters: Vec<String> = segments
        .map(trim_trailing)
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("ALTER {segment}"))
        .collect();
    alters.sort();
    (create, alters)
}

/// Joins fragments with [`FRAGMENT_SEPARATOR`], trimming trailing blanks
/// from each and dropping the empty ones.
///
/// # Examples
///
/// ```
/// use oradex_core::text::join_fragments;
///
/// let doc = join_fragments(["CREATE x;  \n", "", "   ", "COMMENT y;"]);
/// assert_eq!(doc, "CREATE x;\n\nCOMMENT y;");
/// ```
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = fragments
        .into_iter()
        .filter_map(|fragment| {
            let trimmed = trim_trailing(fragment.as_ref());
            if trim_blank(trimmed).is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect();
    kept.join(FRAGMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_trim_helpers() {
        assert_eq!(trim_blank("\r\n\t CREATE x; \t\r\n"), "CREATE x;");
        assert_eq!(trim_trailing("  x  \n"), "  x");
        assert_eq!(trim_block_end("END;\n/\n  "), "END;");
    }

    #[test]
    fn test_terminate_view_without_comment_is_unchanged() {
        let ddl = "CREATE VIEW v AS SELECT 1 x FROM dual;";
        assert_eq!(terminate_view(ddl), ddl);
    }

    #[test]
    fn test_terminate_view_comment_in_last_line() {
        let ddl = "CREATE VIEW v AS\nSELECT 1 x FROM dual -- why";
        let fixed = terminate_view(ddl);
        assert!(fixed.ends_with("-- why\n;"));
        assert_eq!(terminate_view(&fixed), fixed);
    }

    #[test]
    fn test_terminate_view_comment_earlier_is_ignored() {
        let ddl = "CREATE VIEW v AS\n-- header\nSELECT 1 x FROM dual;";
        assert_eq!(terminate_view(ddl), ddl);
    }

    #[test]
    fn test_collapse_block_terminators_multiple_blocks() {
        let ddl = "CREATE PACKAGE p AS\nEND p;\n\n\n/\nCREATE PACKAGE BODY p AS\nEND p;\n   \n/";
        assert_eq!(
            collapse_block_terminators(ddl),
            "CREATE PACKAGE p AS\nEND p;\n/\nCREATE PACKAGE BODY p AS\nEND p;\n/"
        );
    }

    #[test]
    fn test_collapse_block_terminators_leaves_division_alone() {
        let ddl = "CREATE VIEW v AS SELECT a\n  / b AS ratio FROM t;";
        assert_eq!(collapse_block_terminators(ddl), ddl);
    }

    #[test]
    fn test_split_alter_statements_without_alter() {
        let ddl = "CREATE TABLE t (a NUMBER);";
        let (create, alters) = split_alter_statements(ddl);
        assert_eq!(create, ddl);
        assert!(alters.is_empty());
    }

    #[test]
    fn test_split_alter_ignores_alter_inside_a_line() {
        let ddl = "CREATE TABLE t (salter NUMBER, \"ALTER \" NUMBER);";
        let (create, alters) = split_alter_statements(ddl);
        assert_eq!(create, ddl);
        assert!(alters.is_empty());
    }

    #[test]
    fn test_split_alter_sorts_fragments() {
        let ddl = "CREATE TABLE t (a NUMBER);\n\n  ALTER TABLE t ADD CONSTRAINT Z CHECK (a > 0) ENABLE;\n  ALTER TABLE t ADD CONSTRAINT A PRIMARY KEY (a) ENABLE;\n";
        let (_, alters) = split_alter_statements(ddl);
        assert_eq!(
            alters,
            vec![
                "ALTER TABLE t ADD CONSTRAINT A PRIMARY KEY (a) ENABLE;",
                "ALTER TABLE t ADD CONSTRAINT Z CHECK (a > 0) ENABLE;",
            ]
        );
    }

    #[test]
    fn test_join_fragments_empty_input() {
        assert_eq!(join_fragments(Vec::<String>::new()), "");
        assert_eq!(join_fragments(["", "\n\n"]), "");
    }
}
