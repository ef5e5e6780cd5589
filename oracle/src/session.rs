//! DBMS_METADATA session transform setup.

use oradex_core::TransformConfig;

fn sql_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

/// Renders the PL/SQL block that resets the session transforms and applies
/// `config`. Constraints, referential constraints, the SQL terminator and
/// pretty-printing are always enabled.
pub fn transform_block(config: &TransformConfig) -> String {
    let params = [
        ("CONSTRAINTS", "TRUE"),
        ("REF_CONSTRAINTS", "TRUE"),
        ("CONSTRAINTS_AS_ALTER", sql_bool(config.constraints_as_alter)),
        ("FORCE", sql_bool(config.force)),
        ("STORAGE", sql_bool(config.storage)),
        ("SEGMENT_ATTRIBUTES", sql_bool(config.segment_attributes())),
        ("SQLTERMINATOR", "TRUE"),
        ("PRETTY", "TRUE"),
    ];

    let mut block = String::from(
        "BEGIN\n    DBMS_METADATA.SET_TRANSFORM_PARAM ( DBMS_METADATA.SESSION_TRANSFORM, 'DEFAULT' );\n",
    );
    for (name, value) in params {
        block.push_str(&format!(
            "    DBMS_METADATA.SET_TRANSFORM_PARAM ( DBMS_METADATA.SESSION_TRANSFORM, '{name}', {value} );\n"
        ));
    }
    block.push_str("END;");
    block
}
