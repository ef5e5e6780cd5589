//! SQL catalogue against the Oracle data dictionary.
//!
//! Every facet query takes the owning schema as `:1` and the object name as
//! `:2`, and returns one complete SQL statement per row.

use oradex_core::{Facet, ObjectType};

/// Schemas maintained by Oracle itself; never extracted.
pub const VENDOR_SCHEMAS: &[&str] = &[
    "APPQOSSYS",
    "AUDSYS",
    "CTXSYS",
    "DBSFWUSER",
    "DBSNMP",
    "DMSYS",
    "EXFSYS",
    "GSMADMIN_INTERNAL",
    "MDSYS",
    "OJVMSYS",
    "OLAPSYS",
    "ORACLE_OCM",
    "ORDSYS",
    "OUTLN",
    "PERFSTAT",
    "REMOTE_SCHEDULER_AGENT",
    "SQLTXPLAIN",
    "SYS",
    "SYSMAN",
    "SYSTEM",
    "TSMSYS",
    "WMSYS",
    "XDB",
];

pub const OBJECT_DDL: &str = "SELECT dbms_metadata.get_ddl ( :1, :2, :3 ) FROM dual";

pub const TRIGGER_DDL: &str = r#"
SELECT dbms_metadata.get_ddl ( 'TRIGGER', trigger_name, owner )
    FROM sys.all_triggers
    WHERE table_owner = :1
        AND table_name = :2
    ORDER BY owner,
        trigger_name
"#;

/// Type lookup for a single object. The ORDER BY disambiguates between a
/// materialized view and its container table.
pub const OBJECT_TYPE: &str = r#"
WITH x AS (
    SELECT object_type
        FROM dba_objects
        WHERE owner = :1
            AND object_name = :2
        ORDER BY CASE
            WHEN object_type = 'MATERIALIZED VIEW' THEN 1
            WHEN object_type = 'PACKAGE' THEN 1
            WHEN object_type = 'TYPE' THEN 1
            WHEN object_type = 'SYNONYM' THEN 1000
            ELSE 10
            END
)
SELECT object_type
    FROM x
    WHERE rownum = 1
"#;

const COLUMN_COMMENTS: &str = r#"
SELECT 'COMMENT ON COLUMN "'
            || u.owner
            || '"."'
            || u.table_name
            || '"."'
            || u.column_name
            || '" IS '''
            || regexp_replace ( u.comments, '''', '''''' )
            || ''';' AS obj_comment
    FROM dba_col_comments u
    JOIN dba_tab_columns c
        ON ( c.owner = u.owner
            AND c.table_name = u.table_name
            AND c.column_name = u.column_name )
    WHERE u.owner = :1
        AND u.table_name = :2
        AND u.comments IS NOT NULL
    ORDER BY c.owner,
        c.table_name,
        c.column_id
"#;

const TABLE_COMMENTS: &str = r#"
SELECT 'COMMENT ON TABLE "'
            || u.owner
            || '"."'
            || u.table_name
            || '" IS '''
            || regexp_replace ( u.comments, '''', '''''' )
            || ''';' AS obj_comment
    FROM dba_tab_comments u
    WHERE u.owner = :1
        AND u.table_name = :2
        AND u.comments IS NOT NULL
    ORDER BY u.owner,
        u.table_name
"#;

const MVIEW_COMMENTS: &str = r#"
SELECT 'COMMENT ON MATERIALIZED VIEW "'
            || u.owner
            || '"."'
            || u.mview_name
            || '" IS '''
            || regexp_replace ( u.comments, '''', '''''' )
            || ''';' AS obj_comment
    FROM dba_mview_comments u
    WHERE u.owner = :1
        AND u.mview_name = :2
        AND u.comments IS NOT NULL
    ORDER BY u.owner,
        u.mview_name
"#;

const GRANTED_PRIVILEGES: &str = r#"
WITH privs AS (
    SELECT p.privilege,
            p.owner AS schema,
            p.table_name AS object_name,
            p.grantee,
            p.grantable
        FROM dba_tab_privs p
        JOIN dba_objects o
            ON ( o.owner = p.owner
                AND o.object_name = p.table_name )
        WHERE p.owner = :1
            AND p.table_name = :2
            AND ( ( o.object_type IN ( 'VIEW', 'MATERIALIZED VIEW' )
                    AND p.privilege IN ( 'SELECT', 'REFERENCES' ) )
                OR o.object_type NOT IN ( 'VIEW', 'MATERIALIZED VIEW' ) )
),
d AS (
    SELECT privilege,
            schema,
            object_name,
            grantee,
            max ( grantable ) AS grantable
        FROM privs
        GROUP BY privilege,
            schema,
            object_name,
            grantee
),
grants AS (
    SELECT listagg ( privilege, ', ' ) WITHIN GROUP ( ORDER BY privilege ) AS privs,
            schema,
            object_name,
            grantee,
            grantable
        FROM d
        GROUP BY schema,
            object_name,
            grantee,
            grantable
)
SELECT 'GRANT ' || privs || ' ON "' || schema || '"."' || object_name || '" TO "' || grantee || '"'
            || CASE
                WHEN grantable = 'YES' THEN ' WITH GRANT OPTION ;'
                ELSE ' ;'
                END AS stmt
    FROM grants
    ORDER BY 1
"#;

/// Privileges inferred from `dba_dependencies`. Views need SELECT/EXECUTE,
/// tables need REFERENCES, everything else needs what is granted. Oracle
/// does not record dependencies finely enough to be exact, so this may
/// report privileges the object does not actually use.
const NEEDED_PRIVILEGES: &str = r#"
WITH objs AS (
    SELECT owner,
            object_name,
            object_type,
            row_number () OVER (
                PARTITION BY owner, object_name
                ORDER BY CASE
                        WHEN object_type = 'MATERIALIZED VIEW' THEN 1
                        WHEN object_type = 'PACKAGE' THEN 1
                        WHEN object_type = 'TYPE' THEN 1
                        ELSE 10
                        END ) AS rn
        FROM dba_objects
        WHERE object_type <> 'SYNONYM'
),
privs AS (
    SELECT tp.privilege,
            d.referenced_owner AS schema,
            d.referenced_name AS object_name,
            tp.grantee,
            CASE
                WHEN tp.grantable = 'YES' AND o.object_type = 'VIEW' THEN 'YES'
                ELSE 'NO'
                END AS grantable
        FROM dba_tab_privs tp
        JOIN dba_dependencies d
            ON ( d.owner = tp.grantee
                AND d.referenced_owner = tp.owner
                AND d.referenced_name = tp.table_name )
        JOIN objs o
            ON ( o.owner = d.owner
                AND o.object_name = d.name
                AND o.rn = 1 )
        WHERE d.owner <> d.referenced_owner
            AND d.owner = :1
            AND d.name = :2
            AND ( ( o.object_type IN ( 'VIEW', 'MATERIALIZED VIEW' )
                    AND tp.privilege IN ( 'SELECT', 'EXECUTE' ) )
                OR ( o.object_type = 'TABLE'
                    AND tp.privilege = 'REFERENCES' )
                OR ( o.object_type NOT IN ( 'TABLE', 'VIEW', 'MATERIALIZED VIEW' )
                    AND tp.privilege <> 'REFERENCES' ) )
),
d AS (
    SELECT privilege,
            schema,
            object_name,
            grantee,
            max ( grantable ) AS grantable
        FROM privs
        GROUP BY privilege,
            schema,
            object_name,
            grantee
),
grants AS (
    SELECT listagg ( privilege, ', ' ) WITHIN GROUP ( ORDER BY privilege ) AS privs,
            schema,
            object_name,
            grantee,
            grantable
        FROM d
        GROUP BY schema,
            object_name,
            grantee,
            grantable
)
SELECT 'GRANT ' || privs || ' ON "' || schema || '"."' || object_name || '" TO "' || grantee || '"'
            || CASE
                WHEN grantable = 'YES' THEN ' WITH GRANT OPTION ;'
                ELSE ' ;'
                END AS stmt
    FROM grants
    ORDER BY 1
"#;

/// Indexes that do not back a constraint. System LOB indexes (`SYS_IL...`)
/// are created and named by Oracle and left out.
const INDEXES: &str = r#"
SELECT dbms_metadata.get_ddl ( 'INDEX', i.index_name, i.owner )
    FROM dba_indexes i
    LEFT JOIN dba_constraints c
        ON ( c.index_owner = i.table_owner
            AND c.index_name = i.index_name )
    WHERE i.table_owner = :1
        AND i.table_name = :2
        AND c.index_name IS NULL
        AND substr ( i.index_name, 1, 6 ) <> 'SYS_IL'
    ORDER BY i.owner,
        i.index_name
"#;

const SYNONYMS: &str = r#"
SELECT 'CREATE '
            || CASE
                WHEN owner = 'PUBLIC' THEN 'PUBLIC '
                END
            || 'SYNONYM '
            || CASE
                WHEN owner = 'PUBLIC' THEN '"' || synonym_name || '"'
                ELSE '"' || owner || '"."' || synonym_name || '"'
                END
            || ' ON "' || table_owner || '"."' || table_name || '" ;'
    FROM dba_synonyms
    WHERE table_owner = :1
        AND table_name = :2
    ORDER BY 1
"#;

/// Returns the query behind `facet`.
pub fn facet_query(facet: Facet) -> &'static str {
    match facet {
        Facet::ColumnComments => COLUMN_COMMENTS,
        Facet::TableComments => TABLE_COMMENTS,
        Facet::MaterializedViewComments => MVIEW_COMMENTS,
        Facet::GrantedPrivileges => GRANTED_PRIVILEGES,
        Facet::NeededPrivileges => NEEDED_PRIVILEGES,
        Facet::Indexes => INDEXES,
        Facet::Synonyms => SYNONYMS,
    }
}

fn quoted_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Catalogue types enumerated during schema-wide extraction. Synonyms are
/// reached through the objects they point at.
fn enumerated_types() -> String {
    quoted_list(
        ObjectType::ALL
            .into_iter()
            .filter(|ty| *ty != ObjectType::Synonym)
            .map(ObjectType::catalog_name),
    )
}

/// Distinct owners of extractable objects, vendor schemas excluded.
pub fn schemas_query() -> String {
    format!(
        r#"
SELECT DISTINCT owner
    FROM dba_objects
    WHERE owner NOT IN ( {vendor} )
        AND object_type IN ( {types} )
    ORDER BY owner
"#,
        vendor = quoted_list(VENDOR_SCHEMAS.iter().copied()),
        types = enumerated_types(),
    )
}

/// Objects of one schema (`:1`), one row per name. When names collide the
/// materialized view, package or type wins, then table, view and sequence.
pub fn objects_query() -> String {
    format!(
        r#"
WITH objs AS (
    SELECT owner,
            object_name,
            object_type,
            row_number () OVER (
                PARTITION BY owner, object_name
                ORDER BY CASE
                        WHEN object_type = 'MATERIALIZED VIEW' THEN 1
                        WHEN object_type = 'PACKAGE' THEN 1
                        WHEN object_type = 'TYPE' THEN 1
                        WHEN object_type = 'TABLE' THEN 2
                        WHEN object_type = 'VIEW' THEN 3
                        WHEN object_type = 'SEQUENCE' THEN 4
                        ELSE 10
                        END ) AS rn
        FROM dba_objects
        WHERE object_type IN ( {types} )
            AND object_name NOT LIKE 'SYS_PLSQL%'
            AND object_name <> 'CREATE$JAVA$LOB$TABLE'
)
SELECT owner,
        object_name,
        object_type
    FROM objs
    WHERE owner = :1
        AND rn = 1
    ORDER BY object_type,
        object_name
"#,
        types = enumerated_types(),
    )
}
