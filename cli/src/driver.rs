//! Single-object and schema-wide extraction over any [`Catalog`] source.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use oradex_config::ExtractConfig;
use oradex_core::{AssembleOptions, Catalog, MetadataSource, ObjectRef, assemble};
use tracing::{debug, info, warn};

use crate::report::{ExtractionReport, ObjectReport};

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

pub fn parse_csv_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Splits `schema.name` into its parts.
///
/// A part containing `"` has the quotes removed and keeps its case; any
/// other part is upper-cased. The schema is `None` for a bare name.
pub fn split_object_name(raw: &str) -> Result<(Option<String>, String), String> {
    fn normalize(part: &str) -> String {
        if part.contains('"') {
            part.replace('"', "")
        } else {
            part.to_uppercase()
        }
    }

    let parts: Vec<String> = raw.split('.').map(normalize).collect();
    let (schema, name) = match parts.as_slice() {
        [name] => (None, name.clone()),
        [schema, name] => (Some(schema.clone()).filter(|s| !s.is_empty()), name.clone()),
        _ => return Err(format!("Invalid object name '{raw}': expected [schema.]name")),
    };
    if name.is_empty() {
        return Err(format!("Invalid object name '{raw}': empty name"));
    }
    Ok((schema, name))
}

/// Resolves, assembles and returns the DDL for one object.
///
/// `default_schema` stands in when `object` carries no schema part.
pub fn extract_object<S>(
    source: &S,
    object: &str,
    default_schema: Option<&str>,
    options: &AssembleOptions,
) -> Result<(ObjectRef, String), String>
where
    S: MetadataSource + Catalog,
{
    let (schema, name) = split_object_name(object)?;
    let schema = schema
        .or_else(|| default_schema.map(str::to_uppercase))
        .ok_or_else(|| format!("No schema given for object '{name}' (use schema.name or -s)"))?;

    let object_type = source
        .object_type(&schema, &name)
        .map_err(|err| err.to_string())?;
    let object = ObjectRef::new(schema, name, object_type);
    debug!(%object, "extracting single object");

    let ddl = assemble(source, &object, options).map_err(|err| err.to_string())?;
    Ok((object, ddl))
}

/// Extracts every selected schema into `base_dir/<schema>/<type>/<name>.sql`.
///
/// Schema and object enumeration failures abort the run. Failures for a
/// single object are logged and recorded in the report, and the run goes on.
pub fn extract_schemas<S>(source: &S, config: &ExtractConfig) -> Result<ExtractionReport, String>
where
    S: MetadataSource + Catalog,
{
    let base_dir = config
        .extraction
        .base_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let options = config.assemble_options();

    let schemas: Vec<String> = source
        .schemas()
        .map_err(|err| err.to_string())?
        .into_iter()
        .filter(|schema| config.is_schema_selected(schema))
        .collect();
    info!(count = schemas.len(), base_dir = %base_dir.display(), "extracting schemas");

    let mut report = ExtractionReport::new();
    for schema in &schemas {
        let objects = source.objects(schema).map_err(|err| err.to_string())?;
        if objects.is_empty() {
            warn!(schema = %schema, "no objects returned");
            continue;
        }

        for object in &objects {
            let entry = match extract_to_file(source, object, &base_dir, &options) {
                Ok(path) => {
                    info!(%object, path = %path.display(), "wrote");
                    ObjectReport::written(object, path)
                }
                Err(err) => {
                    warn!(%object, error = %err, "extraction failed");
                    ObjectReport::failed(object, err)
                }
            };
            report.push(entry);
        }
    }
    Ok(report)
}

/// Output path for `object` below `base_dir`.
pub fn object_path(base_dir: &Path, object: &ObjectRef) -> PathBuf {
    base_dir
        .join(&object.schema)
        .join(object.object_type.dir_name())
        .join(format!("{}.sql", object.name))
}

fn extract_to_file<S: MetadataSource>(
    source: &S,
    object: &ObjectRef,
    base_dir: &Path,
    options: &AssembleOptions,
) -> Result<PathBuf, String> {
    let path = object_path(base_dir, object);
    if let Some(dir) = path.parent() {
        create_private_dir(dir)
            .map_err(|err| format!("Failed to create directory '{}': {err}", dir.display()))?;
    }

    let ddl = assemble(source, object, options).map_err(|err| err.to_string())?;
    write_private_file(&path, &format!("{ddl}\n\n"))
        .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
    Ok(path)
}

fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

fn write_private_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)?.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use oradex_core::{ExtractError, Facet, ObjectType, Result};

    use super::*;

    #[derive(Default)]
    struct FakeDb {
        schemas: Vec<String>,
        objects: HashMap<String, Vec<ObjectRef>>,
        ddl: HashMap<String, String>,
        listed: RefCell<Vec<String>>,
    }

    impl FakeDb {
        fn with_object(
            mut self,
            schema: &str,
            name: &str,
            object_type: ObjectType,
            ddl: &str,
        ) -> Self {
            if !self.schemas.iter().any(|s| s == schema) {
                self.schemas.push(schema.to_string());
            }
            self.objects
                .entry(schema.to_string())
                .or_default()
                .push(ObjectRef::new(schema, name, object_type));
            self.ddl.insert(format!("{schema}.{name}"), ddl.to_string());
            self
        }

        fn with_empty_schema(mut self, schema: &str) -> Self {
            self.schemas.push(schema.to_string());
            self
        }
    }

    impl MetadataSource for FakeDb {
        fn object_ddl(&self, _keyword: &str, name: &str, schema: &str) -> Result<Option<String>> {
            match self.ddl.get(&format!("{schema}.{name}")) {
                Some(ddl) if ddl == "FAIL" => {
                    Err(ExtractError::data_access("get_ddl", "ORA-31603"))
                }
                Some(ddl) => Ok(Some(ddl.clone())),
                None => Ok(None),
            }
        }

        fn trigger_ddl(&self, _schema: &str, _table: &str) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn facet_rows(&self, _facet: Facet, _schema: &str, _name: &str) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    impl Catalog for FakeDb {
        fn schemas(&self) -> Result<Vec<String>> {
            Ok(self.schemas.clone())
        }

        fn objects(&self, schema: &str) -> Result<Vec<ObjectRef>> {
            self.listed.borrow_mut().push(schema.to_string());
            Ok(self.objects.get(schema).cloned().unwrap_or_default())
        }

        fn object_type(&self, schema: &str, name: &str) -> Result<ObjectType> {
            self.objects
                .get(schema)
                .and_then(|objects| objects.iter().find(|o| o.name == name))
                .map(|o| o.object_type)
                .ok_or_else(|| ExtractError::ObjectNotFound {
                    schema: schema.to_string(),
                    name: name.to_string(),
                })
        }
    }

    fn config_for(base_dir: &Path, yaml: &str) -> ExtractConfig {
        let mut config: ExtractConfig = serde_yaml::from_str(yaml).unwrap();
        config.extraction.base_dir = Some(base_dir.to_path_buf());
        config
    }

    #[test]
    fn test_parse_csv_list_trims_and_drops_empty() {
        let parsed = parse_csv_list(Some(" HR, SALES, ,OE ".to_string()));
        assert_eq!(parsed, vec!["HR", "SALES", "OE"]);
        assert!(parse_csv_list(None).is_empty());
    }

    #[test]
    fn test_split_object_name() {
        assert_eq!(
            split_object_name("hr.employees").unwrap(),
            (Some("HR".to_string()), "EMPLOYEES".to_string())
        );
        assert_eq!(
            split_object_name("hr.\"MixedCase\"").unwrap(),
            (Some("HR".to_string()), "MixedCase".to_string())
        );
        assert_eq!(split_object_name("dept").unwrap(), (None, "DEPT".to_string()));
        assert!(split_object_name("a.b.c").is_err());
        assert!(split_object_name("hr.").is_err());
    }

    #[test]
    fn test_extract_object_falls_back_to_default_schema() {
        let db = FakeDb::default().with_object(
            "HR",
            "DEPT",
            ObjectType::Table,
            "CREATE TABLE \"HR\".\"DEPT\" (ID NUMBER)",
        );
        let (object, ddl) =
            extract_object(&db, "dept", Some("hr"), &AssembleOptions::default()).unwrap();
        assert_eq!(object, ObjectRef::new("HR", "DEPT", ObjectType::Table));
        assert_eq!(ddl, "CREATE TABLE \"HR\".\"DEPT\" (ID NUMBER)");
    }

    #[test]
    fn test_extract_object_errors_are_fatal() {
        let db = FakeDb::default();
        let options = AssembleOptions::default();
        assert!(extract_object(&db, "dept", None, &options).unwrap_err().contains("No schema"));
        assert!(extract_object(&db, "hr.dept", None, &options).is_err());
    }

    #[test]
    fn test_extract_schemas_writes_files() {
        let out = tempfile::tempdir().unwrap();
        let db = FakeDb::default()
            .with_object("HR", "EMPLOYEES", ObjectType::Table, "CREATE TABLE X (A NUMBER)")
            .with_object("HR", "EMP_SEQ", ObjectType::Sequence, "CREATE SEQUENCE S")
            .with_object(
                "SALES",
                "REGIONS_MV",
                ObjectType::MaterializedView,
                "CREATE MATERIALIZED VIEW M AS SELECT 1 FROM dual;",
            );
        let config = config_for(out.path(), "{}");

        let report = extract_schemas(&db, &config).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 3);

        let table = out.path().join("HR/TABLE/EMPLOYEES.sql");
        assert_eq!(fs::read_to_string(&table).unwrap(), "CREATE TABLE X (A NUMBER)\n\n");
        assert!(out.path().join("HR/SEQUENCE/EMP_SEQ.sql").exists());
        assert!(out.path().join("SALES/MATERIALIZED_VIEW/REGIONS_MV.sql").exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&table).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_extract_schemas_allow_list_wins() {
        let out = tempfile::tempdir().unwrap();
        let db = FakeDb::default()
            .with_object("HR", "T", ObjectType::Table, "CREATE TABLE T (A NUMBER)")
            .with_object("SALES", "T", ObjectType::Table, "CREATE TABLE T (A NUMBER)");
        let config = config_for(out.path(), "extract: { schemas: [HR], exclude: [HR] }");

        extract_schemas(&db, &config).unwrap();
        assert_eq!(*db.listed.borrow(), vec!["HR"]);
    }

    #[test]
    fn test_extract_schemas_exclude_list() {
        let out = tempfile::tempdir().unwrap();
        let db = FakeDb::default()
            .with_object("HR", "T", ObjectType::Table, "CREATE TABLE T (A NUMBER)")
            .with_object("SALES", "T", ObjectType::Table, "CREATE TABLE T (A NUMBER)");
        let config = config_for(out.path(), "extract: { exclude: [HR] }");

        extract_schemas(&db, &config).unwrap();
        assert_eq!(*db.listed.borrow(), vec!["SALES"]);
    }

    #[test]
    fn test_extract_schemas_continues_after_failure() {
        let out = tempfile::tempdir().unwrap();
        let db = FakeDb::default()
            .with_empty_schema("EMPTY")
            .with_object("HR", "BROKEN", ObjectType::View, "FAIL")
            .with_object("HR", "OK", ObjectType::Sequence, "CREATE SEQUENCE S");
        let config = config_for(out.path(), "{}");

        let report = extract_schemas(&db, &config).unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 1);
        let broken = &report.objects[0];
        assert!(!broken.success);
        assert!(broken.error.as_deref().unwrap().contains("ORA-31603"));
        assert!(broken.path.is_none());
        assert!(out.path().join("HR/SEQUENCE/OK.sql").exists());
        assert!(!out.path().join("EMPTY").exists());
    }

    #[test]
    fn test_object_path_uses_type_directory() {
        let object = ObjectRef::new("HR", "LINK", ObjectType::DatabaseLink);
        assert_eq!(
            object_path(Path::new("/out"), &object),
            PathBuf::from("/out/HR/DATABASE_LINK/LINK.sql")
        );
    }
}
