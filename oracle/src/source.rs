//! [`MetadataSource`] and [`Catalog`] over a live Oracle connection.

use oracle::Connection;
use oracle::sql_type::ToSql;
use oradex_core::{
    Catalog, ExtractError, Facet, MetadataSource, ObjectRef, ObjectType, Result, TransformConfig,
};
use tracing::{debug, info, warn};

use crate::queries;
use crate::session::transform_block;

/// A connection-scoped handle with the DDL transforms already applied.
///
/// The handle owns its connection; dropping it closes the session. All
/// calls are blocking and run one at a time.
pub struct OracleSource {
    conn: Connection,
}

impl OracleSource {
    /// Opens a session and applies `transform` to it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DataAccess`] when the connection cannot be
    /// established or the transforms cannot be set.
    pub fn connect(
        username: &str,
        password: &str,
        connect_string: &str,
        transform: &TransformConfig,
    ) -> Result<Self> {
        info!(username, connect_string, "connecting");
        let conn = Connection::connect(username, password, connect_string)
            .map_err(|err| ExtractError::data_access("connect", err))?;
        Self::with_transform(conn, transform)
    }

    /// Wraps an open connection, applying `transform` to its session.
    pub fn with_transform(conn: Connection, transform: &TransformConfig) -> Result<Self> {
        debug!(?transform, "setting DBMS_METADATA session transforms");
        conn.execute(&transform_block(transform), &[])
            .map_err(|err| ExtractError::data_access("DBMS_METADATA transforms", err))?;
        Ok(Self { conn })
    }

    fn text_rows(&self, context: &str, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<String>> {
        let rows = self
            .conn
            .query_as::<Option<String>>(sql, params)
            .map_err(|err| ExtractError::data_access(context, err))?;

        let mut texts = Vec::new();
        for row in rows {
            if let Some(text) = row.map_err(|err| ExtractError::data_access(context, err))? {
                texts.push(text);
            }
        }
        Ok(texts)
    }
}

impl MetadataSource for OracleSource {
    fn object_ddl(&self, ddl_keyword: &str, name: &str, schema: &str) -> Result<Option<String>> {
        let context = format!("get_ddl {ddl_keyword} \"{schema}\".\"{name}\"");
        let rows = self.text_rows(&context, queries::OBJECT_DDL, &[&ddl_keyword, &name, &schema])?;
        Ok(rows.into_iter().next())
    }

    fn trigger_ddl(&self, schema: &str, table: &str) -> Result<Vec<String>> {
        let context = format!("triggers on \"{schema}\".\"{table}\"");
        self.text_rows(&context, queries::TRIGGER_DDL, &[&schema, &table])
    }

    fn facet_rows(&self, facet: Facet, schema: &str, name: &str) -> Result<Vec<String>> {
        let context = format!("{facet} of \"{schema}\".\"{name}\"");
        self.text_rows(&context, queries::facet_query(facet), &[&schema, &name])
    }
}

impl Catalog for OracleSource {
    fn schemas(&self) -> Result<Vec<String>> {
        self.text_rows("schema list", &queries::schemas_query(), &[])
    }

    fn objects(&self, schema: &str) -> Result<Vec<ObjectRef>> {
        let context = format!("object list of \"{schema}\"");
        let rows = self
            .conn
            .query_as::<(String, String, String)>(&queries::objects_query(), &[&schema])
            .map_err(|err| ExtractError::data_access(&context, err))?;

        let mut objects = Vec::new();
        for row in rows {
            let (owner, name, type_name) =
                row.map_err(|err| ExtractError::data_access(&context, err))?;
            match type_name.parse::<ObjectType>() {
                Ok(object_type) => objects.push(ObjectRef::new(owner, name, object_type)),
                Err(err) => warn!(schema = %owner, name = %name, error = %err, "skipping object"),
            }
        }
        Ok(objects)
    }

    fn object_type(&self, schema: &str, name: &str) -> Result<ObjectType> {
        let context = format!("object type of \"{schema}\".\"{name}\"");
        let rows = self.text_rows(&context, queries::OBJECT_TYPE, &[&schema, &name])?;
        match rows.first() {
            Some(type_name) => type_name.parse(),
            None => Err(ExtractError::ObjectNotFound {
                schema: schema.to_string(),
                name: name.to_string(),
            }),
        }
    }
}
