//! JSON run report written with `--report`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use oradex_core::{ObjectRef, ObjectType};
use serde::{Deserialize, Serialize};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Outcome for one extracted object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectReport {
    pub schema: String,
    pub name: String,
    pub object_type: ObjectType,
    /// Output file, absent for stdout output and failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ObjectReport {
    pub fn written(object: &ObjectRef, path: PathBuf) -> Self {
        Self::from_object(object, Some(path), None)
    }

    pub fn printed(object: &ObjectRef) -> Self {
        Self::from_object(object, None, None)
    }

    pub fn failed(object: &ObjectRef, error: String) -> Self {
        Self::from_object(object, None, Some(error))
    }

    fn from_object(object: &ObjectRef, path: Option<PathBuf>, error: Option<String>) -> Self {
        Self {
            schema: object.schema.clone(),
            name: object.name.clone(),
            object_type: object.object_type,
            path,
            success: error.is_none(),
            error,
        }
    }
}

/// Batch report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub tool_version: String,
    pub generated_at: String,
    pub objects: Vec<ObjectReport>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Default for ExtractionReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self {
            tool_version: PACKAGE_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            objects: Vec::new(),
            total: 0,
            succeeded: 0,
            failed: 0,
        }
    }

    pub fn push(&mut self, entry: ObjectReport) {
        self.total += 1;
        if entry.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.objects.push(entry);
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        std::fs::write(path, json)
            .map_err(|err| format!("Failed to write report '{}': {err}", path.display()))
    }
}
