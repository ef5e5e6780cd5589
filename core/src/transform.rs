//! Session-scoped DDL generation settings.

use serde::{Deserialize, Serialize};

/// Toggles applied once to the DDL-generation session before any fetch.
///
/// The generation service keeps these per session, so a backend applies
/// them while constructing its connection handle and every later fetch on
/// that handle observes the same settings.
///
/// # Examples
///
/// ```
/// use oradex_core::TransformConfig;
///
/// let config = TransformConfig::default();
/// assert!(!config.constraints_as_alter);
/// assert!(!config.segment_attributes());
///
/// let config = TransformConfig { storage: true, ..Default::default() };
/// assert!(config.segment_attributes());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Emit constraints as separate `ALTER` statements instead of inline.
    pub constraints_as_alter: bool,
    /// Include the `FORCE` keyword in `CREATE` statements.
    pub force: bool,
    /// Include storage clauses.
    pub storage: bool,
}

impl TransformConfig {
    /// Segment attributes follow the storage toggle.
    pub fn segment_attributes(&self) -> bool {
        self.storage
    }
}
