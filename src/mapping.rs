//! Control-plane network mapping records and the store that serves them.
//!
//! The mapping store is an external collaborator: the reconciliation engine
//! only sees the [`MappingStore`] trait. The JSON-file-backed
//! implementation makes the CLI operable end-to-end.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One control-plane record linking a logical network to a backend object.
///
/// In a consistent system at most one logical network maps to a given
/// backend id; the engine tolerates and reports violations rather than
/// assuming uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMapping {
    /// Control-plane network identifier.
    pub logical_id: String,
    /// Backend object id the logical network was provisioned onto.
    pub backend_id: String,
    /// Owning virtual distributed adapter; absent for non-VLAN networks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter_id: Option<String>,
}

impl NetworkMapping {
    /// Normalize an empty adapter id to `None` so "empty" has one shape.
    fn normalized(mut self) -> Self {
        if self.adapter_id.as_deref() == Some("") {
            self.adapter_id = None;
        }
        self
    }
}

/// Read access to the control-plane mapping table.
pub trait MappingStore {
    /// All mapping records, in the store's own order.
    fn list_all(&self) -> Result<Vec<NetworkMapping>>;

    /// Every record whose backend id equals the given one.
    fn find_by_backend_id(&self, backend_id: &str) -> Result<Vec<NetworkMapping>>;
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    mappings: Vec<NetworkMapping>,
}

/// Mapping store backed by a JSON file.
#[derive(Debug, Default)]
pub struct JsonMappingStore {
    mappings: Vec<NetworkMapping>,
}

impl JsonMappingStore {
    /// Load the mapping file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let file: MappingFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid mapping file format in {}", path.display()))?;
        Ok(Self::from_mappings(file.mappings))
    }

    /// Build a store from in-memory records (used by tests)
    pub fn from_mappings(mappings: Vec<NetworkMapping>) -> Self {
        Self {
            mappings: mappings
                .into_iter()
                .map(NetworkMapping::normalized)
                .collect(),
        }
    }
}

impl MappingStore for JsonMappingStore {
    fn list_all(&self) -> Result<Vec<NetworkMapping>> {
        Ok(self.mappings.clone())
    }

    fn find_by_backend_id(&self, backend_id: &str) -> Result<Vec<NetworkMapping>> {
        Ok(self
            .mappings
            .iter()
            .filter(|m| m.backend_id == backend_id)
            .cloned()
            .collect())
    }
}
