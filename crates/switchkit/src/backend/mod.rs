//! Backend trait and implementations.
//!
//! This module provides the [`SwitchBackend`] trait plus the HTTP
//! implementation in [`http`]. The backend is an explicitly constructed
//! capability: whoever needs it receives a `&dyn SwitchBackend`, there is
//! no process-wide client.
//!
//! # Testing
//!
//! Use [`MockSwitchBackend`] for tests without a live backend. The mock
//! records every mutation so tests can assert that an operation performed
//! no backend call:
//!
//! ```
//! use switchkit::backend::{MockSwitchBackend, SwitchBackend};
//!
//! let mock = MockSwitchBackend::new().with_object("VirtualWire", "virtualwire-3", "net-a");
//! mock.delete_virtual_wire("virtualwire-3").unwrap();
//! assert_eq!(mock.mutations().len(), 1);
//! ```

pub mod http;

use crate::error::{Error, Result};
use crate::types::{AdapterRecord, ScopingObject, ScopingTree};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Operations the virtual-switch backend exposes to this tool.
///
/// All calls are synchronous. Mutations may fail with [`Error::Api`]
/// carrying the backend's own detail string.
pub trait SwitchBackend: Send + Sync {
    /// Query the generic scoping-objects listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the backend is unreachable and
    /// [`Error::InvalidResponse`] when the body cannot be parsed; callers
    /// that are read-only may choose to degrade the latter to an empty
    /// inventory.
    fn scoping_objects(&self) -> Result<ScopingTree>;

    /// Fetch one distributed virtual adapter record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the adapter does not exist.
    fn adapter(&self, adapter_id: &str) -> Result<AdapterRecord>;

    /// Update an adapter record previously fetched with [`Self::adapter`].
    ///
    /// Returns the record as the backend sees it after the update.
    fn update_adapter(&self, record: &AdapterRecord) -> Result<AdapterRecord>;

    /// Delete a VLAN port group owned by the given adapter.
    fn delete_port_group(&self, adapter_id: &str, backend_id: &str) -> Result<()>;

    /// Delete an overlay virtual wire.
    fn delete_virtual_wire(&self, backend_id: &str) -> Result<()>;
}

/// One recorded backend mutation, for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationCall {
    /// An adapter record update.
    UpdateAdapter {
        /// Adapter id.
        adapter_id: String,
        /// Teaming policy carried by the update.
        teaming_policy: String,
    },
    /// A VLAN port group deletion.
    DeletePortGroup {
        /// Owning adapter id.
        adapter_id: String,
        /// Port group backend id.
        backend_id: String,
    },
    /// A virtual wire deletion.
    DeleteVirtualWire {
        /// Virtual wire backend id.
        backend_id: String,
    },
}

/// In-memory backend for tests.
///
/// Holds a scoping-object listing and adapter records, records every
/// mutation, and can be configured to fail mutations with a given backend
/// detail string or to return an unparseable inventory.
#[derive(Debug, Clone, Default)]
pub struct MockSwitchBackend {
    objects: Vec<ScopingObject>,
    adapters: Arc<Mutex<HashMap<String, AdapterRecord>>>,
    mutation_fault: Option<String>,
    invalid_inventory: bool,
    mutations: Arc<Mutex<Vec<MutationCall>>>,
}

impl MockSwitchBackend {
    /// Create an empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one scoping object to the inventory.
    #[must_use]
    pub fn with_object(
        mut self,
        type_tag: impl Into<String>,
        object_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.objects
            .push(ScopingObject::new(type_tag, object_id, name));
        self
    }

    /// Add an adapter record.
    #[must_use]
    pub fn with_adapter(self, record: AdapterRecord) -> Self {
        self.adapters
            .lock()
            .expect("adapter map lock")
            .insert(record.id.clone(), record);
        self
    }

    /// Make every mutation fail with the given backend detail string.
    #[must_use]
    pub fn failing_mutations(mut self, detail: impl Into<String>) -> Self {
        self.mutation_fault = Some(detail.into());
        self
    }

    /// Make the scoping-objects query return an unparseable response.
    #[must_use]
    pub fn with_invalid_inventory(mut self) -> Self {
        self.invalid_inventory = true;
        self
    }

    /// Every mutation recorded so far, in call order.
    #[must_use]
    pub fn mutations(&self) -> Vec<MutationCall> {
        self.mutations.lock().expect("mutation log lock").clone()
    }

    fn record(&self, call: MutationCall) -> Result<()> {
        if let Some(detail) = &self.mutation_fault {
            return Err(Error::Api {
                detail: detail.clone(),
            });
        }
        self.mutations.lock().expect("mutation log lock").push(call);
        Ok(())
    }
}

impl SwitchBackend for MockSwitchBackend {
    fn scoping_objects(&self) -> Result<ScopingTree> {
        if self.invalid_inventory {
            return Err(Error::InvalidResponse("mock: not a scoping tree".into()));
        }
        Ok(ScopingTree {
            objects: self.objects.clone(),
        })
    }

    fn adapter(&self, adapter_id: &str) -> Result<AdapterRecord> {
        self.adapters
            .lock()
            .expect("adapter map lock")
            .get(adapter_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("adapter {adapter_id}")))
    }

    fn update_adapter(&self, record: &AdapterRecord) -> Result<AdapterRecord> {
        self.record(MutationCall::UpdateAdapter {
            adapter_id: record.id.clone(),
            teaming_policy: record.teaming_policy.clone(),
        })?;
        self.adapters
            .lock()
            .expect("adapter map lock")
            .insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    fn delete_port_group(&self, adapter_id: &str, backend_id: &str) -> Result<()> {
        self.record(MutationCall::DeletePortGroup {
            adapter_id: adapter_id.to_string(),
            backend_id: backend_id.to_string(),
        })
    }

    fn delete_virtual_wire(&self, backend_id: &str) -> Result<()> {
        self.record(MutationCall::DeleteVirtualWire {
            backend_id: backend_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_inventory_and_filtering_tags() {
        let mock = MockSwitchBackend::new()
            .with_object("VirtualWire", "virtualwire-1", "net-a")
            .with_object("HostSystem", "host-1", "esx-1");
        let tree = mock.scoping_objects().unwrap();
        assert_eq!(tree.objects.len(), 2);
    }

    #[test]
    fn test_mock_adapter_not_found() {
        let mock = MockSwitchBackend::new();
        let err = mock.adapter("adapter-9").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_mock_records_mutations_in_order() {
        let mock = MockSwitchBackend::new();
        mock.delete_virtual_wire("virtualwire-1").unwrap();
        mock.delete_port_group("adapter-2", "dvportgroup-3").unwrap();
        assert_eq!(
            mock.mutations(),
            vec![
                MutationCall::DeleteVirtualWire {
                    backend_id: "virtualwire-1".to_string()
                },
                MutationCall::DeletePortGroup {
                    adapter_id: "adapter-2".to_string(),
                    backend_id: "dvportgroup-3".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_mock_mutation_fault_keeps_detail_and_records_nothing() {
        let mock = MockSwitchBackend::new().failing_mutations("object in use by vm-3");
        let err = mock.delete_virtual_wire("virtualwire-1").unwrap_err();
        assert!(err.to_string().contains("object in use by vm-3"));
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn test_mock_update_adapter_applies() {
        let record: AdapterRecord = serde_json::from_str(
            r#"{"id": "adapter-1", "name": "a", "teamingPolicy": "FAILOVER_ORDER"}"#,
        )
        .unwrap();
        let mock = MockSwitchBackend::new().with_adapter(record.clone());

        let mut updated = record;
        updated.teaming_policy = "LACP_ACTIVE".to_string();
        mock.update_adapter(&updated).unwrap();

        assert_eq!(mock.adapter("adapter-1").unwrap().teaming_policy, "LACP_ACTIVE");
    }
}
