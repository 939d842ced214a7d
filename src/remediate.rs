//! Remediation: deleting one orphaned backend network.
//!
//! The object kind is disambiguated purely from the backend id prefix:
//! `dvportgroup`-prefixed ids are VLAN port groups (whose deletion also
//! needs the owning adapter id, derived from the display name), anything
//! else is an overlay virtual wire. Deletion mutates backend state
//! irreversibly; if the backend is holding the object (attached VMs, for
//! example) the call fails and the backend's message is preserved.

use std::collections::HashMap;
use switchkit::{Error, SwitchBackend, ident};

/// Why a deletion did not happen.
///
/// None of these abort a batch: a caller driving many deletions reports
/// each failure and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum RemediationError {
    /// No current backend object carries this id; it may have been deleted
    /// by a concurrent actor since the inventory was collected. This is the
    /// designed recovery path for that race.
    #[error("no backend network with id {0}; it may already be deleted")]
    NotFound(String),

    /// A port group whose display name does not yield an adapter id. No
    /// backend call is made.
    #[error("cannot derive the adapter id from display name '{name}' of {backend_id}")]
    AdapterIdUnderivable {
        /// The port group id.
        backend_id: String,
        /// Its current display name.
        name: String,
    },

    /// The backend refused or failed the deletion.
    #[error("failed to delete backend network {backend_id}: {source}")]
    Backend {
        /// The object id whose deletion failed.
        backend_id: String,
        /// The backend error, detail preserved verbatim.
        #[source]
        source: Error,
    },
}

/// Delete one backend network by id.
///
/// `names` is the collector's backend-id → display-name index from the
/// current run; it resolves the display name needed to route the deletion.
pub fn delete_network(
    backend: &dyn SwitchBackend,
    names: &HashMap<String, String>,
    backend_id: &str,
) -> Result<(), RemediationError> {
    let Some(name) = names.get(backend_id) else {
        return Err(RemediationError::NotFound(backend_id.to_string()));
    };

    if ident::is_port_group_id(backend_id) {
        let Some(adapter_id) = ident::adapter_id_from_name(name) else {
            return Err(RemediationError::AdapterIdUnderivable {
                backend_id: backend_id.to_string(),
                name: name.clone(),
            });
        };
        backend
            .delete_port_group(adapter_id, backend_id)
            .map_err(|source| RemediationError::Backend {
                backend_id: backend_id.to_string(),
                source,
            })
    } else {
        backend
            .delete_virtual_wire(backend_id)
            .map_err(|source| RemediationError::Backend {
                backend_id: backend_id.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory;
    use switchkit::{MockSwitchBackend, MutationCall};

    fn backend() -> MockSwitchBackend {
        MockSwitchBackend::new()
            .with_object("VirtualWire", "virtualwire-3", "net-overlay")
            .with_object("DistributedVirtualPortgroup", "dvportgroup-8", "adapter-4-net-vlan")
            .with_object("DistributedVirtualPortgroup", "dvportgroup-9", "hand-made-portgroup")
    }

    #[test]
    fn deletes_virtual_wire_by_id() {
        let mock = backend();
        let names = inventory::name_index(&mock).unwrap();
        delete_network(&mock, &names, "virtualwire-3").unwrap();
        assert_eq!(
            mock.mutations(),
            vec![MutationCall::DeleteVirtualWire {
                backend_id: "virtualwire-3".to_string()
            }]
        );
    }

    #[test]
    fn deletes_port_group_with_derived_adapter_id() {
        let mock = backend();
        let names = inventory::name_index(&mock).unwrap();
        delete_network(&mock, &names, "dvportgroup-8").unwrap();
        assert_eq!(
            mock.mutations(),
            vec![MutationCall::DeletePortGroup {
                adapter_id: "adapter-4".to_string(),
                backend_id: "dvportgroup-8".to_string()
            }]
        );
    }

    #[test]
    fn underivable_adapter_id_fails_without_backend_call() {
        let mock = backend();
        let names = inventory::name_index(&mock).unwrap();
        let err = delete_network(&mock, &names, "dvportgroup-9").unwrap_err();
        assert!(matches!(err, RemediationError::AdapterIdUnderivable { .. }));
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn unknown_backend_id_reports_not_found() {
        let mock = backend();
        let names = inventory::name_index(&mock).unwrap();
        let err = delete_network(&mock, &names, "virtualwire-404").unwrap_err();
        assert!(matches!(err, RemediationError::NotFound(_)));
        assert!(mock.mutations().is_empty());
    }

    #[test]
    fn backend_refusal_preserves_detail() {
        let mock = backend().failing_mutations("The object is in use by vm-12");
        let names = inventory::name_index(&mock).unwrap();
        let err = delete_network(&mock, &names, "virtualwire-3").unwrap_err();
        let chain = format!("{err}: {}", std::error::Error::source(&err).unwrap());
        assert!(chain.contains("The object is in use by vm-12"));
    }
}
