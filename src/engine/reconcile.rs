//! The two reconciliation scans.
//!
//! Both scans are read-only over an unsynchronized snapshot of the two
//! stores: results can be stale relative to concurrent provisioning, and
//! that is accepted. Absence of a match is the signal being reported, never
//! an error; store and collector failures propagate and abort the run so a
//! partial result is never emitted as if complete.

use crate::mapping::{MappingStore, NetworkMapping};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use switchkit::{NetworkObject, NetworkObjectKind, ident};

/// A mapping record whose backend object is gone or no longer the one the
/// control plane expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingNetwork {
    /// Control-plane network id.
    pub logical_id: String,
    /// Backend id the record points at.
    pub backend_id: String,
    /// Owning adapter id, when the record carries one.
    pub adapter_id: Option<String>,
}

impl From<NetworkMapping> for MissingNetwork {
    fn from(record: NetworkMapping) -> Self {
        Self {
            logical_id: record.logical_id,
            backend_id: record.backend_id,
            adapter_id: record.adapter_id,
        }
    }
}

/// Diagnostic for a backend id whose mapping records disagree on adapter id.
///
/// The orphan classification is existential (any one matching record clears
/// the object), which can mask a misconfiguration when records disagree;
/// this surfaces the disagreement without changing the classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousMapping {
    /// Backend object id shared by the disagreeing records.
    pub backend_id: String,
    /// The object's current display name.
    pub name: String,
    /// Every adapter id claimed by a mapping record for this backend id.
    pub adapter_ids: Vec<String>,
}

/// Result of one orphaned-networks scan.
#[derive(Debug, Default, Serialize)]
pub struct OrphanScan {
    /// Backend objects the control plane has never recorded (or recorded
    /// inconsistently), in inventory order.
    pub orphaned: Vec<NetworkObject>,
    /// Ambiguous-mapping diagnostics, in inventory order.
    pub ambiguous: Vec<AmbiguousMapping>,
}

/// Scan the mapping store for records whose backend object is missing.
///
/// A record is missing when its backend id is absent from the inventory, or
/// when it carries an adapter id that is no longer a prefix of the backend
/// display name. Display names for VLAN-backed objects are generated with
/// the owning adapter id as prefix, so a prefix mismatch means the object
/// was recreated under a different adapter and is effectively not the one
/// the control plane expects.
pub fn missing_networks(
    store: &dyn MappingStore,
    backend_names: &HashMap<String, String>,
) -> Result<Vec<MissingNetwork>> {
    let mut missing = Vec::new();
    for record in store.list_all()? {
        match backend_names.get(&record.backend_id) {
            None => missing.push(record.into()),
            Some(name) => {
                if let Some(adapter_id) = &record.adapter_id {
                    if !name.starts_with(adapter_id.as_str()) {
                        missing.push(record.into());
                    }
                }
            }
        }
    }
    Ok(missing)
}

/// Whether one mapping record clears a VLAN-backed object as non-orphaned.
fn record_matches(record: &NetworkMapping, name: &str) -> bool {
    record
        .adapter_id
        .as_deref()
        .is_none_or(|adapter_id| name.starts_with(adapter_id))
}

/// Scan the inventory for objects the control plane does not account for.
///
/// Standard networks and edge appliance networks are never owned by the
/// control plane and are skipped outright. For VLAN-backed port groups the
/// check is existential over matching records: one record with an empty
/// adapter id or a name-prefix adapter id clears the object.
pub fn orphaned_networks(
    inventory: &[NetworkObject],
    store: &dyn MappingStore,
) -> Result<OrphanScan> {
    let mut scan = OrphanScan::default();
    for object in inventory {
        if object.kind == NetworkObjectKind::Standard || ident::is_edge_name(&object.name) {
            continue;
        }
        let records = store.find_by_backend_id(&object.backend_id)?;
        if records.is_empty() {
            scan.orphaned.push(object.clone());
            continue;
        }
        if ident::is_port_group_id(&object.backend_id) {
            let matched = records.iter().any(|r| record_matches(r, &object.name));
            if !matched {
                scan.orphaned.push(object.clone());
            } else if records.iter().any(|r| !record_matches(r, &object.name)) {
                scan.ambiguous.push(AmbiguousMapping {
                    backend_id: object.backend_id.clone(),
                    name: object.name.clone(),
                    adapter_ids: records.iter().filter_map(|r| r.adapter_id.clone()).collect(),
                });
            }
        }
    }
    Ok(scan)
}
