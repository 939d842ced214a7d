//! Backend inventory collection.
//!
//! One scoping-objects query, filtered down to the three recognized
//! layer-2 network kinds. The collector is read-only and non-authoritative
//! by itself, so a response the backend sends but we cannot parse degrades
//! to an empty inventory instead of failing the run; transport failures
//! still propagate.

use anyhow::Result;
use std::collections::HashMap;
use switchkit::{Error, NetworkObject, ScopingTree, SwitchBackend};

fn query(backend: &dyn SwitchBackend) -> Result<ScopingTree> {
    match backend.scoping_objects() {
        Ok(tree) => Ok(tree),
        Err(Error::InvalidResponse(msg)) => {
            log::warn!("Unparseable scoping-objects response, treating as empty: {msg}");
            Ok(ScopingTree::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Collect all backend network objects, in inventory order.
pub fn collect(backend: &dyn SwitchBackend) -> Result<Vec<NetworkObject>> {
    let tree = query(backend)?;
    Ok(tree
        .objects
        .iter()
        .filter_map(NetworkObject::from_scoping)
        .collect())
}

/// Collect the backend-id → display-name index.
pub fn name_index(backend: &dyn SwitchBackend) -> Result<HashMap<String, String>> {
    let tree = query(backend)?;
    Ok(tree
        .objects
        .iter()
        .filter_map(NetworkObject::from_scoping)
        .map(|net| (net.backend_id, net.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchkit::{MockSwitchBackend, NetworkObjectKind};

    fn backend() -> MockSwitchBackend {
        MockSwitchBackend::new()
            .with_object("VirtualWire", "virtualwire-1", "net-alpha")
            .with_object("HostSystem", "host-3", "esx-1")
            .with_object("DistributedVirtualPortgroup", "dvportgroup-9", "adapter-2-net-beta")
            .with_object("Network", "network-4", "VM Network")
    }

    #[test]
    fn test_collect_filters_to_recognized_kinds() {
        let nets = collect(&backend()).unwrap();
        assert_eq!(nets.len(), 3);
        assert_eq!(nets[0].kind, NetworkObjectKind::VirtualWire);
        assert_eq!(nets[1].kind, NetworkObjectKind::PortGroup);
        assert_eq!(nets[2].kind, NetworkObjectKind::Standard);
    }

    #[test]
    fn test_collect_preserves_inventory_order() {
        let nets = collect(&backend()).unwrap();
        let ids: Vec<&str> = nets.iter().map(|n| n.backend_id.as_str()).collect();
        assert_eq!(ids, vec!["virtualwire-1", "dvportgroup-9", "network-4"]);
    }

    #[test]
    fn test_name_index() {
        let index = name_index(&backend()).unwrap();
        assert_eq!(index.get("virtualwire-1").unwrap(), "net-alpha");
        assert_eq!(index.get("dvportgroup-9").unwrap(), "adapter-2-net-beta");
        assert!(!index.contains_key("host-3"));
    }

    #[test]
    fn test_unparseable_inventory_degrades_to_empty() {
        let mock = MockSwitchBackend::new().with_invalid_inventory();
        assert!(collect(&mock).unwrap().is_empty());
        assert!(name_index(&mock).unwrap().is_empty());
    }

    #[test]
    fn test_empty_inventory_is_not_an_error() {
        let mock = MockSwitchBackend::new();
        assert!(collect(&mock).unwrap().is_empty());
    }
}
