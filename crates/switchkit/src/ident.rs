//! Identifier conventions baked into backend ids and display names.
//!
//! The backend encodes object provenance in its identifiers: VLAN port
//! group ids start with a fixed literal tag, edge appliances claim a
//! reserved display-name prefix, and VLAN-backed display names are
//! generated with the owning adapter id as their prefix. These predicates
//! are the single place that knowledge lives.

use regex::Regex;
use std::sync::OnceLock;

/// Fixed literal prefix of distributed port group backend ids.
pub const PORT_GROUP_PREFIX: &str = "dvportgroup";

/// Display-name prefix reserved for edge appliance networks.
pub const EDGE_NAME_PREFIX: &str = "edge-";

/// Whether a backend id names a VLAN-backed distributed port group.
#[must_use]
pub fn is_port_group_id(backend_id: &str) -> bool {
    backend_id.starts_with(PORT_GROUP_PREFIX)
}

/// Whether a display name belongs to an edge appliance network.
///
/// Edge networks are backend-internal and never owned by the control plane.
#[must_use]
pub fn is_edge_name(name: &str) -> bool {
    name.starts_with(EDGE_NAME_PREFIX)
}

fn adapter_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^adapter-\d+").expect("valid adapter id pattern"))
}

/// Derive the owning adapter id from a VLAN network's display name.
///
/// Backend display names for VLAN-backed networks are generated as
/// `adapter-<digits>` followed by the network's own suffix; a name that
/// does not match yields `None`.
#[must_use]
pub fn adapter_id_from_name(name: &str) -> Option<&str> {
    adapter_id_pattern().find(name).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_port_group_id() {
        assert!(is_port_group_id("dvportgroup-1054"));
        assert!(is_port_group_id("dvportgroup"));
        assert!(!is_port_group_id("virtualwire-17"));
        assert!(!is_port_group_id(""));
    }

    #[test]
    fn test_is_edge_name() {
        assert!(is_edge_name("edge-4-internal"));
        assert!(!is_edge_name("adapter-1-edge"));
        assert!(!is_edge_name(""));
    }

    #[test]
    fn test_adapter_id_from_name() {
        assert_eq!(
            adapter_id_from_name("adapter-12-net-5f2a"),
            Some("adapter-12")
        );
        assert_eq!(adapter_id_from_name("adapter-7"), Some("adapter-7"));
        assert_eq!(adapter_id_from_name("web-tier"), None);
        // The digits are required, and the prefix must be anchored.
        assert_eq!(adapter_id_from_name("adapter-"), None);
        assert_eq!(adapter_id_from_name("my-adapter-12"), None);
    }

    #[test]
    fn test_adapter_id_takes_longest_digit_run() {
        assert_eq!(
            adapter_id_from_name("adapter-1024(vlan 7)"),
            Some("adapter-1024")
        );
    }
}
