//! Wire and domain types for the virtual-switch backend.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire type tag for a standard (non-managed) network.
pub const TYPE_TAG_STANDARD: &str = "Network";
/// Wire type tag for an overlay virtual wire.
pub const TYPE_TAG_VIRTUAL_WIRE: &str = "VirtualWire";
/// Wire type tag for a VLAN-backed distributed port group.
pub const TYPE_TAG_PORT_GROUP: &str = "DistributedVirtualPortgroup";

// =============================================================================
// Scoping-objects inventory
// =============================================================================

/// The backend's scoping-objects listing: a flat tree of typed nodes.
///
/// The listing contains every object in the backend's scope, not just
/// networks; consumers filter by [`ScopingObject::object_type_name`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopingTree {
    /// All objects reported by the backend.
    #[serde(default)]
    pub objects: Vec<ScopingObject>,
}

/// One typed node of the scoping-objects listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopingObject {
    /// Backend type tag, e.g. `"VirtualWire"`.
    pub object_type_name: String,
    /// Opaque backend object identifier (moref).
    pub object_id: String,
    /// Backend-assigned display name.
    #[serde(default)]
    pub name: String,
}

impl ScopingObject {
    /// Convenience constructor, mostly for tests and mocks.
    pub fn new(
        object_type_name: impl Into<String>,
        object_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            object_type_name: object_type_name.into(),
            object_id: object_id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Network objects
// =============================================================================

/// The recognized layer-2 network object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkObjectKind {
    /// A standard network; never owned by the control plane.
    Standard,
    /// An overlay virtual wire.
    VirtualWire,
    /// A VLAN-backed distributed port group.
    PortGroup,
}

impl NetworkObjectKind {
    /// Map a backend type tag to a kind. Unrecognized tags yield `None`.
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        match tag {
            TYPE_TAG_STANDARD => Some(Self::Standard),
            TYPE_TAG_VIRTUAL_WIRE => Some(Self::VirtualWire),
            TYPE_TAG_PORT_GROUP => Some(Self::PortGroup),
            _ => None,
        }
    }

    /// The backend type tag for this kind.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Standard => TYPE_TAG_STANDARD,
            Self::VirtualWire => TYPE_TAG_VIRTUAL_WIRE,
            Self::PortGroup => TYPE_TAG_PORT_GROUP,
        }
    }

    /// Short human-readable label for table output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::VirtualWire => "virtual-wire",
            Self::PortGroup => "port-group",
        }
    }
}

impl fmt::Display for NetworkObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One normalized network object from the backend inventory.
///
/// A read-only snapshot: recreated on every inventory query, never mutated
/// locally. Deleting it removes it from the backend, not from any local
/// structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkObject {
    /// Which of the recognized kinds this object is.
    pub kind: NetworkObjectKind,
    /// Opaque backend identifier; port groups carry the `dvportgroup` prefix.
    pub backend_id: String,
    /// Backend display name; VLAN-backed objects start with the owning
    /// adapter id by convention.
    pub name: String,
}

impl NetworkObject {
    /// Normalize a scoping object into a network object.
    ///
    /// Returns `None` for objects whose type tag is not one of the three
    /// recognized network kinds.
    #[must_use]
    pub fn from_scoping(obj: &ScopingObject) -> Option<Self> {
        let kind = NetworkObjectKind::from_type_tag(&obj.object_type_name)?;
        Some(Self {
            kind,
            backend_id: obj.object_id.clone(),
            name: obj.name.clone(),
        })
    }
}

// =============================================================================
// Adapters
// =============================================================================

/// A distributed virtual adapter record.
///
/// Unknown wire fields are preserved in `extra` so a read-modify-write
/// update round-trips everything the backend sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterRecord {
    /// Adapter identifier, e.g. `adapter-12`.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current uplink teaming policy.
    #[serde(default)]
    pub teaming_policy: String,
    /// Passthrough fields not modeled here.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The backend's fixed set of valid uplink teaming policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamingPolicy {
    /// Static link aggregation.
    EtherChannel,
    /// Load-based uplink selection.
    LoadbalanceLoadbased,
    /// Source port id hashing.
    LoadbalanceSrcid,
    /// Source MAC hashing.
    LoadbalanceSrcmac,
    /// Explicit failover order.
    FailoverOrder,
    /// LACP, active mode.
    LacpActive,
    /// LACP, passive mode.
    LacpPassive,
    /// LACP v2.
    LacpV2,
}

impl TeamingPolicy {
    /// Every valid teaming policy, in the backend's documented order.
    pub const ALL: [Self; 8] = [
        Self::EtherChannel,
        Self::LoadbalanceLoadbased,
        Self::LoadbalanceSrcid,
        Self::LoadbalanceSrcmac,
        Self::FailoverOrder,
        Self::LacpActive,
        Self::LacpPassive,
        Self::LacpV2,
    ];

    /// The backend's wire name for this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EtherChannel => "ETHER_CHANNEL",
            Self::LoadbalanceLoadbased => "LOADBALANCE_LOADBASED",
            Self::LoadbalanceSrcid => "LOADBALANCE_SRCID",
            Self::LoadbalanceSrcmac => "LOADBALANCE_SRCMAC",
            Self::FailoverOrder => "FAILOVER_ORDER",
            Self::LacpActive => "LACP_ACTIVE",
            Self::LacpPassive => "LACP_PASSIVE",
            Self::LacpV2 => "LACP_V2",
        }
    }

    /// Comma-separated list of every valid policy name.
    #[must_use]
    pub fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse an operator-supplied policy name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTeamingPolicy`] (carrying the full valid
    /// set) for anything outside the fixed list. Matching is exact; the
    /// backend's names are upper-case.
    pub fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| Error::UnsupportedTeamingPolicy {
                value: value.to_string(),
                allowed: Self::allowed_names(),
            })
    }
}

impl fmt::Display for TeamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
