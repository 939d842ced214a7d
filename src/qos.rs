//! QoS policy resolution.
//!
//! Folds a logical policy's rule list into the single shaping/marking
//! record the backend adapter format can carry. The backend supports one
//! rule of each kind: with duplicates the last one encountered wins, and
//! direction-specific rules are not distinguished. That is a documented
//! backend limitation, preserved exactly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rule kind for a bandwidth limit.
pub const RULE_TYPE_BANDWIDTH_LIMIT: &str = "bandwidth_limit";
/// Rule kind for DSCP marking.
pub const RULE_TYPE_DSCP_MARKING: &str = "dscp_marking";

/// One logical QoS rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QosRule {
    /// Rule kind; unrecognized kinds are ignored.
    #[serde(rename = "type")]
    pub kind: String,
    /// Bandwidth cap in kilobits per second (bandwidth-limit rules).
    #[serde(default)]
    pub max_kbps: u64,
    /// Burst allowance in kilobits (bandwidth-limit rules).
    #[serde(default)]
    pub max_burst_kbps: u64,
    /// DSCP value, 0-63 (DSCP-marking rules).
    #[serde(default)]
    pub dscp_mark: u8,
}

/// A logical QoS policy: an id and its ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QosPolicy {
    /// Policy identifier.
    pub id: String,
    /// Rules in definition order.
    #[serde(default)]
    pub rules: Vec<QosRule>,
}

/// Read access to logical QoS policies.
pub trait PolicyStore {
    /// Look up a policy by id; `None` when it does not exist.
    fn policy(&self, policy_id: &str) -> Result<Option<QosPolicy>>;
}

#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    policies: Vec<QosPolicy>,
}

/// Policy store backed by a JSON file.
#[derive(Debug, Default)]
pub struct JsonPolicyStore {
    policies: Vec<QosPolicy>,
}

impl JsonPolicyStore {
    /// Load the policy file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let file: PolicyFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid policy file format in {}", path.display()))?;
        Ok(Self {
            policies: file.policies,
        })
    }

    /// Build a store from in-memory policies (used by tests)
    pub fn from_policies(policies: Vec<QosPolicy>) -> Self {
        Self { policies }
    }
}

impl PolicyStore for JsonPolicyStore {
    fn policy(&self, policy_id: &str) -> Result<Option<QosPolicy>> {
        Ok(self.policies.iter().find(|p| p.id == policy_id).cloned())
    }
}

/// The backend-native shaping/marking record for one logical policy.
///
/// Constructed on demand and never cached, so edits to the logical policy
/// are picked up on the next resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShapingConfig {
    /// Whether bandwidth shaping is enabled.
    pub bandwidth_enabled: bool,
    /// Average bandwidth in bits per second.
    pub average_bandwidth_bps: u64,
    /// Peak bandwidth in bits per second, synthesized from the average.
    pub peak_bandwidth_bps: u64,
    /// Burst size in bytes.
    pub burst_size_bytes: u64,
    /// Whether DSCP marking is enabled.
    pub dscp_mark_enabled: bool,
    /// DSCP value to mark with.
    pub dscp_mark_value: u8,
}

/// Resolve a logical policy into a backend shaping config.
///
/// An absent `policy_id`, an unknown policy, or a policy with no rules is
/// the default "no QoS" state, not a failure. Conversions:
/// average `kbps * 1024` → bps, burst `kbps * 128` → bytes, and peak is
/// `round(average * peak_multiplier)` because the backend format carries a
/// single bandwidth value.
pub fn resolve(
    store: &dyn PolicyStore,
    policy_id: Option<&str>,
    peak_multiplier: f64,
) -> Result<ShapingConfig> {
    let mut config = ShapingConfig::default();
    let Some(policy_id) = policy_id else {
        return Ok(config);
    };
    let Some(policy) = store.policy(policy_id)? else {
        return Ok(config);
    };

    for rule in &policy.rules {
        match rule.kind.as_str() {
            RULE_TYPE_BANDWIDTH_LIMIT => {
                config.bandwidth_enabled = true;
                config.average_bandwidth_bps = rule.max_kbps * 1024;
                config.peak_bandwidth_bps =
                    (config.average_bandwidth_bps as f64 * peak_multiplier).round() as u64;
                config.burst_size_bytes = rule.max_burst_kbps * 128;
            }
            RULE_TYPE_DSCP_MARKING => {
                config.dscp_mark_enabled = true;
                config.dscp_mark_value = rule.dscp_mark;
            }
            _ => {}
        }
    }
    Ok(config)
}
