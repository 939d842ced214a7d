//! Reconciliation between the backend inventory and control-plane mappings.

pub mod reconcile;
