//! # switchkit
//!
//! Blocking client library for a virtual-switch SDN backend.
//!
//! This crate provides the pieces an operator tool needs to talk to the
//! backend that owns layer-2 network objects:
//! - Querying the scoping-objects inventory and normalizing it into typed
//!   [`NetworkObject`]s
//! - Reading and updating distributed virtual adapter records (including
//!   the teaming policy)
//! - Deleting VLAN port groups and overlay virtual wires
//! - The identifier conventions baked into backend ids and display names
//!   ([`ident`])
//!
//! ## Example
//!
//! ```no_run
//! use switchkit::{HttpSwitchBackend, SwitchBackend};
//!
//! let backend = HttpSwitchBackend::new("https://backend.example.com");
//! let tree = backend.scoping_objects().unwrap();
//! println!("backend reports {} scoping objects", tree.objects.len());
//! ```
//!
//! All calls are synchronous request/response; cancellation and timeouts are
//! whatever the underlying HTTP agent provides.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod ident;
pub mod types;

pub use backend::http::HttpSwitchBackend;
pub use backend::{MockSwitchBackend, MutationCall, SwitchBackend};
pub use error::{Error, ErrorCategory, Result};
pub use types::{
    AdapterRecord, NetworkObject, NetworkObjectKind, ScopingObject, ScopingTree, TeamingPolicy,
};
