//! Lab topology types and domain grouping.
//!
//! This module holds the declared-interface types, the host role
//! markers, and the builder that folds parsed statements into domains.

pub mod builder;
pub mod types;

// Re-export commonly used types
pub use builder::{build_topology, Topology, TopologyError};
pub use types::{is_client, is_router, BoundIface, DomainAsoc};
