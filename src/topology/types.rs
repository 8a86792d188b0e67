//! Topology type definitions.
//!
//! This file contains the declared-interface types produced by the
//! statement parser and the host role classification used by the
//! gateway generator.

/// A declared network interface on a host, not yet assigned an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundIface {
    /// Opaque host identifier (lower-case alphanumeric/underscore token)
    pub host: String,
    /// The host's local interface slot (eth0, eth1, ...)
    pub index: u32,
}

/// The outcome of parsing one interface statement: an interface and the
/// collision domain it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAsoc {
    pub iface: BoundIface,
    /// Single uppercase letter naming the logical subnet
    pub domain: String,
}

/// Substring that marks a host as a router candidate.
pub const ROUTER_MARKER: &str = "r";

/// Substring that marks a host as a client of its domain's router.
pub const CLIENT_MARKER: &str = "pc";

/// Whether a host identifier names a router.
///
/// Classification is substring containment on the opaque identifier, a
/// naming convention inherited from the lab format. Generators must go
/// through these predicates rather than matching identifiers themselves,
/// so the convention can later be swapped for an explicit role tag.
pub fn is_router(host: &str) -> bool {
    host.contains(ROUTER_MARKER)
}

/// Whether a host identifier names a client machine.
pub fn is_client(host: &str) -> bool {
    host.contains(CLIENT_MARKER)
}
