//! Domain grouping for parsed interface statements.
//!
//! This file folds the stream of domain associations into a topology:
//! a per-domain, declaration-ordered list of interfaces. The order
//! within a domain is load-bearing: the address allocator hands out the
//! Nth host address of a subnet to the Nth declared interface.

use std::collections::{BTreeMap, HashMap};

use crate::topology::types::{BoundIface, DomainAsoc};

/// Domain name to declaration-ordered interface list.
///
/// The map gives lookup by domain name; each `Vec` preserves the exact
/// order interfaces appeared in the configuration. Domain iteration is
/// sorted by name, making whole-run output deterministic.
pub type Topology = BTreeMap<String, Vec<BoundIface>>;

/// Topology construction errors
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error(
        "Ambiguous topology: {host}[{index}] declared in domain {first} and again in domain {second}"
    )]
    AmbiguousDomain {
        host: String,
        index: u32,
        first: String,
        second: String,
    },
}

/// Fold parsed associations into a topology.
///
/// Interfaces are never deduplicated: a pair declared twice under the
/// same domain stays twice and will consume two addresses. The same
/// pair under two different domains has no single correct address and
/// is rejected outright.
pub fn build_topology<I>(asocs: I) -> Result<Topology, TopologyError>
where
    I: IntoIterator<Item = DomainAsoc>,
{
    let mut domains: Topology = BTreeMap::new();
    let mut first_seen: HashMap<BoundIface, String> = HashMap::new();

    for asoc in asocs {
        match first_seen.get(&asoc.iface).cloned() {
            Some(first) if first != asoc.domain => {
                return Err(TopologyError::AmbiguousDomain {
                    host: asoc.iface.host,
                    index: asoc.iface.index,
                    first,
                    second: asoc.domain,
                });
            }
            Some(_) => {}
            None => {
                first_seen.insert(asoc.iface.clone(), asoc.domain.clone());
            }
        }

        domains.entry(asoc.domain).or_default().push(asoc.iface);
    }

    Ok(domains)
}
