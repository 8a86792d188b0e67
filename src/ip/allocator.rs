//! Deterministic address allocation.
//!
//! This file contains the core allocation algorithm: for each domain,
//! zip the declaration-ordered interface list with the subnet's host
//! addresses in canonical enumeration order. The first declared
//! interface gets the first host address, the second the second, and so
//! on. Network and broadcast addresses are never handed out.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

use crate::subnets::SubnetTable;
use crate::topology::{BoundIface, Topology};

/// A declared interface enriched with its assigned address and the
/// domain netmask. Immutable after allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetedIface {
    pub host: String,
    pub index: u32,
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

/// The fully resolved lab: domain name to addressed interface list.
///
/// Built once per invocation and passed by shared reference to every
/// generator, so all artifact kinds see identical addressing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedLab {
    pub domains: BTreeMap<String, Vec<NetedIface>>,
}

impl ResolvedLab {
    /// All interfaces of the lab, in domain iteration order and then
    /// within-domain declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &NetedIface> {
        self.domains.values().flatten()
    }

    pub fn interface_count(&self) -> usize {
        self.domains.values().map(Vec::len).sum()
    }
}

/// Address allocation errors
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("Unknown domain {domain}: no subnet table entry")]
    UnknownDomain { domain: String },
    #[error(
        "Subnet exhausted in domain {domain}: {declared} interface(s) declared but {network} provides only {capacity} host address(es)"
    )]
    Exhausted {
        domain: String,
        declared: usize,
        network: Ipv4Net,
        capacity: u64,
    },
}

/// Outcome of an allocation pass: the domains that resolved, plus the
/// per-domain failures that did not stop the rest of the lab.
#[derive(Debug)]
pub struct Allocation {
    pub lab: ResolvedLab,
    pub failures: Vec<AllocationError>,
}

/// Usable host addresses in a network, excluding network and broadcast
/// (/31 and /32 keep all their addresses, as `Ipv4Net::hosts` does).
fn host_capacity(net: Ipv4Net) -> u64 {
    match net.prefix_len() {
        31 => 2,
        32 => 1,
        prefix => (1u64 << (32 - prefix)) - 2,
    }
}

/// Allocate addresses for every domain of the topology.
///
/// A domain with no subnet table entry aborts the whole run: nothing in
/// that domain can be addressed and the table is presumed wrong. Subnet
/// exhaustion is scoped to its own domain; the remaining domains still
/// resolve and the failure is reported alongside them.
pub fn allocate(topology: &Topology, subnets: &SubnetTable) -> Result<Allocation, AllocationError> {
    for domain in topology.keys() {
        if !subnets.contains_key(domain) {
            return Err(AllocationError::UnknownDomain {
                domain: domain.clone(),
            });
        }
    }

    let mut lab = ResolvedLab::default();
    let mut failures = Vec::new();

    for (domain, ifaces) in topology {
        match allocate_domain(domain, ifaces, subnets[domain]) {
            Ok(resolved) => {
                lab.domains.insert(domain.clone(), resolved);
            }
            Err(failure) => failures.push(failure),
        }
    }

    Ok(Allocation { lab, failures })
}

fn allocate_domain(
    domain: &str,
    ifaces: &[BoundIface],
    net: Ipv4Net,
) -> Result<Vec<NetedIface>, AllocationError> {
    let netmask = net.netmask();
    let mut hosts = net.hosts();

    ifaces
        .iter()
        .map(|iface| {
            let ip = hosts.next().ok_or_else(|| AllocationError::Exhausted {
                domain: domain.to_string(),
                declared: ifaces.len(),
                network: net,
                capacity: host_capacity(net),
            })?;

            Ok(NetedIface {
                host: iface.host.clone(),
                index: iface.index,
                ip,
                netmask,
            })
        })
        .collect()
}
