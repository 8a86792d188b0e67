//! Default-route artifact.
//!
//! Per domain, the first router-marked interface is the gateway; every
//! other client-marked interface gets a default route pointing at it.
//! Hosts matching neither marker are left alone.

use crate::generate::{startup_script, ScriptLine};
use crate::ip::ResolvedLab;
use crate::topology::{is_client, is_router};

/// Gateway route generation errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No router in domain {domain}: no host matches the router marker")]
    NoRouter { domain: String },
}

/// Default-route commands for every client of every domain.
///
/// A domain without a router cannot route its clients anywhere; that
/// failure is reported for the domain and the remaining domains still
/// generate.
pub fn gateway_route_lines(lab: &ResolvedLab) -> (Vec<ScriptLine>, Vec<GatewayError>) {
    let mut lines = Vec::new();
    let mut failures = Vec::new();

    for (domain, ifaces) in &lab.domains {
        let Some(router_pos) = ifaces.iter().position(|iface| is_router(&iface.host)) else {
            failures.push(GatewayError::NoRouter {
                domain: domain.clone(),
            });
            continue;
        };
        let router_ip = ifaces[router_pos].ip;

        for (pos, iface) in ifaces.iter().enumerate() {
            if pos == router_pos || !is_client(&iface.host) {
                continue;
            }

            lines.push(ScriptLine::new(
                format!("route add default gw {}", router_ip),
                startup_script(&iface.host),
            ));
        }
    }

    (lines, failures)
}
