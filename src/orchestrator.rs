//! High-level orchestration of lab resolution and artifact generation.
//!
//! The pipeline runs once per invocation: read and parse the lab
//! configuration, group interfaces into domains, load the subnet table,
//! allocate addresses, then hand the single resolved lab to every
//! requested generator. Generators never see different addressing
//! within one run.

use std::path::Path;

use color_eyre::eyre::Result;
use log::{error, info};

use crate::conf;
use crate::generate::{
    connectivity_lines, gateway_route_lines, interface_up_lines, ArtifactKind, GatewayError,
    ScriptLine,
};
use crate::ip::{self, AllocationError, ResolvedLab};
use crate::subnets;
use crate::topology;

/// A resolved lab plus the per-domain allocation failures that did not
/// stop the rest of the lab.
#[derive(Debug)]
pub struct ResolveOutcome {
    pub lab: ResolvedLab,
    pub failures: Vec<AllocationError>,
}

/// Resolve the lab topology from its two input files.
pub fn resolve_lab(conf_path: &Path, subnets_path: &Path) -> Result<ResolveOutcome> {
    let lines = conf::read_conf_lines(conf_path)?;
    let asocs = conf::parse_statements(&lines);
    info!(
        "Parsed {} interface statement(s) from {} line(s)",
        asocs.len(),
        lines.len()
    );

    let topology = topology::build_topology(asocs)?;
    info!("Built topology with {} domain(s)", topology.len());

    let table = subnets::load_subnets(subnets_path)?;

    let allocation = ip::allocate(&topology, &table)?;
    for failure in &allocation.failures {
        error!("{}", failure);
    }
    info!(
        "Resolved {} interface(s) across {} domain(s)",
        allocation.lab.interface_count(),
        allocation.lab.domains.len()
    );

    Ok(ResolveOutcome {
        lab: allocation.lab,
        failures: allocation.failures,
    })
}

/// The lines of one generation run plus its per-domain route failures.
#[derive(Debug)]
pub struct GeneratedRun {
    pub lines: Vec<ScriptLine>,
    pub failures: Vec<GatewayError>,
}

/// Run the requested generators over one resolved lab.
pub fn generate_artifacts(
    lab: &ResolvedLab,
    kinds: &[ArtifactKind],
    test_dir: &Path,
) -> GeneratedRun {
    let mut lines = Vec::new();
    let mut failures = Vec::new();

    for kind in kinds {
        match kind {
            ArtifactKind::Interfaces => lines.extend(interface_up_lines(lab)),
            ArtifactKind::Gateways => {
                let (routed, missing) = gateway_route_lines(lab);
                for failure in &missing {
                    error!("{}", failure);
                }
                lines.extend(routed);
                failures.extend(missing);
            }
            ArtifactKind::Connectivity => lines.extend(connectivity_lines(lab, test_dir)),
        }
    }

    GeneratedRun { lines, failures }
}
