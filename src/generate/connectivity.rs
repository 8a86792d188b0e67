//! Connectivity-test artifact.
//!
//! Every unordered pair of interfaces across the whole lab yields one
//! directed obligation: the first element's host pings the second
//! element's address. Commands are grouped by source host, one test
//! script per host.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::generate::{test_script, ScriptLine};
use crate::ip::ResolvedLab;

/// The expected ping set: `(source host, destination address)` for each
/// unordered interface pair, keyed by the pair's first element.
///
/// Shared between the test generator and the results checker so both
/// always agree on what a complete run looks like.
pub fn ping_obligations(lab: &ResolvedLab) -> Vec<(String, Ipv4Addr)> {
    let all: Vec<_> = lab.interfaces().collect();
    let mut obligations = Vec::new();

    for (pos, source) in all.iter().enumerate() {
        for dest in &all[pos + 1..] {
            obligations.push((source.host.clone(), dest.ip));
        }
    }

    obligations
}

/// Ping commands for every obligation, grouped by source host and
/// appended to that host's test script.
pub fn connectivity_lines(lab: &ResolvedLab, test_dir: &Path) -> Vec<ScriptLine> {
    let mut by_host: BTreeMap<String, Vec<Ipv4Addr>> = BTreeMap::new();
    for (source, dest) in ping_obligations(lab) {
        by_host.entry(source).or_default().push(dest);
    }

    by_host
        .into_iter()
        .flat_map(|(host, dests)| {
            let script = test_script(test_dir, &host);
            dests
                .into_iter()
                .map(move |dest| ScriptLine::new(format!("ping -c 1 {}", dest), script.clone()))
        })
        .collect()
}
