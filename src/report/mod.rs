//! Connectivity result checking.
//!
//! This module closes the loop on the connectivity artifact: after a
//! lab run has executed its test scripts, each host leaves a ping
//! transcript at `<results-dir>/<host>.user`. The checker parses those
//! transcripts, compares them against the obligations the generator
//! emitted, and reports pings that were never performed and pings that
//! got no reply.

use std::collections::HashSet;
use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::LazyLock;

use color_eyre::eyre::{eyre, Result};
use log::warn;
use regex::Regex;

use crate::generate::ping_obligations;
use crate::ip::ResolvedLab;

/// Match one ping statistics block:
/// "--- 10.0.0.2 ping statistics ---\n1 packets transmitted, 1 received"
static PING_RESULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"--- (\d{1,3}(?:\.\d{1,3}){3}) ping statistics ---\n(\d+) packets transmitted, (\d+) received",
    )
    .expect("Invalid ping result regex")
});

/// One parsed ping outcome from a host transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRecord {
    pub source: String,
    pub dest: Ipv4Addr,
    pub transmitted: u64,
    pub received: u64,
}

impl PingRecord {
    pub fn succeeded(&self) -> bool {
        self.received > 0
    }
}

/// Verdict over a completed lab run.
#[derive(Debug, Default)]
pub struct ConnectivityReport {
    /// Total obligations the generator emitted for this lab
    pub expected: usize,
    /// Obligations with at least one transcript entry
    pub performed: usize,
    /// Obligations with no transcript entry at all
    pub missing: Vec<(String, Ipv4Addr)>,
    /// Obligations whose pings all came back empty
    pub failed: Vec<(String, Ipv4Addr)>,
}

impl ConnectivityReport {
    /// True when every obligation was performed and answered.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

/// Extract every ping outcome from one host transcript.
pub fn parse_transcript(source: &str, contents: &str) -> Vec<PingRecord> {
    PING_RESULT
        .captures_iter(contents)
        .filter_map(|caps| {
            Some(PingRecord {
                source: source.to_string(),
                dest: caps[1].parse().ok()?,
                transmitted: caps[2].parse().ok()?,
                received: caps[3].parse().ok()?,
            })
        })
        .collect()
}

/// Check the transcripts of a completed run against the lab's expected
/// ping set.
///
/// A source host with obligations but no transcript file contributes
/// all of its obligations to the missing list; the run is judged on
/// whatever evidence exists.
pub fn check_results(lab: &ResolvedLab, results_dir: &Path) -> Result<ConnectivityReport> {
    if !results_dir.is_dir() {
        return Err(eyre!(
            "Results directory '{}' does not exist",
            results_dir.display()
        ));
    }

    let obligations = ping_obligations(lab);

    let sources: HashSet<&str> = obligations.iter().map(|(host, _)| host.as_str()).collect();

    let mut performed: HashSet<(String, Ipv4Addr)> = HashSet::new();
    let mut succeeded: HashSet<(String, Ipv4Addr)> = HashSet::new();

    for source in sources {
        let path = results_dir.join(format!("{}.user", source));
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("No transcript for host {} ({:?}): {}", source, path, err);
                continue;
            }
        };

        for record in parse_transcript(source, &contents) {
            let key = (record.source.clone(), record.dest);
            if record.succeeded() {
                succeeded.insert(key.clone());
            }
            performed.insert(key);
        }
    }

    let mut report = ConnectivityReport {
        expected: obligations.len(),
        ..ConnectivityReport::default()
    };

    for (source, dest) in obligations {
        let key = (source, dest);
        if !performed.contains(&key) {
            report.missing.push(key);
        } else {
            report.performed += 1;
            if !succeeded.contains(&key) {
                report.failed.push(key);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::NetedIface;
    use tempfile::tempdir;

    const TRANSCRIPT_OK: &str = "\
PING 10.0.0.2 (10.0.0.2) 56(84) bytes of data.
64 bytes from 10.0.0.2: icmp_seq=1 ttl=64 time=0.045 ms

--- 10.0.0.2 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms

PING 10.0.0.3 (10.0.0.3) 56(84) bytes of data.
64 bytes from 10.0.0.3: icmp_seq=1 ttl=64 time=0.051 ms

--- 10.0.0.3 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
";

    const TRANSCRIPT_LOSS: &str = "\
PING 10.0.0.3 (10.0.0.3) 56(84) bytes of data.

--- 10.0.0.3 ping statistics ---
1 packets transmitted, 0 received, 100% packet loss, time 0ms
";

    fn iface(host: &str, ip: &str) -> NetedIface {
        NetedIface {
            host: host.to_string(),
            index: 0,
            ip: ip.parse().unwrap(),
            netmask: "255.255.255.248".parse().unwrap(),
        }
    }

    fn lab() -> ResolvedLab {
        let mut lab = ResolvedLab::default();
        lab.domains.insert(
            "A".to_string(),
            vec![
                iface("pc1", "10.0.0.1"),
                iface("pc2", "10.0.0.2"),
                iface("r1", "10.0.0.3"),
            ],
        );
        lab
    }

    #[test]
    fn test_parse_transcript() {
        let records = parse_transcript("pc1", TRANSCRIPT_OK);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dest.to_string(), "10.0.0.2");
        assert!(records[0].succeeded());
        assert_eq!(records[1].dest.to_string(), "10.0.0.3");
    }

    #[test]
    fn test_parse_detects_total_loss() {
        let records = parse_transcript("pc2", TRANSCRIPT_LOSS);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transmitted, 1);
        assert!(!records[0].succeeded());
    }

    #[test]
    fn test_clean_run() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pc1.user"), TRANSCRIPT_OK).unwrap();
        std::fs::write(
            dir.path().join("pc2.user"),
            TRANSCRIPT_LOSS.replace("0 received, 100%", "1 received, 0%"),
        )
        .unwrap();

        let report = check_results(&lab(), dir.path()).unwrap();

        assert_eq!(report.expected, 3);
        assert_eq!(report.performed, 3);
        assert!(report.is_clean());
    }

    #[test]
    fn test_failed_ping_is_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pc1.user"), TRANSCRIPT_OK).unwrap();
        std::fs::write(dir.path().join("pc2.user"), TRANSCRIPT_LOSS).unwrap();

        let report = check_results(&lab(), dir.path()).unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "pc2");
        assert_eq!(report.failed[0].1.to_string(), "10.0.0.3");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_missing_transcript_marks_obligations_unperformed() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("pc1.user"), TRANSCRIPT_OK).unwrap();
        // pc2 never ran its test script.

        let report = check_results(&lab(), dir.path()).unwrap();

        assert_eq!(report.performed, 2);
        assert_eq!(report.missing, [("pc2".to_string(), "10.0.0.3".parse().unwrap())]);
    }
}
