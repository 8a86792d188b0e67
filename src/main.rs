use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use env_logger::Env;
use log::{error, info};
use std::path::{Path, PathBuf};

use netlabgen::generate::ArtifactKind;
use netlabgen::ip::ResolvedLab;
use netlabgen::{orchestrator, registry, report};

/// Compiler from Netkit-style lab topology descriptions to per-host
/// provisioning and test scripts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the lab configuration file
    #[arg(short, long, default_value = "lab.conf")]
    conf: PathBuf,

    /// Path to the YAML subnet table (domain -> CIDR block)
    #[arg(short, long, default_value = "subnets.yml")]
    subnets: PathBuf,

    /// Artifact kinds to generate; defaults to all of them
    #[arg(short, long, value_enum)]
    artifact: Vec<ArtifactKind>,

    /// Directory the connectivity test scripts are rooted at
    #[arg(long, default_value = "_test")]
    test_dir: PathBuf,

    /// Write the resolved addressing registry to this JSON file
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Check ping transcripts from a completed run in this directory
    /// instead of generating artifacts
    #[arg(long)]
    check_results: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting NetLabGen");
    info!("Lab configuration: {:?}", args.conf);
    info!("Subnet table: {:?}", args.subnets);

    // Resolve the topology exactly once; every artifact kind below sees
    // the same addressing.
    let outcome = orchestrator::resolve_lab(&args.conf, &args.subnets)?;

    if let Some(path) = &args.registry {
        registry::write_registry(&outcome.lab, path)?;
    }

    if let Some(results_dir) = &args.check_results {
        if !outcome.failures.is_empty() {
            return Err(eyre!(
                "{} domain(s) failed to resolve; cannot judge a partial lab",
                outcome.failures.len()
            ));
        }
        return run_results_check(&outcome.lab, results_dir);
    }

    let kinds = if args.artifact.is_empty() {
        ArtifactKind::ALL.to_vec()
    } else {
        args.artifact.clone()
    };

    let run = orchestrator::generate_artifacts(&outcome.lab, &kinds, &args.test_dir);
    for line in &run.lines {
        println!("{}", line.to_shell());
    }

    let domain_failures = outcome.failures.len() + run.failures.len();
    if domain_failures > 0 {
        return Err(eyre!(
            "{} domain failure(s); the artifacts above cover only the domains that resolved",
            domain_failures
        ));
    }

    info!("Artifact generation completed successfully");
    Ok(())
}

fn run_results_check(lab: &ResolvedLab, results_dir: &Path) -> Result<()> {
    info!("Checking connectivity results in {:?}", results_dir);

    let verdict = report::check_results(lab, results_dir)?;
    info!(
        "{}/{} expected ping(s) performed",
        verdict.performed, verdict.expected
    );

    for (source, dest) in &verdict.missing {
        error!("Ping {} -> {} was never performed", source, dest);
    }
    for (source, dest) in &verdict.failed {
        error!("No connectivity between {} and {}", source, dest);
    }

    if !verdict.is_clean() {
        return Err(eyre!(
            "Connectivity check failed: {} missing, {} without reply",
            verdict.missing.len(),
            verdict.failed.len()
        ));
    }

    info!("All expected pings performed and answered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["netlabgen"]);

        assert_eq!(args.conf, PathBuf::from("lab.conf"));
        assert_eq!(args.subnets, PathBuf::from("subnets.yml"));
        assert_eq!(args.test_dir, PathBuf::from("_test"));
        assert!(args.artifact.is_empty());
        assert!(args.registry.is_none());
        assert!(args.check_results.is_none());
    }

    #[test]
    fn test_cli_artifact_selection() {
        let args = Args::parse_from([
            "netlabgen",
            "--artifact",
            "interfaces",
            "--artifact",
            "connectivity",
        ]);

        assert_eq!(
            args.artifact,
            vec![ArtifactKind::Interfaces, ArtifactKind::Connectivity]
        );
    }

    #[test]
    fn test_cli_check_results_mode() {
        let args = Args::parse_from([
            "netlabgen",
            "--conf",
            "static-1/lab.conf",
            "--check-results",
            "static-1/_test/results",
        ]);

        assert_eq!(args.conf, PathBuf::from("static-1/lab.conf"));
        assert_eq!(
            args.check_results,
            Some(PathBuf::from("static-1/_test/results"))
        );
    }
}
