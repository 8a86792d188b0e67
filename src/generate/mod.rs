//! Artifact generators.
//!
//! This module derives the three artifact kinds from the resolved lab:
//! interface bring-up, default routes, and connectivity tests. Every
//! generator is a pure function over `&ResolvedLab`; none of them touch
//! raw statements or mutate shared state.

pub mod connectivity;
pub mod gateways;
pub mod interfaces;

use std::path::Path;

use clap::ValueEnum;

// Re-export commonly used functions
pub use connectivity::{connectivity_lines, ping_obligations};
pub use gateways::{gateway_route_lines, GatewayError};
pub use interfaces::interface_up_lines;

/// Which artifact a run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactKind {
    /// Per-host interface activation commands
    Interfaces,
    /// Per-host default-route commands pointing at the domain router
    Gateways,
    /// All-pairs ping commands, one test script per source host
    Connectivity,
}

impl ArtifactKind {
    pub const ALL: &'static [ArtifactKind] = &[
        ArtifactKind::Interfaces,
        ArtifactKind::Gateways,
        ArtifactKind::Connectivity,
    ];
}

/// One generated command and the host script it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// The inner command (ifconfig / route / ping)
    pub command: String,
    /// Target script path, e.g. `pc1.startup` or `_test/pc1.test`
    pub script: String,
}

impl ScriptLine {
    pub fn new(command: String, script: String) -> Self {
        ScriptLine { command, script }
    }

    /// Wrap the inner command in the append-to-script contract.
    pub fn to_shell(&self) -> String {
        format!("echo '{}' >> {}", self.command, self.script)
    }
}

/// Provisioning script for a host.
pub fn startup_script(host: &str) -> String {
    format!("{}.startup", host)
}

/// Connectivity test script for a host, rooted at the test directory.
pub fn test_script(test_dir: &Path, host: &str) -> String {
    test_dir.join(format!("{}.test", host)).display().to_string()
}
