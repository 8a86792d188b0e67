//! Resolved addressing registry.
//!
//! This file writes the resolved lab as a JSON registry so external
//! tooling (test harnesses, monitoring) can discover which address each
//! host interface was assigned without re-running resolution.

use std::fs::File;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use log::info;

use crate::ip::ResolvedLab;

/// Write the resolved domain map as pretty-printed JSON.
pub fn write_registry(lab: &ResolvedLab, path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("Failed to create registry file '{}'", path.display()))?;

    serde_json::to_writer_pretty(file, &lab.domains)
        .wrap_err_with(|| format!("Failed to serialize registry to '{}'", path.display()))?;

    info!(
        "Wrote addressing registry for {} interface(s) to {:?}",
        lab.interface_count(),
        path
    );
    Ok(())
}
