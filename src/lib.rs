//! # NetLabGen - Lab topology compiler for Netkit-style virtual network labs
//!
//! This library turns a textual lab-topology description into per-host
//! shell commands: interface bring-up, default-route installation, and
//! all-pairs connectivity test scripts.
//!
//! ## Overview
//!
//! A lab configuration declares network interfaces and assigns each one to
//! a collision domain (a logical subnet named by a single uppercase
//! letter). NetLabGen groups the declared interfaces by domain, allocates
//! every interface a deterministic IPv4 address from the domain's subnet,
//! and derives provisioning and test artifacts from the resolved topology.
//! It only ever emits command text; nothing is executed.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `conf`: lab configuration reading and interface-statement parsing
//! - `subnets`: YAML subnet table loading and validation
//! - `topology`: domain grouping and host role classification
//! - `ip`: deterministic address allocation over domain subnets
//! - `generate`: artifact generators (interfaces, gateways, connectivity)
//! - `registry`: JSON dump of the resolved addressing
//! - `report`: connectivity result checking for a completed lab run
//! - `orchestrator`: high-level orchestration of artifact generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use netlabgen::generate::ArtifactKind;
//! use netlabgen::orchestrator;
//!
//! // Resolve the lab topology once
//! let outcome = orchestrator::resolve_lab(
//!     Path::new("lab.conf"),
//!     Path::new("subnets.yml"),
//! )?;
//!
//! // Generate every artifact kind from the same resolved topology
//! let run = orchestrator::generate_artifacts(
//!     &outcome.lab,
//!     ArtifactKind::ALL,
//!     Path::new("_test"),
//! );
//!
//! for line in &run.lines {
//!     println!("{}", line.to_shell());
//! }
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Configuration Format
//!
//! The lab configuration is line-oriented; any line of the form
//! `host[index] = "D...` declares interface `index` of `host` as a member
//! of domain `D`. All other lines are ignored.
//!
//! ```text
//! pc1[0] = "A"
//! pc2[0] = "A"
//! r1[0] = "A"
//! ```
//!
//! The subnet table is a YAML mapping from domain name to CIDR block:
//!
//! ```yaml
//! A: 10.0.0.0/29
//! B: 10.0.1.0/24
//! ```
//!
//! ## Error Handling
//!
//! Typed errors (`thiserror`) cover topology and allocation failures;
//! boundary functions return `color_eyre::Result` with file-path context.
//! A line that is not an interface statement is skipped, never an error.

pub mod conf;
pub mod subnets;
pub mod topology;
pub mod ip;
pub mod generate;
pub mod registry;
pub mod report;
pub mod orchestrator;
