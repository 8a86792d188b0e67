//! Lab configuration reading and statement parsing.
//!
//! This file handles the line-oriented lab configuration: reading the
//! file, dropping blank lines, and recognizing interface statements of
//! the form `host[index] = "D`.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use color_eyre::eyre::{Result, WrapErr};
use log::debug;
use regex::Regex;

use crate::topology::{BoundIface, DomainAsoc};

/// Match: `host[index] = "D` at the start of a line. The host is a
/// lower-case alphanumeric/underscore token, the index a decimal
/// interface slot, and the domain a single uppercase letter right after
/// the opening quote. Everything past the domain letter is irrelevant.
static IFACE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([a-z0-9_]+)\[(\d+)\]\s*=\s*"([A-Z])"#)
        .expect("Invalid iface statement regex")
});

/// Read a lab configuration file and return its non-blank lines.
pub fn read_conf_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read lab configuration '{}'", path.display()))?;

    Ok(contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse one configuration line into a domain association.
///
/// Returns `None` for anything that is not an interface statement
/// (comments, directives, malformed lines). Rejection is local to the
/// line; callers skip it and move on.
pub fn parse_iface_statement(statement: &str) -> Option<DomainAsoc> {
    let caps = IFACE_STATEMENT.captures(statement)?;

    let host = caps[1].to_string();
    let index: u32 = caps[2].parse().ok()?;
    let domain = caps[3].to_string();

    Some(DomainAsoc {
        iface: BoundIface { host, index },
        domain,
    })
}

/// Parse every line of a configuration, keeping the associations and
/// dropping everything else.
pub fn parse_statements<I, S>(lines: I) -> Vec<DomainAsoc>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let parsed = parse_iface_statement(line);
            if parsed.is_none() {
                debug!("Skipping non-statement line: {:?}", line);
            }
            parsed
        })
        .collect()
}
