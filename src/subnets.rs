//! Domain subnet table loading.
//!
//! This file loads the YAML mapping from domain name to CIDR block and
//! validates every entry as a well-formed IPv4 network before the
//! allocator gets to see the table.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use ipnet::Ipv4Net;
use log::info;

/// Domain name to subnet block, immutable once loaded.
pub type SubnetTable = BTreeMap<String, Ipv4Net>;

/// Load and validate the subnet table from a YAML file.
///
/// The file is a flat mapping, e.g.:
///
/// ```yaml
/// A: 10.0.0.0/29
/// B: 10.0.1.0/24
/// ```
pub fn load_subnets(path: &Path) -> Result<SubnetTable> {
    info!("Loading subnet table from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open subnet table '{}'", path.display()))?;

    let raw: BTreeMap<String, String> = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse subnet table '{}'", path.display()))?;

    let mut table = SubnetTable::new();
    for (domain, cidr) in raw {
        let net: Ipv4Net = cidr
            .parse()
            .wrap_err_with(|| format!("Invalid subnet '{}' for domain {}", cidr, domain))?;
        table.insert(domain, net);
    }

    info!("Loaded {} domain subnet(s)", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_subnet_table() {
        let yaml = "A: 10.0.0.0/29\nB: 192.168.1.0/24\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let table = load_subnets(temp_file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["A"], "10.0.0.0/29".parse::<Ipv4Net>().unwrap());
        assert_eq!(table["B"].prefix_len(), 24);
    }

    #[test]
    fn test_invalid_cidr_is_rejected() {
        let yaml = "A: 10.0.0.0/33\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let err = load_subnets(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("domain A"));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        assert!(load_subnets(Path::new("/nonexistent/subnets.yml")).is_err());
    }
}
