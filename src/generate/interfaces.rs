//! Interface bring-up artifact.

use crate::generate::{startup_script, ScriptLine};
use crate::ip::ResolvedLab;

/// One activation command per resolved interface, appended to the
/// owning host's startup script.
pub fn interface_up_lines(lab: &ResolvedLab) -> Vec<ScriptLine> {
    lab.interfaces()
        .map(|iface| {
            ScriptLine::new(
                format!(
                    "ifconfig eth{} {} netmask {} up",
                    iface.index, iface.ip, iface.netmask
                ),
                startup_script(&iface.host),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::NetedIface;

    fn lab() -> ResolvedLab {
        let mut lab = ResolvedLab::default();
        lab.domains.insert(
            "A".to_string(),
            vec![
                NetedIface {
                    host: "pc1".to_string(),
                    index: 0,
                    ip: "10.0.0.1".parse().unwrap(),
                    netmask: "255.255.255.248".parse().unwrap(),
                },
                NetedIface {
                    host: "r1".to_string(),
                    index: 2,
                    ip: "10.0.0.2".parse().unwrap(),
                    netmask: "255.255.255.248".parse().unwrap(),
                },
            ],
        );
        lab
    }

    #[test]
    fn test_one_command_per_interface() {
        let lines = interface_up_lines(&lab());

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].command,
            "ifconfig eth0 10.0.0.1 netmask 255.255.255.248 up"
        );
        assert_eq!(lines[0].script, "pc1.startup");
        assert_eq!(
            lines[1].command,
            "ifconfig eth2 10.0.0.2 netmask 255.255.255.248 up"
        );
        assert_eq!(lines[1].script, "r1.startup");
    }

    #[test]
    fn test_no_cross_host_leakage() {
        for line in interface_up_lines(&lab()) {
            let host = line.script.trim_end_matches(".startup");
            assert!(
                line.command.contains(&format!(" {} ", host_ip(host))),
                "command {:?} not addressed to its own host",
                line.command
            );
        }
    }

    fn host_ip(host: &str) -> &'static str {
        match host {
            "pc1" => "10.0.0.1",
            "r1" => "10.0.0.2",
            other => panic!("unexpected host {}", other),
        }
    }
}
