//! Command-line surface of the multicheck bridge.

use std::path::PathBuf;

use clap::Parser;

/// Runs configured shell commands, extracts values from their output with
/// regular expressions and forwards them to the monitoring server through
/// the external sender client.
#[derive(Debug, Parser)]
#[command(name = "multicheck", version, about)]
pub struct Cli {
    /// Target host; `localhost` runs the checks agent-side, any other value
    /// proxies them server-side on behalf of that host
    pub hostname: String,

    /// Path to the agent host configuration (agent mode)
    #[arg(long, value_name = "PATH", default_value = "/etc/zabbix/zabbix_agentd.conf")]
    pub agent_config: PathBuf,

    /// Path to the server host configuration (server-proxy mode)
    #[arg(long, value_name = "PATH", default_value = "/etc/zabbix/zabbix_server.conf")]
    pub server_config: PathBuf,

    /// Path to the multicheck check configuration
    #[arg(short, long, value_name = "PATH", default_value = "/etc/zabbix/multicheck.conf")]
    pub config: PathBuf,

    /// Path to the sender client binary
    #[arg(long, value_name = "PATH", default_value = "/usr/bin/zabbix_sender")]
    pub sender: PathBuf,

    /// Per-command timeout in seconds; commands run unbounded when unset
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Apply only the first declared rule of each command (historical
    /// multichecker behavior) instead of all of them
    #[arg(long)]
    pub first_rule_only: bool,

    /// Verbose diagnostics; records are logged instead of transmitted
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_required() {
        assert!(Cli::try_parse_from(["multicheck"]).is_err());
    }

    #[test]
    fn defaults_are_applied() {
        let cli = Cli::try_parse_from(["multicheck", "localhost"]).unwrap();
        assert_eq!(cli.hostname, "localhost");
        assert_eq!(cli.config, PathBuf::from("/etc/zabbix/multicheck.conf"));
        assert_eq!(cli.sender, PathBuf::from("/usr/bin/zabbix_sender"));
        assert!(cli.timeout.is_none());
        assert!(!cli.first_rule_only);
        assert!(!cli.debug);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "multicheck",
            "--config",
            "/tmp/mc.conf",
            "--timeout",
            "30",
            "--first-rule-only",
            "--debug",
            "db1",
        ])
        .unwrap();
        assert_eq!(cli.hostname, "db1");
        assert_eq!(cli.config, PathBuf::from("/tmp/mc.conf"));
        assert_eq!(cli.timeout, Some(30));
        assert!(cli.first_rule_only);
        assert!(cli.debug);
    }
}
