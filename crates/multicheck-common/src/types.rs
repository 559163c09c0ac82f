use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Placeholder in configured command lines that is replaced with the
/// resolved target hostname before execution.
pub const HOSTNAME_PLACEHOLDER: &str = "@HOSTNAME@";

/// One extracted metric, ready for submission to the monitoring server.
///
/// The item key is synthesized from the rule's item prefix and the
/// discriminator captured from the command output, e.g.
/// `multicheck.powerdns.recursor[packetcache-hits]`. Values are carried as
/// text even when numeric; the server performs any coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub item_key: String,
    /// Seconds since epoch, fixed for the whole run.
    pub timestamp: i64,
    pub value: String,
}

/// Immutable per-run context, built once at startup and passed by reference
/// into every component.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Target host the records are submitted for.
    pub hostname: String,
    /// Monitoring server address the sender client connects to.
    pub server_address: String,
    pub server_port: u16,
    /// Timestamp stamped onto every record of this run.
    pub timestamp: i64,
    /// Debug runs log records instead of transmitting them.
    pub debug: bool,
}

impl RunContext {
    pub fn new(hostname: String, server_address: String, server_port: u16, debug: bool) -> Self {
        Self {
            hostname,
            server_address,
            server_port,
            timestamp: Utc::now().timestamp(),
            debug,
        }
    }

    /// Replaces every occurrence of [`HOSTNAME_PLACEHOLDER`] in a configured
    /// command line with the resolved target hostname.
    pub fn substitute_hostname(&self, command_line: &str) -> String {
        command_line.replace(HOSTNAME_PLACEHOLDER, &self.hostname)
    }
}
