//! Readers for the two host configuration formats that supply the
//! monitoring server's connection parameters.
//!
//! Both files are plain `Key = Value` text with `#` comments. The agent
//! file is consulted in agent mode (`localhost`), the server file in
//! server-proxy mode. Unknown keys are ignored; these files belong to other
//! programs and carry far more than we read.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_PORT: u16 = 10051;

/// Connection parameters read from the agent-style host configuration.
///
/// Only `Hostname` is mandatory; `Server` and `ServerPort` fall back to
/// `localhost:10051` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentHostConfig {
    pub hostname: String,
    pub server: String,
    pub server_port: u16,
}

impl AgentHostConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::read_file(path)?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let kv = parse_key_values(text);
        let hostname = kv
            .get("Hostname")
            .cloned()
            .ok_or_else(|| ConfigError::MissingHostname {
                path: path.display().to_string(),
            })?;
        // Server may be a comma-separated allowlist; the first entry is the
        // submission target.
        let server = kv
            .get("Server")
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        let server_port = match kv.get("ServerPort") {
            Some(value) => parse_port(value)?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            hostname,
            server,
            server_port,
        })
    }
}

/// Connection parameters read from the server-style host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHostConfig {
    pub listen_ip: String,
    pub listen_port: u16,
}

impl ServerHostConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::read_file(path)?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self> {
        let kv = parse_key_values(text);
        let listen_ip = match kv.get("ListenIP").map(String::as_str) {
            // A listen wildcard is not a connectable address.
            None | Some("0.0.0.0") => DEFAULT_SERVER.to_string(),
            Some(ip) => ip.to_string(),
        };
        let listen_port = match kv.get("ListenPort") {
            Some(value) => parse_port(value)?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            listen_ip,
            listen_port,
        })
    }
}

fn parse_key_values(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

fn parse_port(value: &str) -> Result<u16> {
    value.parse().map_err(|_| ConfigError::InvalidPort {
        value: value.to_string(),
    })
}
