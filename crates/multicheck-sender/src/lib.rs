//! Staging and transmission of extracted metric records.
//!
//! Records are written one per line to a short-lived staging file and the
//! external sender binary is invoked to transmit them. The wire protocol
//! belongs entirely to that binary; this crate only prepares its input.
//!
//! The orchestrator talks to the [`RecordSink`] trait: [`BinarySender`]
//! drives the real client, while [`DryRunSink`] logs records for debug runs
//! without transmitting anything.

pub mod error;


use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use chrono::Utc;
use multicheck_common::types::MetricRecord;
use rand::Rng;
use tokio::process::Command;

use error::{Result, SenderError};

/// Destination for a command's record batch.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Submits one batch on behalf of `hostname`. Transmission failures are
    /// per-command: the caller logs them and moves on.
    async fn send(&self, hostname: &str, records: &[MetricRecord]) -> Result<()>;
}

/// Formats one record as a staging line understood by the sender binary.
pub fn staging_line(record: &MetricRecord) -> String {
    format!("- {} {} {}", record.item_key, record.timestamp, record.value)
}

/// Sends records by staging them to a temp file and invoking the external
/// sender binary.
#[derive(Debug)]
pub struct BinarySender {
    binary: PathBuf,
    server: String,
    port: u16,
    staging_dir: PathBuf,
}

impl BinarySender {
    /// Validates the sender binary path up front so a misconfiguration
    /// aborts the run before any check command executes.
    pub fn new(binary: PathBuf, server: String, port: u16) -> Result<Self> {
        if !binary.is_file() {
            return Err(SenderError::BinaryNotFound {
                path: binary.display().to_string(),
            });
        }
        Ok(Self {
            binary,
            server,
            port,
            staging_dir: std::env::temp_dir(),
        })
    }

    /// Overrides the staging directory (defaults to the system temp dir).
    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = dir;
        self
    }

    // Timestamp plus random suffix makes a collision between overlapping
    // runs unlikely, not impossible.
    fn staging_path(&self) -> PathBuf {
        let suffix: u32 = rand::thread_rng().gen();
        self.staging_dir
            .join(format!("multicheck.{}.{suffix:08x}", Utc::now().timestamp()))
    }

    async fn invoke(&self, hostname: &str, staging: &Path) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("-z")
            .arg(&self.server)
            .arg("-p")
            .arg(self.port.to_string())
            .arg("-s")
            .arg(hostname)
            .arg("-i")
            .arg(staging)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| SenderError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.stdout.is_empty() {
            tracing::debug!(
                sender = %self.binary.display(),
                stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
                "sender output"
            );
        }
        if !output.status.success() {
            return Err(SenderError::SenderExit {
                status: output.status,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSink for BinarySender {
    async fn send(&self, hostname: &str, records: &[MetricRecord]) -> Result<()> {
        let staging = self.staging_path();

        let mut body = String::new();
        for record in records {
            body.push_str(&staging_line(record));
            body.push('\n');
        }
        std::fs::write(&staging, body).map_err(|source| SenderError::Staging {
            path: staging.display().to_string(),
            source,
        })?;

        let result = self.invoke(hostname, &staging).await;

        // The staging file is removed whether or not transmission succeeded.
        if let Err(e) = std::fs::remove_file(&staging) {
            tracing::debug!(path = %staging.display(), error = %e, "failed to remove staging file");
        }

        result
    }
}

/// Debug-mode sink: logs every record instead of transmitting.
pub struct DryRunSink;

#[async_trait]
impl RecordSink for DryRunSink {
    async fn send(&self, hostname: &str, records: &[MetricRecord]) -> Result<()> {
        for record in records {
            tracing::info!(host = hostname, line = %staging_line(record), "dry-run record");
        }
        Ok(())
    }
}
