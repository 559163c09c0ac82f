/// Errors that can occur while staging or transmitting records.
///
/// `BinaryNotFound` is raised at startup and is fatal; everything else
/// happens inside the main loop, where the orchestrator logs the failure
/// and continues with the next command.
#[derive(Debug, thiserror::Error)]
pub enum SenderError {
    /// The configured sender binary does not exist or is not a file.
    #[error("Sender: binary not found at {path}")]
    BinaryNotFound { path: String },

    /// Writing the staging file failed.
    #[error("Sender: failed to write staging file {path}: {source}")]
    Staging {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The sender binary could not be spawned.
    #[error("Sender: failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The sender binary ran but reported failure.
    #[error("Sender: sender exited with {status}")]
    SenderExit { status: std::process::ExitStatus },
}

/// Convenience `Result` alias for sender operations.
pub type Result<T> = std::result::Result<T, SenderError>;
