/// Errors that can occur within the extraction pipeline.
///
/// Pattern errors surface when matchers are compiled at startup, before any
/// check command runs. `Spawn` is the only error produced inside the main
/// loop, and the orchestrator logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The rule's pattern is not a valid regular expression.
    #[error("Collect: invalid pattern /{pattern}/: {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The rule's pattern does not have exactly two capture groups
    /// (discriminator and value).
    #[error("Collect: pattern /{pattern}/ has {groups} capture group(s), expected exactly 2")]
    PatternGroupCount { pattern: String, groups: usize },

    /// The shell that runs check commands could not be spawned.
    #[error("Collect: failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience `Result` alias for the extraction pipeline.
pub type Result<T> = std::result::Result<T, CollectError>;
