/// Errors that can occur while loading configuration.
///
/// All of these are fatal at startup: the run aborts before any check
/// command executes.
///
/// # Examples
///
/// ```rust
/// use multicheck_config::ConfigError;
///
/// let err = ConfigError::Syntax {
///     line_no: 4,
///     line: "foo = bar".to_string(),
/// };
/// assert!(err.to_string().contains("foo = bar"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("Config: cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The agent host configuration does not define `Hostname`.
    #[error("Config: agent configuration {path} does not define Hostname")]
    MissingHostname { path: String },

    /// A port value in a host configuration is not a valid TCP port.
    #[error("Config: invalid port value '{value}'")]
    InvalidPort { value: String },

    /// The same command line was declared twice in one check configuration.
    #[error("Config: line {line_no}: duplicate command definition '{command}'")]
    DuplicateCommand { line_no: usize, command: String },

    /// An `item =` rule appeared before any `command =` declaration.
    #[error("Config: line {line_no}: item rule before any command: {line}")]
    OrphanItem { line_no: usize, line: String },

    /// A non-blank, non-comment line matched neither grammar.
    #[error("Config: line {line_no}: cannot parse line: {line}")]
    Syntax { line_no: usize, line: String },

    /// The check configuration declares nothing to check.
    #[error("Config: no command definitions with item rules found")]
    Empty,
}

/// Convenience `Result` alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
