//! Configuration loading for the multicheck bridge.
//!
//! Two unrelated inputs are parsed here: the multicheck check configuration
//! (command definitions paired with regex/item rules, see [`checks`]) and the
//! agent/server host configuration files that supply the monitoring server's
//! connection parameters (see [`hosts`]).

pub mod checks;
pub mod error;
pub mod hosts;

pub use error::{ConfigError, Result};

use std::path::Path;

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
