//! Parser for the multicheck check configuration.
//!
//! The format is line-oriented:
//!
//! ```text
//! # comment
//! command = rec_control get-all
//! item = /(.*)[\=\:\s]+([\d.]+)/, multicheck.powerdns.recursor
//! ```
//!
//! A `command =` line starts a new block; each following `item =` line adds
//! a rule to it. The regex between the `/…/` delimiters is captured verbatim
//! and compiled later by the collector, so escapes like `\=` pass through
//! untouched.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, Result};

static COMMAND_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^command\s*=\s*(.+)$").expect("COMMAND_LINE is a valid regex pattern")
});

// The pattern group is greedy, so a `/` inside the rule's regex is legal:
// the last `/` before the comma closes the delimiters.
static ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^item\s*=\s*/(.*)/\s*,\s*([A-Za-z0-9._-]+)$")
        .expect("ITEM_LINE is a valid regex pattern")
});

/// One extraction rule: a regex with exactly two capture groups and the
/// item prefix its matches are filed under.
///
/// Group 1 of the pattern yields the discriminator (the bracketed sub-key),
/// group 2 the value. The group count is enforced when the collector
/// compiles the pattern, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub item_prefix: String,
}

/// One command block: the shell command line (possibly containing the
/// `@HOSTNAME@` placeholder) and its rules, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command_line: String,
    pub rules: Vec<Rule>,
}

/// The parsed check configuration.
///
/// Commands are kept as a list in declaration order; callers must not treat
/// the order as a contract.
#[derive(Debug, Clone, Default)]
pub struct ChecksConfig {
    pub commands: Vec<CommandSpec>,
}

impl ChecksConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::read_file(path)?;
        Self::parse(&text)
    }

    /// Parses the full text of a check configuration.
    pub fn parse(text: &str) -> Result<Self> {
        let mut commands: Vec<CommandSpec> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(caps) = COMMAND_LINE.captures(line) {
                let command_line = caps[1].trim().to_string();
                if !seen.insert(command_line.clone()) {
                    return Err(ConfigError::DuplicateCommand {
                        line_no,
                        command: command_line,
                    });
                }
                commands.push(CommandSpec {
                    command_line,
                    rules: Vec::new(),
                });
            } else if let Some(caps) = ITEM_LINE.captures(line) {
                let rule = Rule {
                    pattern: caps[1].to_string(),
                    item_prefix: caps[2].to_string(),
                };
                match commands.last_mut() {
                    Some(spec) => spec.rules.push(rule),
                    None => {
                        return Err(ConfigError::OrphanItem {
                            line_no,
                            line: raw.to_string(),
                        })
                    }
                }
            } else {
                return Err(ConfigError::Syntax {
                    line_no,
                    line: raw.to_string(),
                });
            }
        }

        if commands.is_empty() || commands.iter().all(|c| c.rules.is_empty()) {
            return Err(ConfigError::Empty);
        }
        Ok(Self { commands })
    }
}
