//! The extraction pipeline of the multicheck bridge.
//!
//! For each configured command, [`runner::CommandRunner`] captures the
//! command's stdout, one or more [`matcher::LineMatcher`]s scan every line
//! for their two capture groups, and [`batch::build_records`] turns the
//! matched discriminator → value maps into timestamped [`MetricRecord`]s
//! ready for submission.

pub mod batch;
pub mod error;
pub mod matcher;
pub mod runner;

#[cfg(test)]
mod tests;

use multicheck_common::types::MetricRecord;
use multicheck_config::checks::Rule;

use error::Result;
use matcher::LineMatcher;

/// How a command's declared rules are applied to its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleApplication {
    /// Every declared rule scans every line (the default).
    All,
    /// Only the first declared rule is applied, reproducing the historical
    /// multichecker behavior.
    FirstOnly,
}

/// Compiles every declared rule of a command.
///
/// All patterns are validated regardless of the application mode, so a bad
/// pattern aborts the run at startup even when `FirstOnly` would never use
/// it.
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<LineMatcher>> {
    rules.iter().map(LineMatcher::compile).collect()
}

/// Scans a command's output with its matchers and builds the record batch.
///
/// Results are unioned per rule's item prefix, with last-match-wins
/// semantics per (rule, discriminator) pair.
pub fn extract_records(
    matchers: &[LineMatcher],
    mode: RuleApplication,
    lines: &[String],
    timestamp: i64,
) -> Vec<MetricRecord> {
    let applicable = match mode {
        RuleApplication::All => matchers,
        RuleApplication::FirstOnly => &matchers[..matchers.len().min(1)],
    };

    let mut records = Vec::new();
    for matcher in applicable {
        let values = matcher.scan_lines(lines);
        records.extend(batch::build_records(matcher.item_prefix(), &values, timestamp));
    }
    records
}
