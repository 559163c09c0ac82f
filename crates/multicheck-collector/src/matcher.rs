use std::collections::HashMap;

use multicheck_config::checks::Rule;
use regex::Regex;

use crate::error::{CollectError, Result};

/// A compiled item rule, ready to scan command output.
///
/// The pattern is applied as a search, not a full match. Group 1 yields the
/// discriminator, group 2 the value. Both are trimmed of surrounding
/// whitespace after capture: the common `(.*)[\=\:\s]+([\d.]+)` idiom has a
/// greedy first group that would otherwise drag separator whitespace into
/// the item key.
#[derive(Debug)]
pub struct LineMatcher {
    regex: Regex,
    item_prefix: String,
}

impl LineMatcher {
    /// Compiles a rule's pattern, enforcing the two-capture-group contract.
    pub fn compile(rule: &Rule) -> Result<Self> {
        let regex = Regex::new(&rule.pattern).map_err(|source| CollectError::PatternCompile {
            pattern: rule.pattern.clone(),
            source,
        })?;
        // captures_len() counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups != 2 {
            return Err(CollectError::PatternGroupCount {
                pattern: rule.pattern.clone(),
                groups,
            });
        }
        Ok(Self {
            regex,
            item_prefix: rule.item_prefix.clone(),
        })
    }

    pub fn item_prefix(&self) -> &str {
        &self.item_prefix
    }

    /// Scans one output line, returning `(discriminator, value)` on match.
    /// Lines that do not match are skipped silently.
    pub fn scan(&self, line: &str) -> Option<(String, String)> {
        let caps = self.regex.captures(line)?;
        let discriminator = caps.get(1)?.as_str().trim().to_string();
        let value = caps.get(2)?.as_str().trim().to_string();
        Some((discriminator, value))
    }

    /// Scans every line of a command's output into a discriminator → value
    /// map. When several lines yield the same discriminator, the last match
    /// wins; extraction is idempotent by discriminator, not by occurrence
    /// count.
    pub fn scan_lines(&self, lines: &[String]) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for line in lines {
            if let Some((discriminator, value)) = self.scan(line) {
                values.insert(discriminator, value);
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, prefix: &str) -> Rule {
        Rule {
            pattern: pattern.to_string(),
            item_prefix: prefix.to_string(),
        }
    }

    #[test]
    fn extracts_discriminator_and_value() {
        let matcher = LineMatcher::compile(&rule(
            r"(.*)[\=\:\s]+([\d.]+)",
            "multicheck.powerdns.recursor",
        ))
        .unwrap();
        let (disc, value) = matcher.scan("packetcache-hits        52002").unwrap();
        assert_eq!(disc, "packetcache-hits");
        assert_eq!(value, "52002");
    }

    #[test]
    fn non_matching_line_yields_nothing() {
        let matcher =
            LineMatcher::compile(&rule(r"(.*)[\=\:\s]+([\d.]+)", "p")).unwrap();
        assert!(matcher.scan("garbage line").is_none());
    }

    #[test]
    fn values_are_carried_as_text() {
        let matcher = LineMatcher::compile(&rule(r"(\S+)=(\S+)", "p")).unwrap();
        let (_, value) = matcher.scan("state=running").unwrap();
        assert_eq!(value, "running");
    }

    #[test]
    fn single_capture_group_is_rejected() {
        let err = LineMatcher::compile(&rule(r"Uptime: (\d+)", "host.uptime")).unwrap_err();
        match err {
            CollectError::PatternGroupCount { groups, .. } => assert_eq!(groups, 1),
            other => panic!("expected PatternGroupCount, got {other:?}"),
        }
    }

    #[test]
    fn three_capture_groups_are_rejected() {
        assert!(matches!(
            LineMatcher::compile(&rule(r"(a)(b)(c)", "p")),
            Err(CollectError::PatternGroupCount { groups: 3, .. })
        ));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(matches!(
            LineMatcher::compile(&rule(r"([unclosed", "p")),
            Err(CollectError::PatternCompile { .. })
        ));
    }

    #[test]
    fn last_match_wins_per_discriminator() {
        let matcher = LineMatcher::compile(&rule(r"(\S+)\s+(\d+)", "p")).unwrap();
        let lines = vec![
            "hits 100".to_string(),
            "misses 5".to_string(),
            "hits 200".to_string(),
        ];
        let values = matcher.scan_lines(&lines);
        assert_eq!(values.len(), 2);
        assert_eq!(values["hits"], "200");
        assert_eq!(values["misses"], "5");
    }

    #[test]
    fn scanning_is_idempotent() {
        let matcher = LineMatcher::compile(&rule(r"(\S+)\s+(\d+)", "p")).unwrap();
        let lines = vec!["hits 100".to_string(), "misses 5".to_string()];
        assert_eq!(matcher.scan_lines(&lines), matcher.scan_lines(&lines));
    }
}
