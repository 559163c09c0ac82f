use std::time::Duration;

use multicheck_config::checks::{ChecksConfig, Rule};

use crate::runner::CommandRunner;
use crate::{compile_rules, extract_records, RuleApplication};

fn rule(pattern: &str, prefix: &str) -> Rule {
    Rule {
        pattern: pattern.to_string(),
        item_prefix: prefix.to_string(),
    }
}

#[tokio::test]
async fn runner_captures_stdout_lines_in_order() {
    let runner = CommandRunner::new(None);
    let lines = runner.run("printf 'one\\ntwo\\nthree\\n'").await.unwrap();
    assert_eq!(lines, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn runner_strips_trailing_newline_only() {
    let runner = CommandRunner::new(None);
    let lines = runner.run("printf 'a b \\n'").await.unwrap();
    assert_eq!(lines, vec!["a b "]);
}

#[tokio::test]
async fn non_zero_exit_still_yields_output() {
    let runner = CommandRunner::new(None);
    let lines = runner.run("echo partial; exit 2").await.unwrap();
    assert_eq!(lines, vec!["partial"]);
}

#[tokio::test]
async fn empty_output_yields_no_lines() {
    let runner = CommandRunner::new(None);
    let lines = runner.run("true").await.unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
async fn timed_out_command_yields_no_lines() {
    let runner = CommandRunner::new(Some(Duration::from_millis(200)));
    let lines = runner.run("sleep 5; echo late").await.unwrap();
    assert!(lines.is_empty());
}

#[test]
fn all_rules_are_applied_by_default() {
    let matchers = compile_rules(&[
        rule(r"^(hits)\s+(\d+)$", "cache"),
        rule(r"^misses\s+(\d+)\s+ratio\s+([\d.]+)$", "cache.miss-ratio"),
    ])
    .unwrap();
    let lines = vec!["hits 100".to_string(), "misses 5 ratio 0.05".to_string()];

    let records = extract_records(&matchers, RuleApplication::All, &lines, 42);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].item_key, "cache[hits]");
    assert_eq!(records[0].value, "100");
    assert_eq!(records[1].item_key, "cache.miss-ratio[5]");
    assert_eq!(records[1].value, "0.05");
}

#[test]
fn first_rule_only_reproduces_historical_behavior() {
    let matchers = compile_rules(&[
        rule(r"^(hits)\s+(\d+)$", "cache"),
        rule(r"^misses\s+(\d+)\s+ratio\s+([\d.]+)$", "cache.miss-ratio"),
    ])
    .unwrap();
    let lines = vec!["hits 100".to_string(), "misses 5 ratio 0.05".to_string()];

    let records = extract_records(&matchers, RuleApplication::FirstOnly, &lines, 42);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item_key, "cache[hits]");
}

#[test]
fn bad_pattern_fails_compilation_even_when_unused() {
    let result = compile_rules(&[
        rule(r"(\S+)\s+(\d+)", "p"),
        rule(r"only one (group)", "q"),
    ]);
    assert!(result.is_err());
}

#[test]
fn extraction_is_idempotent_over_identical_output() {
    let matchers = compile_rules(&[rule(r"(\S+)\s+(\d+)", "p")]).unwrap();
    let lines = vec!["hits 100".to_string(), "hits 200".to_string()];

    let first = extract_records(&matchers, RuleApplication::All, &lines, 42);
    let second = extract_records(&matchers, RuleApplication::All, &lines, 42);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].value, "200");
}

#[tokio::test]
async fn end_to_end_extraction_from_config_text() {
    let config = ChecksConfig::parse(
        "command = printf 'packetcache-hits        52002\\n'\nitem = /(.*)[\\=\\:\\s]+([\\d.]+)/, multicheck.powerdns.recursor\n",
    )
    .unwrap();
    let spec = &config.commands[0];

    let matchers = compile_rules(&spec.rules).unwrap();
    let runner = CommandRunner::new(None);
    let lines = runner.run(&spec.command_line).await.unwrap();
    let records = extract_records(&matchers, RuleApplication::All, &lines, 1_700_000_000);

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].item_key,
        "multicheck.powerdns.recursor[packetcache-hits]"
    );
    assert_eq!(records[0].value, "52002");
}
