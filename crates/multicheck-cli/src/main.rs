mod cli;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use multicheck_collector::matcher::LineMatcher;
use multicheck_collector::runner::CommandRunner;
use multicheck_collector::{compile_rules, extract_records, RuleApplication};
use multicheck_common::types::RunContext;
use multicheck_config::checks::ChecksConfig;
use multicheck_config::hosts::{AgentHostConfig, ServerHostConfig};
use multicheck_sender::{BinarySender, DryRunSink, RecordSink};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Exit code for usage and configuration errors.
const EXIT_CONFIG: i32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders its own usage/help/version output.
            let exits_ok = !e.use_stderr();
            let _ = e.print();
            std::process::exit(if exits_ok { 0 } else { EXIT_CONFIG });
        }
    };

    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(EXIT_CONFIG);
    }
    println!("OK");
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the immutable run context from the mode-appropriate host
/// configuration.
fn build_context(cli: &Cli) -> Result<RunContext> {
    if cli.hostname == "localhost" {
        let agent = AgentHostConfig::load(&cli.agent_config)?;
        Ok(RunContext::new(
            agent.hostname,
            agent.server,
            agent.server_port,
            cli.debug,
        ))
    } else {
        let server = ServerHostConfig::load(&cli.server_config)?;
        Ok(RunContext::new(
            cli.hostname.clone(),
            server.listen_ip,
            server.listen_port,
            cli.debug,
        ))
    }
}

async fn run(cli: Cli) -> Result<()> {
    let context = build_context(&cli)?;
    tracing::debug!(
        hostname = %context.hostname,
        server = %context.server_address,
        port = context.server_port,
        "run context resolved"
    );

    let config = ChecksConfig::load(&cli.config)
        .with_context(|| format!("loading check configuration {}", cli.config.display()))?;

    // Compile every pattern up front so a bad rule aborts before any
    // command executes.
    let mut compiled: Vec<(String, Vec<LineMatcher>)> = Vec::with_capacity(config.commands.len());
    for spec in &config.commands {
        let matchers = compile_rules(&spec.rules)
            .with_context(|| format!("in check configuration {}", cli.config.display()))?;
        compiled.push((spec.command_line.clone(), matchers));
    }

    let sink: Box<dyn RecordSink> = if context.debug {
        Box::new(DryRunSink)
    } else {
        Box::new(BinarySender::new(
            cli.sender.clone(),
            context.server_address.clone(),
            context.server_port,
        )?)
    };

    let mode = if cli.first_rule_only {
        RuleApplication::FirstOnly
    } else {
        RuleApplication::All
    };
    let runner = CommandRunner::new(cli.timeout.map(Duration::from_secs));

    // Fully sequential: each command runs, is scanned and is submitted
    // before the next one starts. Nothing inside the loop aborts the run.
    for (command_line, matchers) in &compiled {
        let command = context.substitute_hostname(command_line);
        tracing::debug!(command = %command, "running check command");

        let lines = match runner.run(&command).await {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "check command failed to run");
                continue;
            }
        };

        let records = extract_records(matchers, mode, &lines, context.timestamp);
        if records.is_empty() {
            tracing::debug!(command = %command, "no matching output");
            continue;
        }
        tracing::debug!(command = %command, count = records.len(), "extracted records");

        if let Err(e) = sink.send(&context.hostname, &records).await {
            tracing::warn!(command = %command, error = %e, "failed to submit records");
        }
    }

    Ok(())
}
