//! Thread safety argument checker.
//!
//! Judges each pattern in the built-in catalog against an ordered rule table
//! and prints one verdict per pattern, in catalog order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use checker::catalog::list_patterns;
use checker::check::{EvalMode, check_catalog};
use checker::core::rules::{find_rule, rule_summary, rules};
use checker::core::types::{Classification, RuleId};
use checker::exit_codes;
use checker::io::config::{CheckerConfig, DEFAULT_CONFIG_FILE, load_config};
use checker::logging;
use checker::report::{ReportFormat, render, summarize};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "checker",
    version,
    about = "Rule-based checker for thread safety arguments"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the catalog and print one verdict per pattern.
    Check {
        /// Report format (overrides the config file).
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        /// Evaluate patterns in parallel; output order is unchanged.
        #[arg(long)]
        parallel: bool,
        /// Only report these pattern ids (repeatable).
        #[arg(short, long = "pattern", value_name = "ID")]
        patterns: Vec<String>,
        /// Config file path. Defaults to `checker.toml`, ignored if unreadable.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Print the id and title of every catalog pattern.
    List,
    /// Print the rule table in priority order.
    Rules,
    /// Describe one rule.
    Explain {
        /// Rule name, e.g. `ShallowImmutability`.
        rule: String,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            format,
            parallel,
            patterns,
            config,
        } => {
            let (cfg, config_path) = resolve_config(config)?;
            cmd_check(merge_flags(cfg, format, parallel, patterns), &config_path)
        }
        Command::List => cmd_list(),
        Command::Rules => cmd_rules(),
        Command::Explain { rule } => cmd_explain(&rule),
    }
}

/// Load the config named by `--config`, or the default file if present.
///
/// An explicit path must load cleanly. A broken default file is logged and
/// ignored so a stray `checker.toml` cannot fail the check.
fn resolve_config(explicit: Option<PathBuf>) -> Result<(CheckerConfig, PathBuf)> {
    if let Some(path) = explicit {
        let cfg = load_config(&path)?;
        return Ok((cfg, path));
    }
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let cfg = load_config(&path).unwrap_or_else(|err| {
        let reason = format!("{err:#}");
        warn!(config = %path.display(), error = %reason, "ignoring default config");
        CheckerConfig::default()
    });
    Ok((cfg, path))
}

/// Command-line flags take precedence over config values.
fn merge_flags(
    mut cfg: CheckerConfig,
    format: Option<ReportFormat>,
    parallel: bool,
    patterns: Vec<String>,
) -> CheckerConfig {
    if let Some(format) = format {
        cfg.format = format;
    }
    cfg.parallel |= parallel;
    if !patterns.is_empty() {
        cfg.patterns = patterns;
    }
    cfg
}

fn cmd_check(cfg: CheckerConfig, config_path: &Path) -> Result<()> {
    info!(config = %config_path.display(), ?cfg, "checking catalog");
    let mode = if cfg.parallel {
        EvalMode::Parallel
    } else {
        EvalMode::Sequential
    };
    let assessments = check_catalog(&cfg.patterns, mode)?;
    let report = render(&assessments, cfg.format)?;
    print!("{report}");

    let summary = summarize(&assessments);
    info!(
        valid = summary.valid,
        incomplete = summary.incomplete,
        unsound = summary.unsound,
        "catalog checked"
    );
    Ok(())
}

fn cmd_list() -> Result<()> {
    for pattern in list_patterns() {
        println!("{} {}", pattern.id, pattern.title);
    }
    Ok(())
}

fn cmd_rules() -> Result<()> {
    for (priority, rule) in rules().iter().enumerate() {
        println!(
            "{} {} {}: {}",
            priority + 1,
            rule.id,
            rule.classification,
            rule.summary
        );
    }
    println!(
        "- {} {}: {}",
        RuleId::UnclassifiedPattern,
        Classification::Incomplete,
        rule_summary(RuleId::UnclassifiedPattern)
    );
    Ok(())
}

fn cmd_explain(name: &str) -> Result<()> {
    let id = RuleId::parse(name).with_context(|| format!("unknown rule '{name}'"))?;
    let classification =
        find_rule(id).map_or(Classification::Incomplete, |rule| rule.classification);
    println!("{id} ({classification}): {}", rule_summary(id));
    Ok(())
}
