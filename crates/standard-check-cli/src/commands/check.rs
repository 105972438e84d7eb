//! Check command implementation.

use anyhow::{bail, Context, Result};
use standard_check_core::{Analyzer, IgnoreSet, RuleBox};
use standard_check_python::PythonParser;
use standard_check_rules::rules_from_config;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config_resolver;
use crate::OutputFormat;

/// Exit status when findings were reported.
const EXIT_FINDINGS: u8 = 1;

/// Options collected from the command line.
pub struct CheckOptions {
    /// Directory to check.
    pub path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules_filter: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Ignore file overriding the configured one.
    pub ignore_file: Option<PathBuf>,
    /// Worker thread count.
    pub jobs: Option<usize>,
    /// Explicit config path.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
///
/// Returns exit code 0 when the tree is clean and 1 when findings exist.
pub fn run(opts: &CheckOptions) -> Result<ExitCode> {
    let project_dir = opts.path.as_deref().unwrap_or(Path::new("."));
    let loaded = config_resolver::load(project_dir, opts.config.as_deref())?;
    tracing::info!("Configuration: {}", loaded.origin);
    let config = loaded.config;

    let rules = select_rules(rules_from_config(&config), opts.rules_filter.as_deref())?;

    let mut builder = Analyzer::builder()
        .parser(PythonParser::new())
        .config(config)
        .excludes(opts.exclude.iter().cloned());
    if let Some(path) = &opts.path {
        builder = builder.root(path);
    }
    if let Some(file) = &opts.ignore_file {
        let ignore = IgnoreSet::from_file(file)
            .with_context(|| format!("Failed to load ignore file: {}", file.display()))?;
        builder = builder.ignore(ignore);
    }
    if let Some(jobs) = opts.jobs {
        builder = builder.parallelism(jobs);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {} with {} rules",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let report = analyzer.analyze().context("Check failed")?;

    super::output::print(&report, opts.format, analyzer.root())?;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FINDINGS))
    }
}

/// Keeps only the rules named in `filter` (names or codes, comma-separated).
fn select_rules(rules: Vec<RuleBox>, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return Ok(rules);
    };
    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    let selected: Vec<RuleBox> = rules
        .into_iter()
        .filter(|r| wanted.iter().any(|w| r.name() == *w || r.code() == *w))
        .collect();
    if selected.is_empty() {
        bail!("No known rules selected by --rules {filter:?}");
    }
    Ok(selected)
}
