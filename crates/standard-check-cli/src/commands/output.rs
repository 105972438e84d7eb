//! Shared output formatting for check results.

use anyhow::Result;
use miette::GraphicalReportHandler;
use standard_check_core::{Finding, FindingDiagnostic, Report};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Print a report in the specified format.
///
/// `root` is the scan root; `pretty` output reads sources relative to it.
pub fn print(report: &Report, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Compact => print_compact(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Pretty => print_pretty(report, root),
    }
    Ok(())
}

fn print_text(report: &Report) {
    for finding in &report.findings {
        println!(
            "{} {} at {}:{}:{}",
            finding.code,
            finding.rule,
            finding.location.file.display(),
            finding.location.line,
            finding.location.column,
        );
        println!("  {}", colored_message(finding));
        if let Some(suggestion) = &finding.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(report);
}

fn colored_message(finding: &Finding) -> String {
    if finding.is_parse_error() {
        format!("\x1b[31merror\x1b[0m: {}", finding.message)
    } else {
        format!("\x1b[33mstyle\x1b[0m: {}", finding.message)
    }
}

fn print_summary(report: &Report) {
    let color = if report.is_success() {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };
    println!("{color}{}\x1b[0m", report.summary());
}

fn print_compact(report: &Report) {
    if report.is_success() {
        println!("All checks passed.");
        return;
    }
    println!("{}", report.format_compact());
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_pretty(report: &Report, root: &Path) {
    let handler = GraphicalReportHandler::new();
    let mut sources: HashMap<&PathBuf, Option<String>> = HashMap::new();

    for finding in &report.findings {
        let source = sources
            .entry(&finding.location.file)
            .or_insert_with(|| std::fs::read_to_string(root.join(&finding.location.file)).ok());

        let Some(text) = source else {
            println!("{}", finding.format());
            continue;
        };

        let diagnostic = FindingDiagnostic::new(finding, text.clone());
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &diagnostic).is_ok() {
            print!("{rendered}");
        } else {
            println!("{}", finding.format());
        }
    }
    print_summary(report);
}
