//! Core types for findings and run results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::model::Span;

/// Rule code used for files that could not be read or parsed.
pub const PARSE_ERROR_CODE: &str = "SC000";

/// Rule name used for files that could not be read or parsed.
pub const PARSE_ERROR_NAME: &str = "parse-error";

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the scan root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location covering a declaration span.
    #[must_use]
    pub fn from_span(file: PathBuf, span: Span) -> Self {
        Self::new(file, span.line, span.column).with_span(span.offset, span.length)
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A hint on how to resolve a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One reported rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "SC004").
    pub code: String,
    /// Rule name (e.g., "function-docstring").
    pub rule: String,
    /// Identifier the finding is about.
    pub subject: String,
    /// Primary location of the finding.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        subject: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            subject: subject.into(),
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Creates the single record emitted for a file that failed to parse.
    #[must_use]
    pub fn parse_error(file: PathBuf, line: usize, column: usize, message: impl Into<String>) -> Self {
        let subject = file.display().to_string();
        Self::new(
            PARSE_ERROR_CODE,
            PARSE_ERROR_NAME,
            subject,
            Location::new(file, line, column),
            message,
        )
    }

    /// Adds a suggestion to this finding.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Returns true if this finding records a parse failure.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.code == PARSE_ERROR_CODE
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}", self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }

    /// Formats the finding the way the original checker printed it:
    /// `path:line: message`.
    #[must_use]
    pub fn format_compact(&self) -> String {
        format!(
            "{}:{}: {}",
            self.location.file.display(),
            self.location.line,
            self.message
        )
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.code,
            self.message
        )
    }
}

/// A finding bound to its source text, for rich rendering with miette.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl FindingDiagnostic {
    /// Binds a finding to the text of the file it points into.
    #[must_use]
    pub fn new(finding: &Finding, source: String) -> Self {
        let name = finding.location.file.display().to_string();
        // Spans past the end of the text would make miette refuse to render.
        let offset = finding.location.offset.min(source.len());
        let length = finding.location.length.min(source.len() - offset);
        Self {
            message: format!("[{}] {}", finding.code, finding.message),
            help: finding.suggestion.as_ref().map(|s| s.message.clone()),
            source_code: NamedSource::new(name, source),
            span: SourceSpan::from((offset, length)),
            label_message: finding.rule.clone(),
        }
    }
}

/// Sorts findings by file, line, rule code, then column and message.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.code.cmp(&b.code))
            .then(a.location.column.cmp(&b.location.column))
            .then(a.message.cmp(&b.message))
    });
}

/// Result of a check run: every finding across all files, in a stable order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Report {
    /// All findings, sorted by [`Report::sort`].
    pub findings: Vec<Finding>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files that failed to parse.
    pub parse_failures: usize,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the run found nothing to report.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.findings.is_empty()
    }

    /// Sorts findings by file, line, rule code, then column and message.
    pub fn sort(&mut self) {
        sort_findings(&mut self.findings);
    }

    /// Counts findings per rule code.
    #[must_use]
    pub fn count_by_rule(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.code.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns findings produced by the given rule code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.code == code).collect()
    }

    /// Renders every finding in compact form, one per line.
    #[must_use]
    pub fn format_compact(&self) -> String {
        self.findings
            .iter()
            .map(Finding::format_compact)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        for finding in &self.findings {
            println!("{}", finding.format());
        }
        println!("{}", self.summary());
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("All checks passed ({} file(s))", self.files_checked)
        } else {
            format!(
                "Found {} problem(s) in {} file(s), {} file(s) failed to parse",
                self.findings.len(),
                self.files_checked,
                self.parse_failures
            )
        }
    }
}
