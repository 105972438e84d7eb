//! Core analyzer for orchestrating check runs.

use crate::config::Config;
use crate::context::FileContext;
use crate::model::SourceFile;
use crate::patterns::{IgnoreError, IgnoreSet};
use crate::rule::{Rule, RuleBox, SourceParser};
use crate::types::{sort_findings, Finding, Report};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The scan root does not exist or is not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but cannot be listed.
    #[error("Cannot read root directory {}: {source}", path.display())]
    RootUnreadable {
        /// Root that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// IO error resolving paths.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No source parser was registered.
    #[error("No source parser configured")]
    MissingParser,

    /// The ignore file could not be read.
    #[error(transparent)]
    Ignore(#[from] IgnoreError),

    /// The worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    rules: Vec<RuleBox>,
    ignore: Option<IgnoreSet>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    parallelism: Option<usize>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser that turns files into declarations.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Uses an already compiled ignore set instead of reading the ignore file.
    #[must_use]
    pub fn ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Bounds the number of worker threads (default: rayon's global pool).
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builds the analyzer.
    ///
    /// Without an explicit [`AnalyzerBuilder::ignore`] set, the ignore file
    /// named in the configuration is read from the root.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, the working directory cannot be
    /// resolved, or the ignore file exists but cannot be read.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut ignore = match self.ignore {
            Some(set) => set,
            None => IgnoreSet::from_file(&root.join(&config.analyzer.ignore_file))?,
        };
        ignore.extend_globs(config.analyzer.exclude.iter().cloned());
        ignore.extend_globs(self.exclude_patterns);

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .collect();

        let extensions = if config.analyzer.extensions.is_empty() {
            parser.extensions().iter().map(|e| (*e).to_string()).collect()
        } else {
            config.analyzer.extensions.clone()
        };

        Ok(Analyzer {
            root,
            parser,
            rules,
            ignore,
            extensions,
            respect_gitignore: config.analyzer.respect_gitignore,
            parallelism: self.parallelism.or(config.analyzer.parallelism),
        })
    }
}

/// The main analyzer: walks the root, parses files and runs every rule.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    rules: Vec<RuleBox>,
    ignore: IgnoreSet,
    extensions: Vec<String>,
    respect_gitignore: bool,
    parallelism: Option<usize>,
}

/// Findings for one file plus whether it failed to parse.
struct FileOutcome {
    findings: Vec<Finding>,
    parse_failed: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the sorted report.
    ///
    /// # Errors
    ///
    /// Returns an error only when the scan itself is impossible: the root is
    /// missing or unreadable, or the worker pool cannot start. Problems with
    /// individual files become findings.
    pub fn analyze(&self) -> Result<Report, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let outcomes = match self.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(|| self.analyze_files(&files))
            }
            None => self.analyze_files(&files),
        };

        let mut report = Report::new();
        for outcome in outcomes {
            report.files_checked += 1;
            if outcome.parse_failed {
                report.parse_failures += 1;
            }
            report.findings.extend(outcome.findings);
        }
        report.sort();

        info!(
            "Analysis complete: {} findings in {} files",
            report.findings.len(),
            report.files_checked
        );

        Ok(report)
    }

    /// Parses and checks text as if it were the file at `relative` under the
    /// root. Findings come back sorted.
    #[must_use]
    pub fn check_text(&self, relative: &Path, text: &str) -> Vec<Finding> {
        let absolute = self.root.join(relative);
        let ctx = FileContext::new(&absolute, &self.root);
        let file = SourceFile::new(
            ctx.relative_path.clone(),
            text.to_string(),
            self.parser.parse(text),
        );
        self.evaluate(&ctx, &file)
    }

    /// Runs every rule over a parsed file.
    ///
    /// A failed parse yields exactly one parse-error finding. Declarations
    /// whose names are excluded are never shown to a rule.
    #[must_use]
    pub fn evaluate(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Finding> {
        if let Some(failure) = file.failure() {
            return vec![Finding::parse_error(
                ctx.relative_path.clone(),
                failure.line,
                failure.column,
                format!("Failed to parse file: {}", failure.message),
            )];
        }

        let mut findings = Vec::new();
        for decl in file.declarations() {
            let Some(decl) = decl.clone().without_excluded(&self.ignore) else {
                debug!("Skipping excluded identifier: {}", decl.name());
                continue;
            };
            for rule in &self.rules {
                findings.extend(rule.check(ctx, &decl));
            }
        }
        sort_findings(&mut findings);
        findings
    }

    fn analyze_files(&self, files: &[PathBuf]) -> Vec<FileOutcome> {
        files.par_iter().map(|path| self.analyze_file(path)).collect()
    }

    fn analyze_file(&self, path: &Path) -> FileOutcome {
        debug!("Analyzing: {}", path.display());
        let ctx = FileContext::new(path, &self.root);

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return FileOutcome {
                    findings: vec![Finding::parse_error(
                        ctx.relative_path.clone(),
                        1,
                        1,
                        format!("Failed to read file: {e}"),
                    )],
                    parse_failed: true,
                };
            }
        };

        let outcome = self.parser.parse(&text);
        let file = SourceFile::new(ctx.relative_path.clone(), text, outcome);
        if let Some(failure) = file.failure() {
            warn!(
                "Failed to parse {}:{}: {}",
                path.display(),
                failure.line,
                failure.message
            );
        }

        FileOutcome {
            findings: self.evaluate(&ctx, &file),
            parse_failed: file.failure().is_some(),
        }
    }

    /// Discovers candidate files, pruning ignored directories.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if !self.root.is_dir() {
            return Err(AnalyzerError::RootNotFound(self.root.clone()));
        }
        std::fs::read_dir(&self.root).map_err(|e| AnalyzerError::RootUnreadable {
            path: self.root.clone(),
            source: e,
        })?;

        let root = self.root.clone();
        let ignore_set = self.ignore.clone();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .filter_entry(move |entry| {
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                if relative.as_os_str().is_empty() {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let excluded = ignore_set.is_path_ignored(relative, is_dir);
                if excluded {
                    debug!("Excluding: {}", relative.display());
                }
                !excluded
            });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.has_checked_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn has_checked_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}
