//! Ignore-file compilation: path globs and identifier exclusions.
//!
//! An ignore file holds one entry per line:
//!
//! ```text
//! # comment
//! **/.*
//! **/__pycache__
//! !sleep_for_retry
//! ```
//!
//! Lines starting with `!` exempt an identifier from every rule, by exact
//! name. All other entries are gitignore-style globs that keep files and
//! directories out of the scan. Malformed lines are skipped, never fatal.

use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Errors reading an ignore file.
#[derive(Debug, thiserror::Error)]
pub enum IgnoreError {
    /// The ignore file exists but could not be read.
    #[error("Failed to read ignore file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// A single classified ignore-file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// Glob excluding files or directories from the scan.
    PathGlob(String),
    /// Identifier exempted from every rule.
    IdentifierExclusion(String),
}

impl IgnoreRule {
    /// Classifies one ignore-file line.
    ///
    /// Returns `None` for blank lines, comments and `!` entries that do not
    /// name an identifier.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if let Some(name) = line.strip_prefix('!') {
            let name = name.trim();
            if is_identifier(name) {
                return Some(Self::IdentifierExclusion(name.to_string()));
            }
            warn!("Skipping malformed identifier exclusion: {line:?}");
            return None;
        }
        Some(Self::PathGlob(line.to_string()))
    }
}

/// A compiled gitignore-style glob.
#[derive(Debug, Clone)]
pub struct PathGlob {
    source: String,
    pattern: Pattern,
    /// Compiled remainder of a `**/` pattern, matched at the root.
    root_pattern: Option<Pattern>,
    anchored: bool,
    dir_only: bool,
    basename: bool,
}

impl PathGlob {
    /// Compiles a glob.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob syntax is invalid.
    pub fn new(source: &str) -> Result<Self, glob::PatternError> {
        let mut body = source;
        let dir_only = body.len() > 1 && body.ends_with('/');
        if dir_only {
            body = &body[..body.len() - 1];
        }
        let anchored = body.starts_with('/');
        if anchored {
            body = &body[1..];
        }
        let basename = !body.contains('/');
        let root_pattern = body.strip_prefix("**/").map(Pattern::new).transpose()?;

        Ok(Self {
            source: source.to_string(),
            pattern: Pattern::new(body)?,
            root_pattern,
            anchored,
            dir_only,
            basename,
        })
    }

    /// The glob as written in the ignore file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches a `/`-separated path relative to the scan root.
    #[must_use]
    pub fn matches(&self, relative: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.basename && !self.anchored {
            let name = relative.rsplit('/').next().unwrap_or(relative);
            return self.pattern.matches_with(name, MATCH_OPTIONS);
        }
        self.pattern.matches_with(relative, MATCH_OPTIONS)
            || self
                .root_pattern
                .as_ref()
                .is_some_and(|p| p.matches_with(relative, MATCH_OPTIONS))
    }
}

impl PartialEq for PathGlob {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PathGlob {}

/// Compiled ignore file: path globs plus identifier exclusions.
///
/// Built once per run and shared read-only by every worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    globs: Vec<PathGlob>,
    identifiers: BTreeSet<String>,
}

impl IgnoreSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles ignore-file text.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut set = Self::new();
        for rule in content.lines().filter_map(IgnoreRule::parse_line) {
            set.add(rule);
        }
        set
    }

    /// Loads an ignore file. A missing file yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, IgnoreError> {
        if !path.exists() {
            debug!("No ignore file at {}", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|e| IgnoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&content))
    }

    /// Adds one classified entry. Invalid globs are skipped with a warning.
    pub fn add(&mut self, rule: IgnoreRule) {
        match rule {
            IgnoreRule::IdentifierExclusion(name) => {
                self.identifiers.insert(name);
            }
            IgnoreRule::PathGlob(source) => match PathGlob::new(&source) {
                Ok(glob) => {
                    if !self.globs.contains(&glob) {
                        self.globs.push(glob);
                    }
                }
                Err(e) => warn!("Skipping invalid glob {source:?}: {e}"),
            },
        }
    }

    /// Adds extra path globs, e.g. from configuration.
    pub fn extend_globs<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.add(IgnoreRule::PathGlob(pattern.into()));
        }
    }

    /// Exact, case-sensitive lookup of an excluded identifier.
    #[must_use]
    pub fn is_excluded_identifier(&self, name: &str) -> bool {
        self.identifiers.contains(name)
    }

    /// Returns true if the path, or any directory above it, matches a glob.
    ///
    /// `relative` is relative to the scan root.
    #[must_use]
    pub fn is_path_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if self.globs.is_empty() {
            return false;
        }
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        for end in 1..=parts.len() {
            let prefix = parts[..end].join("/");
            let prefix_is_dir = end < parts.len() || is_dir;
            if self.globs.iter().any(|g| g.matches(&prefix, prefix_is_dir)) {
                return true;
            }
        }
        false
    }

    /// Compiled path globs, in file order.
    #[must_use]
    pub fn globs(&self) -> &[PathGlob] {
        &self.globs
    }

    /// Excluded identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    /// All entries as classified rules: globs first, then identifiers.
    #[must_use]
    pub fn rules(&self) -> Vec<IgnoreRule> {
        self.globs
            .iter()
            .map(|g| IgnoreRule::PathGlob(g.as_str().to_string()))
            .chain(
                self.identifiers
                    .iter()
                    .map(|n| IgnoreRule::IdentifierExclusion(n.clone())),
            )
            .collect()
    }

    /// Serializes back to ignore-file text.
    #[must_use]
    pub fn to_ignore_file(&self) -> String {
        let mut out = String::new();
        for rule in self.rules() {
            match rule {
                IgnoreRule::PathGlob(p) => out.push_str(&p),
                IgnoreRule::IdentifierExclusion(n) => {
                    out.push('!');
                    out.push_str(&n);
                }
            }
            out.push('\n');
        }
        out
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
