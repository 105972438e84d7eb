//! # standard-check-core
//!
//! Core framework for checking Python sources against a house style.
//!
//! This crate is language-agnostic glue between a parser and a set of rules:
//!
//! - [`SourceParser`] turns file text into a list of [`Declaration`]s
//! - [`Rule`] inspects one declaration at a time and returns [`Finding`]s
//! - [`IgnoreSet`] prunes paths from the walk and exempts identifiers
//! - [`Analyzer`] walks a tree in parallel and collects a sorted [`Report`]
//!
//! ## Example
//!
//! ```ignore
//! use standard_check_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(PythonParser::new())
//!     .rule(FunctionDocstring::new())
//!     .build()?;
//!
//! let report = analyzer.analyze()?;
//! report.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod model;
mod patterns;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, DEFAULT_IGNORE_FILE};
pub use context::FileContext;
pub use model::{
    has_decorator, is_section_header, ArgKind, Argument, Class, DeclKind, Declaration, DefaultShape,
    DefaultValue, DocArg, Docstring, Function, ParseFailure, ParseOutcome, Scope, SourceFile,
    Span, Variable,
};
pub use patterns::{IgnoreError, IgnoreRule, IgnoreSet, PathGlob};
pub use rule::{Rule, RuleBox, SourceParser};
pub use types::{
    sort_findings, Finding, FindingDiagnostic, Location, Report, Suggestion, PARSE_ERROR_CODE,
    PARSE_ERROR_NAME,
};
