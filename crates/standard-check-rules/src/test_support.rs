//! Helpers for rule unit tests.

use standard_check_core::{Declaration, FileContext, Finding, ParseOutcome, Rule, SourceParser};
use standard_check_python::PythonParser;
use std::path::Path;

pub(crate) fn parse(src: &str) -> Vec<Declaration> {
    match PythonParser::new().parse(src) {
        ParseOutcome::Parsed(decls) => decls,
        ParseOutcome::Failed(f) => panic!("test source failed to parse: {f:?}"),
    }
}

/// Runs one rule over every declaration in `src`.
pub(crate) fn check_source(rule: &dyn Rule, src: &str) -> Vec<Finding> {
    let ctx = FileContext::new(Path::new("/repo/test.py"), Path::new("/repo"));
    parse(src)
        .iter()
        .flat_map(|decl| rule.check(&ctx, decl))
        .collect()
}

pub(crate) fn messages(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.message.as_str()).collect()
}
