//! Integration test: the full rule set end-to-end via Analyzer.
//!
//! Each test writes a small Python tree into a temporary directory and runs
//! the analyzer over it with the tree-sitter parser and every built-in rule.

use standard_check_core::{Analyzer, AnalyzerError, Config, Finding, Report};
use standard_check_python::PythonParser;
use standard_check_rules::{all_rules, rules_from_config};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture has a parent")).expect("create dirs");
    fs::write(path, content).expect("write fixture");
}

fn analyzer_with(root: &Path, config: Config, threads: Option<usize>) -> Analyzer {
    let mut builder = Analyzer::builder()
        .root(root)
        .parser(PythonParser::new())
        .config(config.clone());
    for rule in rules_from_config(&config) {
        builder = builder.rule_box(rule);
    }
    if let Some(threads) = threads {
        builder = builder.parallelism(threads);
    }
    builder.build().expect("analyzer should build")
}

fn analyze(root: &Path) -> Report {
    analyzer_with(root, Config::default(), None)
        .analyze()
        .expect("analysis should succeed")
}

const GOOD: &str = r#""""Module."""

MAX_RETRIES = 3


class Store:
    """Keeps items."""

    def addItem(self, item: str) -> None:
        """Add one item.

        Args:
            item (str): the item to add
        """
        self.items = [item]
"#;

const BAD: &str = r#"class data_store:
    def Load(self, path, cache={}):
        """Loads data"""
        __tmp = 1
        return path
"#;

// ── Happy path ──

#[test]
fn clean_tree_passes() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/good.py", GOOD);

    let report = analyze(tmp.path());
    assert!(report.is_success(), "unexpected findings: {:#?}", report.findings);
    assert_eq!(report.files_checked, 1);
    assert_eq!(report.summary(), "All checks passed (1 file(s))");
}

#[test]
fn method_without_docstring_or_annotations() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "repo.py",
        "class Repo:\n    \"\"\"Stores values.\"\"\"\n\n    def getValue(self, x):\n        pass\n",
    );

    let report = analyze(tmp.path());
    let codes: Vec<&str> = report.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["SC004", "SC005", "SC007"]);
    assert_eq!(report.findings[1].subject, "x");
    assert!(report.findings.iter().all(|f| f.subject != "self"));

    insta::assert_snapshot!(report.format_compact(), @r"
    repo.py:4: Function 'getValue' is missing a docstring.
    repo.py:4: Function 'getValue' has parameter 'x' without type annotation.
    repo.py:4: Function 'getValue' is missing a return type annotation.
    ");
}

#[test]
fn every_rule_fires_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/good.py", GOOD);
    write(tmp.path(), "pkg/bad.py", BAD);

    let report = analyze(tmp.path());
    assert_eq!(report.files_checked, 2);
    assert_eq!(report.parse_failures, 0);

    insta::assert_snapshot!(report.format_compact(), @r"
    pkg/bad.py:1: Class 'data_store' is not in Pascal case.
    pkg/bad.py:1: Class 'data_store' is missing a docstring.
    pkg/bad.py:2: Function 'Load' is not in camel case.
    pkg/bad.py:2: Function 'Load' has parameter 'path' without type annotation.
    pkg/bad.py:2: Function 'Load' has parameter 'cache' without type annotation.
    pkg/bad.py:2: Function 'Load' has a mutable default argument 'cache'.
    pkg/bad.py:2: Function 'Load' is missing a return type annotation.
    pkg/bad.py:2: Function 'Load' docstring description does not end with a period.
    pkg/bad.py:4: Variable '__tmp' is not in camel case.
    pkg/bad.py:4: Variable '__tmp' uses '__' inappropriately.
    ");
}

// ── Exclusions ──

#[test]
fn excluded_identifiers_never_appear() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".standardignore", "!sleep_for_retry\n!max_tries\n");
    write(
        tmp.path(),
        "retry.py",
        "def sleep_for_retry(delay):\n    pass\n\nsleep_for_retry = None\n\ndef backoff(max_tries, base_delay: int) -> int:\n    \"\"\"Compute backoff.\"\"\"\n    return base_delay\n",
    );

    let report = analyze(tmp.path());
    for finding in &report.findings {
        assert_ne!(finding.subject, "sleep_for_retry");
        assert_ne!(finding.subject, "max_tries");
        assert!(!finding.message.contains("'delay'"), "{finding}");
    }
    let subjects: Vec<&str> = report.findings.iter().map(|f| f.subject.as_str()).collect();
    assert_eq!(subjects, vec!["base_delay"]);
}

#[test]
fn ignored_paths_are_not_scanned() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), ".standardignore", "# tooling\n**/.*\n**/__pycache__\nbuild/\n");
    write(tmp.path(), "pkg/good.py", GOOD);
    write(tmp.path(), ".venv/lib/site.py", BAD);
    write(tmp.path(), "pkg/__pycache__/cached.py", BAD);
    write(tmp.path(), "build/lib/pkg/bad.py", BAD);

    let report = analyze(tmp.path());
    assert!(report.is_success(), "unexpected findings: {:#?}", report.findings);
    assert_eq!(report.files_checked, 1);
}

#[test]
fn config_excludes_merge_with_ignore_file() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/good.py", GOOD);
    write(tmp.path(), "generated/bad.py", BAD);

    let config = Config::parse("[analyzer]\nexclude = [\"generated\"]\n").unwrap();
    let report = analyzer_with(tmp.path(), config, None).analyze().unwrap();
    assert!(report.is_success());
}

// ── Configuration ──

#[test]
fn disabled_rules_are_skipped() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/bad.py", BAD);

    let config = Config::parse(
        "[rules.return-annotation]\nenabled = false\n\n[rules.annotated-args]\nenabled = false\n",
    )
    .unwrap();
    let report = analyzer_with(tmp.path(), config, None).analyze().unwrap();
    assert!(report.by_code("SC005").is_empty());
    assert!(report.by_code("SC007").is_empty());
    assert!(!report.by_code("SC006").is_empty());
}

// ── Failure isolation ──

#[test]
fn parse_failure_yields_single_record() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "broken.py", "def get_value(:\n    return 1\n");
    write(tmp.path(), "pkg/bad.py", BAD);

    let report = analyze(tmp.path());
    assert_eq!(report.files_checked, 2);
    assert_eq!(report.parse_failures, 1);

    let broken: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| f.location.file == Path::new("broken.py"))
        .collect();
    assert_eq!(broken.len(), 1);
    assert!(broken[0].is_parse_error());
    assert_eq!(broken[0].code, "SC000");

    assert_eq!(report.by_code("SC008").len(), 1);
}

#[test]
fn python2_only_file_is_a_parse_failure() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "legacy.py", "def show(msg, end='', out):\n    print msg\n");
    write(tmp.path(), "good.py", GOOD);

    let report = analyze(tmp.path());
    assert_eq!(report.parse_failures, 1);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].code, "SC000");
    assert_eq!(report.findings[0].location.file, Path::new("legacy.py"));
}

#[test]
fn very_deep_expression_is_checked_without_aborting() {
    let tmp = TempDir::new().unwrap();
    let deep = format!("x = {}1\n", "1 + ".repeat(5000));
    write(tmp.path(), "deep.py", &deep);
    write(tmp.path(), "pkg/bad.py", BAD);

    let report = analyzer_with(tmp.path(), Config::default(), Some(2))
        .analyze()
        .expect("analysis should succeed");
    assert_eq!(report.files_checked, 2);
    assert_eq!(report.parse_failures, 0);
    assert!(report
        .findings
        .iter()
        .all(|f| f.location.file == Path::new("pkg/bad.py")));
    assert_eq!(report.by_code("SC008").len(), 1);
}

#[test]
fn missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let result = analyzer_with(&tmp.path().join("absent"), Config::default(), None).analyze();
    assert!(matches!(result, Err(AnalyzerError::RootNotFound(_))));
}

// ── Determinism ──

#[test]
fn analysis_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/good.py", GOOD);
    write(tmp.path(), "pkg/bad.py", BAD);

    let analyzer = analyzer_with(tmp.path(), Config::default(), None);
    let first = analyzer.analyze().unwrap();
    let second = analyzer.analyze().unwrap();
    assert_eq!(first.findings, second.findings);
}

#[test]
fn output_is_independent_of_thread_count() {
    let tmp = TempDir::new().unwrap();
    for i in 0..16 {
        write(tmp.path(), &format!("mod{i:02}/bad.py"), BAD);
        write(tmp.path(), &format!("mod{i:02}/good.py"), GOOD);
    }

    let serial = analyzer_with(tmp.path(), Config::default(), Some(1))
        .analyze()
        .unwrap();
    let parallel = analyzer_with(tmp.path(), Config::default(), Some(8))
        .analyze()
        .unwrap();
    assert_eq!(serial.findings, parallel.findings);
    assert_eq!(serial.findings.len(), 16 * 10);
}

#[test]
fn check_text_matches_file_analysis() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "pkg/bad.py", BAD);

    let analyzer = analyzer_with(tmp.path(), Config::default(), None);
    let from_disk = analyzer.analyze().unwrap().findings;
    let from_text = analyzer.check_text(Path::new("pkg/bad.py"), BAD);
    assert_eq!(from_disk, from_text);
    assert_eq!(all_rules().len(), 10);
}
