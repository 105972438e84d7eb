//! Identifier style predicates shared by the naming rules.

use regex::Regex;
use std::sync::LazyLock;

static CAMEL_CASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+([A-Z][a-z0-9]*)*$").ok());

static PASCAL_CASE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").ok());

static UPPER_SNAKE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*$").ok());

fn matches(pattern: &Option<Regex>, name: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(name))
}

/// `doStuff`, `value`, `x2`.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    matches(&CAMEL_CASE, name)
}

/// `ExampleClass`, `Http2Client`.
#[must_use]
pub fn is_pascal_case(name: &str) -> bool {
    matches(&PASCAL_CASE, name)
}

/// `MAX_RETRIES`, `X`.
#[must_use]
pub fn is_constant_name(name: &str) -> bool {
    matches(&UPPER_SNAKE, name)
}

/// `__init__`, `__version__`.
#[must_use]
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Two or more leading underscores without the matching dunder suffix.
#[must_use]
pub fn is_mangled(name: &str) -> bool {
    name.starts_with("__") && !is_dunder(name)
}

/// Removes at most one leading and one trailing underscore.
#[must_use]
pub fn strip_affix_underscore(name: &str) -> &str {
    let name = name.strip_prefix('_').unwrap_or(name);
    name.strip_suffix('_').unwrap_or(name)
}
