//! Rule enforcing the style of argument descriptions in docstrings.
//!
//! # Detected Patterns
//!
//! ```python
//! def load(path: str) -> str:
//!     """Load a file.
//!
//!     Args:
//!         path (str): The file to load.
//!     """
//! ```
//!
//! Descriptions start lowercase and carry no trailing period. Extra clauses
//! separated by `;` start lowercase too:
//! `path (str): the file to load; must exist`.

use standard_check_core::{DocArg, Declaration, FileContext, Finding, Function, Rule};

/// Rule code for docstring-arg-style.
pub const CODE: &str = "SC003";

/// Rule name for docstring-arg-style.
pub const NAME: &str = "docstring-arg-style";

/// Checks argument descriptions inside `Args:` sections.
#[derive(Debug, Clone, Default)]
pub struct DocstringArgStyle;

impl DocstringArgStyle {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_entry(ctx: &FileContext, function: &Function, entry: &DocArg) -> Vec<Finding> {
        let mut problems = Vec::new();
        let description = entry.description.trim();
        if description.is_empty() {
            return vec![];
        }

        let mut clauses = description.split(';');
        if clauses.next().is_some_and(starts_uppercase) {
            problems.push("starts with a capital letter");
        }
        if description.ends_with('.') {
            problems.push("ends with a period");
        }
        for _ in clauses.filter(|c| starts_uppercase(c)) {
            problems.push("has a clause after ';' that starts with a capital letter");
        }

        problems
            .into_iter()
            .map(|problem| {
                Finding::new(
                    CODE,
                    NAME,
                    &function.name,
                    ctx.location(function.span),
                    format!(
                        "Function '{}' docstring description of argument '{}' {problem}.",
                        function.name, entry.name
                    ),
                )
            })
            .collect()
    }
}

fn starts_uppercase(clause: &str) -> bool {
    clause.trim_start().chars().next().is_some_and(char::is_uppercase)
}

impl Rule for DocstringArgStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Docstring argument descriptions must start lowercase and not end with a period"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let Declaration::Function(function) = decl else {
            return vec![];
        };
        let Some(doc) = &function.docstring else {
            return vec![];
        };
        doc.args()
            .iter()
            .flat_map(|entry| Self::check_entry(ctx, function, entry))
            .collect()
    }
}
