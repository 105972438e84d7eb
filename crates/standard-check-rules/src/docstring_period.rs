//! Rule requiring the docstring summary line to end with a period.
//!
//! Applies to functions and classes that have a docstring. A docstring that
//! opens directly with a section header such as `Args:` has no summary at
//! all and is reported as missing its description.

use standard_check_core::{is_section_header, Declaration, FileContext, Finding, Rule};

/// Rule code for docstring-period.
pub const CODE: &str = "SC009";

/// Rule name for docstring-period.
pub const NAME: &str = "docstring-period";

/// Requires the first docstring line to end with `.`.
#[derive(Debug, Clone, Default)]
pub struct DocstringPeriod;

impl DocstringPeriod {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DocstringPeriod {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "The first line of a docstring must end with a period"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let Some(doc) = decl.docstring() else {
            return vec![];
        };
        let first = doc.first_line().trim_end();

        let message = if is_section_header(first) {
            format!("{} '{}' docstring description is missing.", decl.kind(), decl.name())
        } else if !first.ends_with('.') {
            format!(
                "{} '{}' docstring description does not end with a period.",
                decl.kind(),
                decl.name()
            )
        } else {
            return vec![];
        };

        vec![Finding::new(CODE, NAME, decl.name(), ctx.location(decl.span()), message)]
    }
}
