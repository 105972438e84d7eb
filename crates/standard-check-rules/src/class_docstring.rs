//! Rule requiring a docstring on every class.

use standard_check_core::{Declaration, FileContext, Finding, Rule};

/// Rule code for class-docstring.
pub const CODE: &str = "SC010";

/// Rule name for class-docstring.
pub const NAME: &str = "class-docstring";

/// Requires a non-blank docstring on every `class`.
#[derive(Debug, Clone, Default)]
pub struct ClassDocstring;

impl ClassDocstring {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ClassDocstring {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Classes must have a docstring"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        match decl {
            Declaration::Class(c) if c.docstring.is_none() => vec![Finding::new(
                CODE,
                NAME,
                &c.name,
                ctx.location(c.span),
                format!("Class '{}' is missing a docstring.", c.name),
            )],
            _ => vec![],
        }
    }
}
