//! Rule requiring a docstring on every function and method.

use standard_check_core::{Declaration, FileContext, Finding, Rule, Suggestion};

/// Rule code for function-docstring.
pub const CODE: &str = "SC004";

/// Rule name for function-docstring.
pub const NAME: &str = "function-docstring";

/// Requires a non-blank docstring on every `def`.
#[derive(Debug, Clone, Default)]
pub struct FunctionDocstring;

impl FunctionDocstring {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FunctionDocstring {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Functions and methods must have a docstring"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        match decl {
            Declaration::Function(f) if f.docstring.is_none() => vec![Finding::new(
                CODE,
                NAME,
                &f.name,
                ctx.location(f.span),
                format!("Function '{}' is missing a docstring.", f.name),
            )
            .with_suggestion(Suggestion::new(
                "Add a one-line summary ending with a period as the first statement",
            ))],
            _ => vec![],
        }
    }
}
