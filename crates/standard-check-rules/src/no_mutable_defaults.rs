//! Rule forbidding mutable literals as default argument values.
//!
//! Default values are evaluated once, so a list, set or dict literal is
//! shared between calls.
//!
//! # Detected Patterns
//!
//! ```python
//! def f(x: int = []): ...
//! def f(x: list = {}): ...
//! ```
//!
//! `None`, constants and calls such as `makeList()` are fine.

use standard_check_core::{Declaration, FileContext, Finding, Rule, Suggestion};

/// Rule code for no-mutable-defaults.
pub const CODE: &str = "SC006";

/// Rule name for no-mutable-defaults.
pub const NAME: &str = "no-mutable-defaults";

/// Forbids list, set and dict displays as argument defaults.
#[derive(Debug, Clone, Default)]
pub struct NoMutableDefaults;

impl NoMutableDefaults {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoMutableDefaults {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Argument defaults must not be list, set or dict literals"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let Declaration::Function(f) = decl else {
            return vec![];
        };
        f.args
            .iter()
            .filter(|arg| arg.default.as_ref().is_some_and(|d| d.is_mutable()))
            .map(|arg| {
                Finding::new(
                    CODE,
                    NAME,
                    &arg.name,
                    ctx.location(arg.span),
                    format!(
                        "Function '{}' has a mutable default argument '{}'.",
                        f.name, arg.name
                    ),
                )
                .with_suggestion(Suggestion::new(
                    "Default to None and build the value inside the function",
                ))
            })
            .collect()
    }
}
