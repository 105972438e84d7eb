//! Rule requiring a return type annotation on every function.

use standard_check_core::{Declaration, FileContext, Finding, Rule};

/// Rule code for return-annotation.
pub const CODE: &str = "SC007";

/// Rule name for return-annotation.
pub const NAME: &str = "return-annotation";

/// Requires `-> T` on every `def`.
#[derive(Debug, Clone, Default)]
pub struct ReturnAnnotation;

impl ReturnAnnotation {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ReturnAnnotation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Functions must have a return type annotation"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        match decl {
            Declaration::Function(f) if f.return_type.is_none() => vec![Finding::new(
                CODE,
                NAME,
                &f.name,
                ctx.location(f.span),
                format!("Function '{}' is missing a return type annotation.", f.name),
            )],
            _ => vec![],
        }
    }
}
