//! Rule requiring type annotations on function arguments.
//!
//! The implicit `self`/`cls` receiver is never an argument here, and
//! `*args` / `**kwargs` are exempt.

use standard_check_core::{Declaration, FileContext, Finding, Rule, Suggestion};

/// Rule code for annotated-args.
pub const CODE: &str = "SC005";

/// Rule name for annotated-args.
pub const NAME: &str = "annotated-args";

/// Requires an annotation on every non-variadic argument.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedArgs;

impl AnnotatedArgs {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AnnotatedArgs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function arguments must have type annotations"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let Declaration::Function(f) = decl else {
            return vec![];
        };
        f.args
            .iter()
            .filter(|arg| arg.annotation.is_none() && !arg.kind.is_variadic())
            .map(|arg| {
                Finding::new(
                    CODE,
                    NAME,
                    &arg.name,
                    ctx.location(arg.span),
                    format!(
                        "Function '{}' has parameter '{}' without type annotation.",
                        f.name, arg.name
                    ),
                )
                .with_suggestion(Suggestion::new(format!("Annotate it: `{}: <type>`", arg.name)))
            })
            .collect()
    }
}
