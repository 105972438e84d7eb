//! Rule forbidding double-underscore name mangling.
//!
//! Names starting with two or more underscores are rewritten by Python
//! inside class bodies. Only dunder names (`__init__`, `__version__`) may
//! use a `__` prefix.

use standard_check_core::{Declaration, FileContext, Finding, Rule, Span, Suggestion};

use crate::naming::is_mangled;

/// Rule code for no-name-mangling.
pub const CODE: &str = "SC002";

/// Rule name for no-name-mangling.
pub const NAME: &str = "no-name-mangling";

/// Forbids `__name` style identifiers on functions, variables and arguments.
#[derive(Debug, Clone, Default)]
pub struct NoNameMangling;

impl NoNameMangling {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn finding(ctx: &FileContext, subject: &str, span: Span, message: String) -> Finding {
        Finding::new(CODE, NAME, subject, ctx.location(span), message)
            .with_suggestion(Suggestion::new("Use a single leading underscore for private names"))
    }
}

impl Rule for NoNameMangling {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Names may not start with '__' unless they are dunder names"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !matches!(decl, Declaration::Class(_)) && is_mangled(decl.name()) {
            findings.push(Self::finding(
                ctx,
                decl.name(),
                decl.span(),
                format!("{} '{}' uses '__' inappropriately.", decl.kind(), decl.name()),
            ));
        }

        if let Declaration::Function(f) = decl {
            for arg in f.args.iter().filter(|a| is_mangled(&a.name)) {
                findings.push(Self::finding(
                    ctx,
                    &arg.name,
                    arg.span,
                    format!(
                        "Function '{}' has parameter '{}' that uses '__' inappropriately.",
                        f.name, arg.name
                    ),
                ));
            }
        }

        findings
    }
}
