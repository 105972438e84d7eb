//! Rule requiring PascalCase class names.

use standard_check_core::{Declaration, FileContext, Finding, Rule};

use crate::naming::{is_pascal_case, strip_affix_underscore};

/// Rule code for pascal-case-classes.
pub const CODE: &str = "SC008";

/// Rule name for pascal-case-classes.
pub const NAME: &str = "pascal-case-classes";

/// Requires PascalCase class names.
#[derive(Debug, Clone)]
pub struct PascalCaseClasses {
    /// Strip one leading and one trailing `_` before testing.
    pub allow_affix_underscore: bool,
}

impl Default for PascalCaseClasses {
    fn default() -> Self {
        Self::new()
    }
}

impl PascalCaseClasses {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_affix_underscore: true,
        }
    }

    /// Sets whether single leading/trailing underscores are permitted.
    #[must_use]
    pub fn allow_affix_underscore(mut self, allow: bool) -> Self {
        self.allow_affix_underscore = allow;
        self
    }

    /// Returns true if `name` passes this rule.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        let core = if self.allow_affix_underscore {
            strip_affix_underscore(name)
        } else {
            name
        };
        is_pascal_case(core)
    }
}

impl Rule for PascalCaseClasses {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Class names must be PascalCase"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let Declaration::Class(class) = decl else {
            return vec![];
        };
        if self.accepts(&class.name) {
            return vec![];
        }
        vec![Finding::new(
            CODE,
            NAME,
            &class.name,
            ctx.location(class.span),
            format!("Class '{}' is not in Pascal case.", class.name),
        )]
    }
}
