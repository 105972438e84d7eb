//! Rule requiring camelCase names for functions, variables and arguments.
//!
//! # Accepted Names
//!
//! - camelCase: `getValue`, `count`, `x2`
//! - dunder names such as `__init__` (left to `no-name-mangling`)
//! - the throwaway name `_`
//! - UPPER_SNAKE constants: `MAX_RETRIES`, `X`
//! - one leading and/or one trailing underscore around a camelCase core
//!   (`_cache`, `type_`), unless `allow_affix_underscore` is off
//!
//! # Detected Patterns
//!
//! ```python
//! def get_value(max_tries): ...
//! ResultSet = []
//! ```

use standard_check_core::{Argument, Declaration, FileContext, Finding, Rule};

use crate::naming::{is_camel_case, is_constant_name, is_dunder, strip_affix_underscore};

/// Rule code for camel-case-names.
pub const CODE: &str = "SC001";

/// Rule name for camel-case-names.
pub const NAME: &str = "camel-case-names";

/// Requires camelCase function, variable and argument names.
#[derive(Debug, Clone)]
pub struct CamelCaseNames {
    /// Strip one leading and one trailing `_` before testing.
    pub allow_affix_underscore: bool,
}

impl Default for CamelCaseNames {
    fn default() -> Self {
        Self::new()
    }
}

impl CamelCaseNames {
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
        if name == "_" || is_dunder(name) {
            return true;
        }
        let core = if self.allow_affix_underscore {
            strip_affix_underscore(name)
        } else {
            name
        };
        is_constant_name(core) || is_camel_case(core)
    }

    fn check_argument(&self, ctx: &FileContext, function: &str, arg: &Argument) -> Option<Finding> {
        if self.accepts(&arg.name) {
            return None;
        }
        Some(Finding::new(
            CODE,
            NAME,
            &arg.name,
            ctx.location(arg.span),
            format!(
                "Function '{function}' has parameter '{}' that is not in camel case.",
                arg.name
            ),
        ))
    }
}

impl Rule for CamelCaseNames {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function, variable and argument names must be camelCase"
    }

    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !matches!(decl, Declaration::Class(_)) && !self.accepts(decl.name()) {
            findings.push(Finding::new(
                CODE,
                NAME,
                decl.name(),
                ctx.location(decl.span()),
                format!("{} '{}' is not in camel case.", decl.kind(), decl.name()),
            ));
        }

        if let Declaration::Function(f) = decl {
            findings.extend(
                f.args
                    .iter()
                    .filter_map(|arg| self.check_argument(ctx, &f.name, arg)),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_source, messages};

    #[test]
    fn test_detects_snake_case_function_and_args() {
        let findings = check_source(
            &CamelCaseNames::new(),
            "def get_value(max_tries, delay):\n    pass\n",
        );
        assert_eq!(
            messages(&findings),
            vec![
                "Function 'get_value' is not in camel case.",
                "Function 'get_value' has parameter 'max_tries' that is not in camel case.",
            ]
        );
        assert_eq!(findings[1].subject, "max_tries");
        assert_eq!(findings[1].location.column, 15);
    }

    #[test]
    fn test_detects_variables() {
        let findings = check_source(&CamelCaseNames::new(), "ResultSet = []\nfor Item in x:\n    pass\n");
        assert_eq!(
            messages(&findings),
            vec![
                "Variable 'ResultSet' is not in camel case.",
                "Variable 'Item' is not in camel case.",
            ]
        );
    }

    #[test]
    fn test_accepts_valid_names() {
        let rule = CamelCaseNames::new();
        for name in ["doStuff", "x", "_", "__init__", "MAX_RETRIES", "X", "_cache", "type_"] {
            assert!(rule.accepts(name), "{name} should pass");
        }
        for name in ["DoStuff", "do_stuff", "__x", "_Cache", "__cache_"] {
            assert!(!rule.accepts(name), "{name} should fail");
        }
    }

    #[test]
    fn test_affix_underscore_can_be_disallowed() {
        let rule = CamelCaseNames::new().allow_affix_underscore(false);
        assert!(!rule.accepts("_cache"));
        assert!(!rule.accepts("type_"));
        assert!(rule.accepts("cache"));
        assert!(rule.accepts("_"));
    }

    #[test]
    fn test_ignores_classes_and_receiver() {
        let findings = check_source(
            &CamelCaseNames::new(),
            "class user_repo:\n    def load(self):\n        pass\n",
        );
        assert!(findings.is_empty());
    }
}
