//! The fixed rule set and its construction from configuration.

use standard_check_core::{Config, RuleBox};
use tracing::debug;

use crate::{
    AnnotatedArgs, CamelCaseNames, ClassDocstring, DocstringArgStyle, DocstringPeriod,
    FunctionDocstring, NoMutableDefaults, NoNameMangling, PascalCaseClasses, ReturnAnnotation,
};

/// Option shared by `camel-case-names` and `pascal-case-classes`.
pub const ALLOW_AFFIX_UNDERSCORE: &str = "allow_affix_underscore";

/// Returns every rule with default settings, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    rules_from_config(&Config::default())
}

/// Builds every rule, applying per-rule options from `config`.
///
/// Rules disabled in the configuration are still returned; the analyzer
/// drops them when it is built.
///
/// `[rules.camel-case-names] allow_affix_underscore` also applies to
/// `pascal-case-classes` unless that rule sets the option itself.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let allow_affix = config
        .rule(crate::camel_case_names::NAME)
        .map_or(true, |r| r.get_bool(ALLOW_AFFIX_UNDERSCORE, true));
    let allow_affix_classes = config
        .rule(crate::pascal_case_classes::NAME)
        .and_then(|r| r.get_option::<bool>(ALLOW_AFFIX_UNDERSCORE))
        .unwrap_or(allow_affix);
    debug!(allow_affix, allow_affix_classes, "Building rule set");

    vec![
        Box::new(CamelCaseNames::new().allow_affix_underscore(allow_affix)),
        Box::new(NoNameMangling::new()),
        Box::new(DocstringArgStyle::new()),
        Box::new(FunctionDocstring::new()),
        Box::new(AnnotatedArgs::new()),
        Box::new(NoMutableDefaults::new()),
        Box::new(ReturnAnnotation::new()),
        Box::new(PascalCaseClasses::new().allow_affix_underscore(allow_affix_classes)),
        Box::new(DocstringPeriod::new()),
        Box::new(ClassDocstring::new()),
    ]
}

/// Returns true if `name` is the name of a built-in rule.
#[must_use]
pub fn is_known_rule(name: &str) -> bool {
    all_rules().iter().any(|r| r.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check_source;

    #[test]
    fn test_codes_are_unique_and_ordered() {
        let codes: Vec<&str> = all_rules().iter().map(|r| r.code()).collect();
        assert_eq!(
            codes,
            vec![
                "SC001", "SC002", "SC003", "SC004", "SC005", "SC006", "SC007", "SC008", "SC009",
                "SC010"
            ]
        );
    }

    #[test]
    fn test_every_rule_is_described() {
        for rule in all_rules() {
            assert!(!rule.description().is_empty(), "{} has no description", rule.name());
        }
    }

    #[test]
    fn test_affix_option_flows_to_both_naming_rules() {
        let config = Config::parse("[rules.camel-case-names]\nallow_affix_underscore = false\n")
            .expect("valid config");
        let rules = rules_from_config(&config);
        let src = "class _Hidden:\n    \"\"\"Doc.\"\"\"\n_cache = 1\n";
        let codes: Vec<String> = rules
            .iter()
            .flat_map(|r| check_source(r.as_ref(), src))
            .map(|f| f.code)
            .collect();
        assert_eq!(codes, vec!["SC001".to_string(), "SC008".to_string()]);
    }

    #[test]
    fn test_class_option_overrides_shared_option() {
        let config = Config::parse(
            "[rules.camel-case-names]\nallow_affix_underscore = false\n\n[rules.pascal-case-classes]\nallow_affix_underscore = true\n",
        )
        .expect("valid config");
        let rules = rules_from_config(&config);
        let src = "class _Hidden:\n    \"\"\"Doc.\"\"\"\n";
        let total: usize = rules.iter().map(|r| check_source(r.as_ref(), src).len()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_known_rules() {
        assert!(is_known_rule("docstring-period"));
        assert!(!is_known_rule("no-unwrap-expect"));
    }
}
