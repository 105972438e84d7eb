//! # standard-check-rules
//!
//! Built-in naming, docstring and annotation rules for standard-check.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SC001 | `camel-case-names` | Function, variable and argument names are camelCase |
//! | SC002 | `no-name-mangling` | No `__name` identifiers outside dunder names |
//! | SC003 | `docstring-arg-style` | `Args:` descriptions start lowercase, no trailing period |
//! | SC004 | `function-docstring` | Every function has a docstring |
//! | SC005 | `annotated-args` | Every argument is annotated (`self`, `*args`, `**kwargs` exempt) |
//! | SC006 | `no-mutable-defaults` | No list, set or dict literal defaults |
//! | SC007 | `return-annotation` | Every function has a return annotation |
//! | SC008 | `pascal-case-classes` | Class names are PascalCase |
//! | SC009 | `docstring-period` | Docstring summary line ends with a period |
//! | SC010 | `class-docstring` | Every class has a docstring |
//!
//! ## Usage
//!
//! ```ignore
//! use standard_check_core::Analyzer;
//! use standard_check_python::PythonParser;
//! use standard_check_rules::all_rules;
//!
//! let mut builder = Analyzer::builder().root("./src").parser(PythonParser::new());
//! for rule in all_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let report = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotated_args;
mod camel_case_names;
mod class_docstring;
mod docstring_arg_style;
mod docstring_period;
mod function_docstring;
mod no_mutable_defaults;
mod no_name_mangling;
mod pascal_case_classes;
mod registry;
mod return_annotation;

pub mod naming;

#[cfg(test)]
mod test_support;

pub use annotated_args::AnnotatedArgs;
pub use camel_case_names::CamelCaseNames;
pub use class_docstring::ClassDocstring;
pub use docstring_arg_style::DocstringArgStyle;
pub use docstring_period::DocstringPeriod;
pub use function_docstring::FunctionDocstring;
pub use no_mutable_defaults::NoMutableDefaults;
pub use no_name_mangling::NoNameMangling;
pub use pascal_case_classes::PascalCaseClasses;
pub use registry::{all_rules, is_known_rule, rules_from_config, ALLOW_AFFIX_UNDERSCORE};
pub use return_annotation::ReturnAnnotation;

/// Re-export core types for convenience.
pub use standard_check_core::{Finding, Rule};
