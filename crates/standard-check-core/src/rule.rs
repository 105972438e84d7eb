//! Rule and parser traits.

use crate::context::FileContext;
use crate::model::{Declaration, ParseOutcome};
use crate::types::Finding;

/// A check evaluated against one declaration at a time.
///
/// Rules are stateless: they may run in any order, on any thread, and never
/// see declarations whose names are excluded by the ignore file.
///
/// # Example
///
/// ```ignore
/// use standard_check_core::{Declaration, FileContext, Finding, Location, Rule};
///
/// pub struct NoSingleLetterClasses;
///
/// impl Rule for NoSingleLetterClasses {
///     fn name(&self) -> &'static str { "no-single-letter-classes" }
///     fn code(&self) -> &'static str { "SC100" }
///
///     fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding> {
///         match decl {
///             Declaration::Class(c) if c.name.len() == 1 => vec![Finding::new(
///                 self.code(),
///                 self.name(),
///                 &c.name,
///                 ctx.location(c.span),
///                 format!("Class '{}' has a single-letter name.", c.name),
///             )],
///             _ => vec![],
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "function-docstring").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SC004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single declaration and returns any findings.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `decl` - The declaration to check
    fn check(&self, ctx: &FileContext, decl: &Declaration) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Turns file text into declarations for one source language.
///
/// Implementations must not panic on malformed input: a file that cannot be
/// parsed is reported through [`ParseOutcome::Failed`].
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses file text.
    fn parse(&self, text: &str) -> ParseOutcome;
}
