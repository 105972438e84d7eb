//! Declaration model extracted from parsed source.
//!
//! A [`SourceFile`] holds either the full list of [`Declaration`]s found in a
//! file or the [`ParseFailure`] that prevented building it. The model is
//! immutable once built; rules only ever read it.

mod docstring;

pub use docstring::{is_section_header, DocArg, Docstring};

use std::path::PathBuf;

use crate::patterns::IgnoreSet;

/// Position of a declaration's name token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Innermost definition enclosing a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Module level.
    Module,
    /// Body of the named class.
    Class(String),
    /// Body of the named function.
    Function(String),
}

/// Kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// `def name(...)`
    Function,
    /// `class Name`
    Class,
    /// A name bound by assignment.
    Variable,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "Function"),
            Self::Class => write!(f, "Class"),
            Self::Variable => write!(f, "Variable"),
        }
    }
}

/// How an argument may be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Before a `/` marker.
    PositionalOnly,
    /// Ordinary positional-or-keyword argument.
    Positional,
    /// After `*` or `*args`.
    KeywordOnly,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

impl ArgKind {
    /// Returns true for `*args` and `**kwargs`.
    #[must_use]
    pub fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

/// Static syntactic shape of a default value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultShape {
    /// `[...]`
    List,
    /// `{a, b}`
    Set,
    /// `{k: v}` or `{}`
    Mapping,
    /// Anything else: constants, names, calls, comprehensions.
    Other,
}

/// A default value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    /// Source text of the expression.
    pub text: String,
    /// Syntactic shape.
    pub shape: DefaultShape,
}

impl DefaultValue {
    /// Creates a default value.
    #[must_use]
    pub fn new(text: impl Into<String>, shape: DefaultShape) -> Self {
        Self {
            text: text.into(),
            shape,
        }
    }

    /// Returns true if the default is a list, set or mapping literal.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        matches!(
            self.shape,
            DefaultShape::List | DefaultShape::Set | DefaultShape::Mapping
        )
    }
}

/// A function argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument name without `*` markers.
    pub name: String,
    /// Position of the name.
    pub span: Span,
    /// How the argument is passed.
    pub kind: ArgKind,
    /// Annotation text, if annotated.
    pub annotation: Option<String>,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
}

/// A `def`, free function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Position of the name.
    pub span: Span,
    /// Enclosing scope.
    pub scope: Scope,
    /// Decorator expressions without the leading `@`.
    pub decorators: Vec<String>,
    /// Docstring, if present and non-blank.
    pub docstring: Option<Docstring>,
    /// Name of the implicit `self`/`cls` receiver, if any.
    pub receiver: Option<String>,
    /// Arguments in source order, receiver excluded.
    pub args: Vec<Argument>,
    /// Return annotation text, if annotated.
    pub return_type: Option<String>,
}

impl Function {
    /// Returns true if decorated with `name` (bare or as the last dotted part).
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        has_decorator(&self.decorators, name)
    }
}

/// A `class` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Class name.
    pub name: String,
    /// Position of the name.
    pub span: Span,
    /// Enclosing scope.
    pub scope: Scope,
    /// Decorator expressions without the leading `@`.
    pub decorators: Vec<String>,
    /// Base class expressions.
    pub bases: Vec<String>,
    /// Docstring, if present and non-blank.
    pub docstring: Option<Docstring>,
}

/// A name bound by an assignment-like statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Bound name.
    pub name: String,
    /// Position of the name.
    pub span: Span,
    /// Enclosing scope.
    pub scope: Scope,
    /// Annotation text for `name: T = ...` forms.
    pub annotation: Option<String>,
}

/// A named definition extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Function or method.
    Function(Function),
    /// Class.
    Class(Class),
    /// Variable.
    Variable(Variable),
}

impl Declaration {
    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
            Self::Variable(v) => &v.name,
        }
    }

    /// Kind of declaration.
    #[must_use]
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::Function(_) => DeclKind::Function,
            Self::Class(_) => DeclKind::Class,
            Self::Variable(_) => DeclKind::Variable,
        }
    }

    /// Position of the name.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Function(f) => f.span,
            Self::Class(c) => c.span,
            Self::Variable(v) => v.span,
        }
    }

    /// Enclosing scope.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        match self {
            Self::Function(f) => &f.scope,
            Self::Class(c) => &c.scope,
            Self::Variable(v) => &v.scope,
        }
    }

    /// Docstring of a function or class.
    #[must_use]
    pub fn docstring(&self) -> Option<&Docstring> {
        match self {
            Self::Function(f) => f.docstring.as_ref(),
            Self::Class(c) => c.docstring.as_ref(),
            Self::Variable(_) => None,
        }
    }

    /// Drops the declaration if its name is excluded; otherwise drops any
    /// excluded arguments from a function.
    #[must_use]
    pub fn without_excluded(self, ignore: &IgnoreSet) -> Option<Self> {
        if ignore.is_excluded_identifier(self.name()) {
            return None;
        }
        match self {
            Self::Function(mut f) => {
                f.args.retain(|a| !ignore.is_excluded_identifier(&a.name));
                Some(Self::Function(f))
            }
            other => Some(other),
        }
    }
}

/// Returns true if any decorator calls or names `name`, either bare or as the
/// last dotted part (`functools.lru_cache(maxsize=2)` matches `lru_cache`).
#[must_use]
pub fn has_decorator(decorators: &[String], name: &str) -> bool {
    decorators.iter().any(|d| {
        let callee = d.split('(').next().unwrap_or(d);
        callee == name || callee.rsplit('.').next() == Some(name)
    })
}

/// Why a file could not be turned into declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Line of the first syntax error (1-indexed).
    pub line: usize,
    /// Column of the first syntax error in characters (1-indexed).
    pub column: usize,
    /// Description of the failure.
    pub message: String,
}

/// Outcome of parsing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every declaration found, in source order.
    Parsed(Vec<Declaration>),
    /// The file could not be parsed.
    Failed(ParseFailure),
}

/// One scanned file and its parse result.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the scan root.
    pub path: PathBuf,
    /// Raw file text.
    pub text: String,
    /// Parse result.
    pub outcome: ParseOutcome,
}

impl SourceFile {
    /// Creates a source file from an already computed outcome.
    #[must_use]
    pub fn new(path: PathBuf, text: String, outcome: ParseOutcome) -> Self {
        Self {
            path,
            text,
            outcome,
        }
    }

    /// Declarations, or an empty slice when parsing failed.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        match &self.outcome {
            ParseOutcome::Parsed(decls) => decls,
            ParseOutcome::Failed(_) => &[],
        }
    }

    /// The parse failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ParseFailure> {
        match &self.outcome {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Failed(f) => Some(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, args: &[&str]) -> Declaration {
        Declaration::Function(Function {
            name: name.to_string(),
            span: Span::new(1, 5, 4, name.len()),
            scope: Scope::Module,
            decorators: vec!["functools.lru_cache(maxsize=2)".to_string()],
            docstring: None,
            receiver: None,
            args: args
                .iter()
                .map(|a| Argument {
                    name: (*a).to_string(),
                    span: Span::default(),
                    kind: ArgKind::Positional,
                    annotation: None,
                    default: None,
                })
                .collect(),
            return_type: None,
        })
    }

    #[test]
    fn excluded_declaration_is_dropped() {
        let ignore = IgnoreSet::parse("!sleep_for_retry\n");
        assert!(function("sleep_for_retry", &[])
            .without_excluded(&ignore)
            .is_none());
        assert!(function("sleepForRetry", &[])
            .without_excluded(&ignore)
            .is_some());
    }

    #[test]
    fn excluded_arguments_are_dropped() {
        let ignore = IgnoreSet::parse("!max_tries\n");
        let Some(Declaration::Function(f)) =
            function("retry", &["max_tries", "delay"]).without_excluded(&ignore)
        else {
            panic!("function should survive");
        };
        let names: Vec<&str> = f.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["delay"]);
    }

    #[test]
    fn decorator_lookup_matches_last_segment() {
        let Declaration::Function(f) = function("cached", &[]) else {
            unreachable!()
        };
        assert!(f.has_decorator("lru_cache"));
        assert!(f.has_decorator("functools.lru_cache"));
        assert!(!f.has_decorator("cache"));
    }

    #[test]
    fn mutable_shapes() {
        assert!(DefaultValue::new("[]", DefaultShape::List).is_mutable());
        assert!(DefaultValue::new("{1}", DefaultShape::Set).is_mutable());
        assert!(DefaultValue::new("{}", DefaultShape::Mapping).is_mutable());
        assert!(!DefaultValue::new("None", DefaultShape::Other).is_mutable());
    }

    #[test]
    fn failed_file_has_no_declarations() {
        let file = SourceFile::new(
            PathBuf::from("bad.py"),
            "def (".to_string(),
            ParseOutcome::Failed(ParseFailure {
                line: 1,
                column: 5,
                message: "syntax error".to_string(),
            }),
        );
        assert!(file.declarations().is_empty());
        assert_eq!(file.failure().map(|f| f.line), Some(1));
    }
}
