//! # standard-check-python
//!
//! Tree-sitter based Python front end for standard-check.
//!
//! [`PythonParser`] implements [`SourceParser`]: it parses a file with
//! `tree-sitter-python` and walks the tree once, producing every function,
//! class and bound variable as a
//! [`Declaration`](standard_check_core::Declaration). Files with syntax
//! errors, or with Python 2 only syntax the grammar still accepts, become a
//! [`ParseFailure`] pointing at the first offending node.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod literal;
mod validate;

use standard_check_core::{ParseFailure, ParseOutcome, SourceParser};
use tracing::debug;
use tree_sitter::{Language, Parser};

use crate::extract::{char_column, Extractor};
use crate::validate::first_rejected;

/// Python source parser.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn failure(line: usize, column: usize, message: impl Into<String>) -> ParseOutcome {
        ParseOutcome::Failed(ParseFailure {
            line,
            column,
            message: message.into(),
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse(&self, text: &str) -> ParseOutcome {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            return Self::failure(1, 1, format!("failed to load python grammar: {e}"));
        }

        let src = text.as_bytes();
        let Some(tree) = parser.parse(src, None) else {
            return Self::failure(1, 1, "parser produced no syntax tree");
        };
        let root = tree.root_node();

        if let Some(rejection) = first_rejected(root) {
            let pos = rejection.node.start_position();
            let line = pos.row + 1;
            let column = char_column(src, rejection.node.start_byte(), pos.column);
            debug!("Syntax error at {}:{}: {}", line, column, rejection.message);
            return Self::failure(line, column, rejection.message);
        }
        if root.has_error() {
            return Self::failure(1, 1, "invalid syntax");
        }

        ParseOutcome::Parsed(Extractor::new(src).run(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standard_check_core::{ArgKind, DeclKind, Declaration, DefaultShape, Function, Scope};

    fn parse(src: &str) -> Vec<Declaration> {
        match PythonParser::new().parse(src) {
            ParseOutcome::Parsed(decls) => decls,
            ParseOutcome::Failed(f) => panic!("unexpected parse failure: {f:?}"),
        }
    }

    fn functions(src: &str) -> Vec<Function> {
        parse(src)
            .into_iter()
            .filter_map(|d| match d {
                Declaration::Function(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn names(decls: &[Declaration], kind: DeclKind) -> Vec<String> {
        decls
            .iter()
            .filter(|d| d.kind() == kind)
            .map(|d| d.name().to_string())
            .collect()
    }

    #[test]
    fn extracts_method_with_receiver() {
        let fs = functions("class Repo:\n    def getValue(self, x):\n        pass\n");
        assert_eq!(fs.len(), 1);
        let f = &fs[0];
        assert_eq!(f.name, "getValue");
        assert_eq!(f.receiver.as_deref(), Some("self"));
        assert_eq!(f.args.len(), 1);
        assert_eq!(f.args[0].name, "x");
        assert_eq!(f.scope, Scope::Class("Repo".to_string()));
        assert_eq!((f.span.line, f.span.column), (2, 9));
        assert!(f.docstring.is_none());
        assert!(f.return_type.is_none());
    }

    #[test]
    fn staticmethod_has_no_receiver() {
        let fs = functions(
            "class A:\n    @staticmethod\n    def build(cls, n: int) -> int:\n        return n\n",
        );
        assert_eq!(fs[0].receiver, None);
        assert_eq!(fs[0].args.len(), 2);
        assert_eq!(fs[0].decorators, vec!["staticmethod".to_string()]);
        assert_eq!(fs[0].return_type.as_deref(), Some("int"));
    }

    #[test]
    fn dotted_staticmethod_has_no_receiver() {
        let fs = functions("class A:\n    @builtins.staticmethod\n    def make(self):\n        pass\n");
        assert!(fs[0].has_decorator("staticmethod"));
        assert_eq!(fs[0].receiver, None);
        assert_eq!(fs[0].args[0].name, "self");
    }

    #[test]
    fn argument_kinds_and_annotations() {
        let fs = functions(
            "def f(a, b: int, /, c=1, *args: str, d: list = [], **kwargs) -> None:\n    pass\n",
        );
        let kinds: Vec<(&str, ArgKind)> = fs[0]
            .args
            .iter()
            .map(|a| (a.name.as_str(), a.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("a", ArgKind::PositionalOnly),
                ("b", ArgKind::PositionalOnly),
                ("c", ArgKind::Positional),
                ("args", ArgKind::VarPositional),
                ("d", ArgKind::KeywordOnly),
                ("kwargs", ArgKind::VarKeyword),
            ]
        );
        assert_eq!(fs[0].args[1].annotation.as_deref(), Some("int"));
        assert_eq!(fs[0].args[3].annotation.as_deref(), Some("str"));
        let d = fs[0].args[4].default.as_ref().unwrap();
        assert_eq!(d.text, "[]");
        assert!(d.is_mutable());
    }

    #[test]
    fn bare_star_starts_keyword_only() {
        let fs = functions("def f(a, *, b):\n    pass\n");
        assert_eq!(fs[0].args[0].kind, ArgKind::Positional);
        assert_eq!(fs[0].args[1].kind, ArgKind::KeywordOnly);
    }

    #[test]
    fn default_shapes() {
        let fs = functions(
            "def f(a={}, b={1}, c=([]), d=None, e=makeList(), g=[x for x in y], h=set()):\n    pass\n",
        );
        let shapes: Vec<DefaultShape> = fs[0]
            .args
            .iter()
            .map(|a| a.default.as_ref().unwrap().shape)
            .collect();
        assert_eq!(
            shapes,
            vec![
                DefaultShape::Mapping,
                DefaultShape::Set,
                DefaultShape::List,
                DefaultShape::Other,
                DefaultShape::Other,
                DefaultShape::Other,
                DefaultShape::Other,
            ]
        );
    }

    #[test]
    fn docstrings() {
        let src = r#"
def a():
    """Loads data."""

def b():
    # leading comment
    r'''Raw text.'''

def c():
    f"""Not a docstring {x}."""

def d():
    x = 1
    """Too late."""

def e():
    """   """

def g():
    "Implicit " "concatenation."
"#;
        let fs = functions(src);
        let docs: Vec<Option<String>> = fs
            .iter()
            .map(|f| f.docstring.as_ref().map(|d| d.text()))
            .collect();
        assert_eq!(
            docs,
            vec![
                Some("Loads data.".to_string()),
                Some("Raw text.".to_string()),
                None,
                None,
                None,
                Some("Implicit concatenation.".to_string()),
            ]
        );
    }

    #[test]
    fn docstring_args_section() {
        let src = "def load(ignoreFile: str) -> list:\n    \"\"\"Load items.\n\n    Args:\n        ignoreFile (str): the file to load items from\n    \"\"\"\n";
        let fs = functions(src);
        let doc = fs[0].docstring.as_ref().unwrap();
        assert_eq!(doc.args().len(), 1);
        assert_eq!(doc.args()[0].name, "ignoreFile");
    }

    #[test]
    fn class_details() {
        let decls = parse(
            "@dataclass\nclass UserRepo(Base, metaclass=Meta):\n    \"\"\"Stores users.\"\"\"\n    count = 0\n",
        );
        let Declaration::Class(c) = &decls[0] else {
            panic!("expected class first");
        };
        assert_eq!(c.name, "UserRepo");
        assert_eq!(c.decorators, vec!["dataclass".to_string()]);
        assert_eq!(c.bases, vec!["Base".to_string(), "metaclass=Meta".to_string()]);
        assert_eq!(c.docstring.as_ref().map(|d| d.text()), Some("Stores users.".to_string()));
        assert_eq!(decls[1].scope(), &Scope::Class("UserRepo".to_string()));
    }

    #[test]
    fn variables_from_every_binding_form() {
        let src = r#"
a = b = 1
c, (d, *e) = f()
[g, h] = i
j: int = 2
k += 1
obj.attr = 3
items[0] = 4
for m, n in pairs:
    pass
with open(p) as o, lock:
    pass
if (q := compute()):
    pass
squares = [r * r for r in range(3)]
fn = lambda s: s
"#;
        let decls = parse(src);
        assert_eq!(
            names(&decls, DeclKind::Variable),
            vec![
                "a", "b", "c", "d", "e", "g", "h", "j", "k", "m", "n", "o", "q", "squares", "r",
                "fn"
            ]
        );
        let j = decls.iter().find(|d| d.name() == "j").unwrap();
        let Declaration::Variable(j) = j else {
            unreachable!()
        };
        assert_eq!(j.annotation.as_deref(), Some("int"));
    }

    #[test]
    fn nested_scopes() {
        let decls = parse("def outer():\n    def inner():\n        value = 1\n");
        assert_eq!(decls[1].scope(), &Scope::Function("outer".to_string()));
        assert_eq!(decls[2].scope(), &Scope::Function("inner".to_string()));
    }

    #[test]
    fn syntax_error_reports_first_error() {
        let outcome = PythonParser::new().parse("x = 1\ndef broken(:\n    pass\n");
        let ParseOutcome::Failed(f) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(f.line, 2);
        assert!(f.message.starts_with("invalid syntax"));
    }

    fn failure(src: &str) -> ParseFailure {
        match PythonParser::new().parse(src) {
            ParseOutcome::Failed(f) => f,
            ParseOutcome::Parsed(decls) => panic!("expected failure, got {decls:?}"),
        }
    }

    #[test]
    fn python2_statements_are_rejected() {
        let f = failure("x = 1\nprint \"hello\"\n");
        assert_eq!((f.line, f.column), (2, 1));
        assert!(f.message.contains("'print'"));

        let f = failure("exec \"x = 1\"\n");
        assert!(f.message.contains("'exec'"));

        assert_eq!(names(&parse("print(\"hello\")\n"), DeclKind::Variable).len(), 0);
    }

    #[test]
    fn parameter_without_default_after_default_is_rejected() {
        let f = failure("def f(x=1, y):\n    pass\n");
        assert_eq!((f.line, f.column), (1, 12));
        assert!(f.message.contains("without a default"));

        failure("def f(a: int = 1, b: int):\n    pass\n");
        failure("g = lambda x=1, y: x\n");
    }

    #[test]
    fn keyword_only_parameters_may_follow_defaults() {
        let fs = functions(
            "def f(a, b=1, *, c):\n    pass\n\ndef g(a=1, *args: str, c, **kw):\n    pass\n",
        );
        assert_eq!(fs.len(), 2);
        assert_eq!(fs[0].args[2].kind, ArgKind::KeywordOnly);
        assert_eq!(fs[1].args[2].name, "c");
    }

    #[test]
    fn deeply_nested_expression_does_not_exhaust_the_stack() {
        let src = format!("total = {}1\ndef afterwards():\n    pass\n", "1 + ".repeat(5000));
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || parse(&src))
            .unwrap();
        let decls = handle.join().unwrap();
        assert_eq!(names(&decls, DeclKind::Variable), vec!["total"]);
        assert_eq!(names(&decls, DeclKind::Function), vec!["afterwards"]);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let decls = parse("label = \"é\"; fooBar = 2\n");
        let foo = decls.iter().find(|d| d.name() == "fooBar").unwrap();
        assert_eq!(foo.span().column, 14);
        assert_eq!(foo.span().offset, 14);
    }

    #[test]
    fn empty_source() {
        assert!(parse("").is_empty());
    }
}
