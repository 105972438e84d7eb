//! Syntax the grammar accepts but Python 3 does not.
//!
//! tree-sitter-python is error tolerant and still knows Python 2 statements,
//! so a tree without `ERROR` nodes is not necessarily a valid module.

use tree_sitter::Node;

/// A node that makes the module invalid, with the reason.
pub(crate) struct Rejection<'tree> {
    pub(crate) node: Node<'tree>,
    pub(crate) message: String,
}

impl<'tree> Rejection<'tree> {
    fn new(node: Node<'tree>, message: impl Into<String>) -> Self {
        Self {
            node,
            message: message.into(),
        }
    }
}

/// First offending node in document order.
///
/// Walks with a [`tree_sitter::TreeCursor`] so the depth of the tree does not
/// matter.
pub(crate) fn first_rejected(root: Node<'_>) -> Option<Rejection<'_>> {
    let mut cursor = root.walk();
    loop {
        if let Some(rejection) = reject(cursor.node()) {
            return Some(rejection);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn reject(node: Node<'_>) -> Option<Rejection<'_>> {
    if node.is_missing() {
        return Some(Rejection::new(
            node,
            format!("invalid syntax: missing {}", node.kind()),
        ));
    }
    if node.is_error() {
        return Some(Rejection::new(node, "invalid syntax"));
    }
    match node.kind() {
        "print_statement" => Some(Rejection::new(
            node,
            "Missing parentheses in call to 'print'",
        )),
        "exec_statement" => Some(Rejection::new(
            node,
            "Missing parentheses in call to 'exec'",
        )),
        "parameters" | "lambda_parameters" => misordered_default(node),
        _ => None,
    }
}

/// A positional parameter without a default after one with a default.
///
/// Everything after `*`, `*args` or `**kwargs` is keyword-only and exempt.
fn misordered_default(params: Node<'_>) -> Option<Rejection<'_>> {
    let mut seen_default = false;
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => {
                return None
            }
            "typed_parameter" if is_variadic(param) => return None,
            "identifier" | "typed_parameter" if seen_default => {
                return Some(Rejection::new(
                    param,
                    "parameter without a default follows parameter with a default",
                ));
            }
            _ => {}
        }
    }
    None
}

fn is_variadic(typed: Node<'_>) -> bool {
    let mut cursor = typed.walk();
    let found = typed
        .named_children(&mut cursor)
        .any(|c| matches!(c.kind(), "list_splat_pattern" | "dictionary_splat_pattern"));
    found
}
