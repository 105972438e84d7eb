//! Syntax tree walk producing the declaration model.

use standard_check_core::{
    has_decorator, ArgKind, Argument, Class, DefaultShape, DefaultValue, Declaration, Docstring,
    Function, Scope, Span, Variable,
};
use tree_sitter::Node;

use crate::literal::decode_string_literal;

const RECEIVER_NAMES: &[&str] = &["self", "cls"];

/// Pending work for the tree walk. The walk keeps its own stack so deeply
/// nested expressions cannot exhaust the thread stack.
enum Step<'tree> {
    Visit(Node<'tree>),
    LeaveScope,
}

/// Walks a parsed module, collecting every declaration in source order.
pub(crate) struct Extractor<'src> {
    src: &'src [u8],
    scopes: Vec<Scope>,
    decls: Vec<Declaration>,
}

impl<'src> Extractor<'src> {
    pub(crate) fn new(src: &'src [u8]) -> Self {
        Self {
            src,
            scopes: Vec::new(),
            decls: Vec::new(),
        }
    }

    pub(crate) fn run<'tree>(mut self, root: Node<'tree>) -> Vec<Declaration> {
        let mut stack = vec![Step::Visit(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(node) => self.visit(node, &mut stack),
                Step::LeaveScope => {
                    self.scopes.pop();
                }
            }
        }
        self.decls
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        std::str::from_utf8(&self.src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    fn span(&self, node: Node<'_>) -> Span {
        let pos = node.start_position();
        Span::new(
            pos.row + 1,
            char_column(self.src, node.start_byte(), pos.column),
            node.start_byte(),
            node.end_byte() - node.start_byte(),
        )
    }

    fn scope(&self) -> Scope {
        self.scopes.last().cloned().unwrap_or(Scope::Module)
    }

    fn visit<'tree>(&mut self, node: Node<'tree>, stack: &mut Vec<Step<'tree>>) {
        match node.kind() {
            "decorated_definition" => self.visit_decorated(node, stack),
            "function_definition" => self.visit_function(node, Vec::new(), stack),
            "class_definition" => self.visit_class(node, Vec::new(), stack),
            "lambda" => {}
            "assignment" | "augmented_assignment" => {
                if let Some(left) = node.child_by_field_name("left") {
                    let annotation = node
                        .child_by_field_name("type")
                        .filter(|_| left.kind() == "identifier")
                        .map(|t| self.text(t).to_string());
                    self.bind_targets(left, annotation);
                }
                push_children(node, stack);
            }
            "for_statement" | "for_in_clause" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_targets(left, None);
                }
                push_children(node, stack);
            }
            "with_item" => {
                if let Some(value) = node.child_by_field_name("value") {
                    if value.kind() == "as_pattern" {
                        if let Some(alias) = value.child_by_field_name("alias") {
                            self.bind_targets(alias, None);
                        }
                    }
                }
                push_children(node, stack);
            }
            "named_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind_targets(name, None);
                }
                push_children(node, stack);
            }
            _ => push_children(node, stack),
        }
    }

    /// Schedules the body of a definition inside `scope`.
    fn enter_body<'tree>(&mut self, node: Node<'tree>, scope: Scope, stack: &mut Vec<Step<'tree>>) {
        if let Some(body) = node.child_by_field_name("body") {
            self.scopes.push(scope);
            stack.push(Step::LeaveScope);
            push_children(body, stack);
        }
    }

    fn visit_decorated<'tree>(&mut self, node: Node<'tree>, stack: &mut Vec<Step<'tree>>) {
        let mut decorators = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "decorator" {
                let text = self.text(child).trim_start_matches('@').trim();
                decorators.push(text.to_string());
            }
        }

        match node.child_by_field_name("definition") {
            Some(def) if def.kind() == "function_definition" => {
                self.visit_function(def, decorators, stack);
            }
            Some(def) if def.kind() == "class_definition" => {
                self.visit_class(def, decorators, stack);
            }
            Some(def) => stack.push(Step::Visit(def)),
            None => {}
        }
    }

    fn visit_function<'tree>(
        &mut self,
        node: Node<'tree>,
        decorators: Vec<String>,
        stack: &mut Vec<Step<'tree>>,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node).to_string();
        let is_static = has_decorator(&decorators, "staticmethod");

        let (receiver, args) = node
            .child_by_field_name("parameters")
            .map(|p| self.parameters(p, !is_static))
            .unwrap_or_default();

        let function = Function {
            name: name.clone(),
            span: self.span(name_node),
            scope: self.scope(),
            decorators,
            docstring: self.docstring(node),
            receiver,
            args,
            return_type: node
                .child_by_field_name("return_type")
                .map(|t| self.text(t).to_string()),
        };
        self.decls.push(Declaration::Function(function));
        self.enter_body(node, Scope::Function(name), stack);
    }

    fn visit_class<'tree>(
        &mut self,
        node: Node<'tree>,
        decorators: Vec<String>,
        stack: &mut Vec<Step<'tree>>,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node).to_string();

        let mut bases = Vec::new();
        if let Some(list) = node.child_by_field_name("superclasses") {
            let mut cursor = list.walk();
            for base in list.named_children(&mut cursor) {
                if base.kind() != "comment" {
                    bases.push(self.text(base).to_string());
                }
            }
        }

        let class = Class {
            name: name.clone(),
            span: self.span(name_node),
            scope: self.scope(),
            decorators,
            bases,
            docstring: self.docstring(node),
        };
        self.decls.push(Declaration::Class(class));
        self.enter_body(node, Scope::Class(name), stack);
    }

    /// Collects arguments in source order, splitting off the receiver.
    fn parameters(&self, node: Node<'_>, allow_receiver: bool) -> (Option<String>, Vec<Argument>) {
        let mut receiver = None;
        let mut args: Vec<Argument> = Vec::new();
        let mut kind = ArgKind::Positional;
        let mut first = true;

        let mut cursor = node.walk();
        for param in node.named_children(&mut cursor) {
            match param.kind() {
                "comment" => continue,
                "positional_separator" => {
                    for arg in &mut args {
                        if arg.kind == ArgKind::Positional {
                            arg.kind = ArgKind::PositionalOnly;
                        }
                    }
                    continue;
                }
                "keyword_separator" => {
                    kind = ArgKind::KeywordOnly;
                    first = false;
                    continue;
                }
                _ => {}
            }

            let Some(mut arg) = self.argument(param, kind) else {
                first = false;
                continue;
            };
            if arg.kind == ArgKind::VarPositional {
                kind = ArgKind::KeywordOnly;
            }
            if first
                && allow_receiver
                && arg.kind == ArgKind::Positional
                && RECEIVER_NAMES.contains(&arg.name.as_str())
            {
                receiver = Some(std::mem::take(&mut arg.name));
            } else {
                args.push(arg);
            }
            first = false;
        }

        (receiver, args)
    }

    fn argument(&self, node: Node<'_>, kind: ArgKind) -> Option<Argument> {
        match node.kind() {
            "identifier" => Some(self.plain_argument(node, kind)),
            "list_splat_pattern" => {
                let ident = first_identifier(node)?;
                Some(self.plain_argument(ident, ArgKind::VarPositional))
            }
            "dictionary_splat_pattern" => {
                let ident = first_identifier(node)?;
                Some(self.plain_argument(ident, ArgKind::VarKeyword))
            }
            "typed_parameter" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() != "type" && c.kind() != "comment")?;
                let mut arg = self.argument(inner, kind)?;
                arg.annotation = node
                    .child_by_field_name("type")
                    .map(|t| self.text(t).to_string());
                Some(arg)
            }
            "default_parameter" | "typed_default_parameter" => {
                let name = node.child_by_field_name("name")?;
                let mut arg = self.argument(name, kind)?;
                arg.annotation = node
                    .child_by_field_name("type")
                    .map(|t| self.text(t).to_string());
                arg.default = node
                    .child_by_field_name("value")
                    .map(|v| DefaultValue::new(self.text(v), default_shape(v)));
                Some(arg)
            }
            _ => None,
        }
    }

    fn plain_argument(&self, ident: Node<'_>, kind: ArgKind) -> Argument {
        Argument {
            name: self.text(ident).to_string(),
            span: self.span(ident),
            kind,
            annotation: None,
            default: None,
        }
    }

    /// Emits one variable per name bound by an assignment target.
    fn bind_targets(&mut self, target: Node<'_>, annotation: Option<String>) {
        let mut annotation = annotation;
        let mut pending = vec![target];
        while let Some(node) = pending.pop() {
            match node.kind() {
                "identifier" => {
                    let variable = Variable {
                        name: self.text(node).to_string(),
                        span: self.span(node),
                        scope: self.scope(),
                        annotation: annotation.take(),
                    };
                    self.decls.push(Declaration::Variable(variable));
                }
                "pattern_list" | "tuple_pattern" | "list_pattern" | "tuple" | "list"
                | "expression_list" | "parenthesized_expression" | "list_splat_pattern"
                | "list_splat" | "as_pattern_target" => {
                    let mut cursor = node.walk();
                    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
                    pending.extend(children.into_iter().rev());
                }
                _ => {}
            }
        }
    }

    /// Docstring of a function or class: the first statement of the body
    /// when it is a plain string expression.
    fn docstring(&self, node: Node<'_>) -> Option<Docstring> {
        let body = node.child_by_field_name("body")?;
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment")?;
        if first.kind() != "expression_statement" {
            return None;
        }

        let mut cursor = first.walk();
        let mut exprs = first.named_children(&mut cursor);
        let expr = exprs.next()?;
        if exprs.next().is_some() {
            return None;
        }

        let raw = match expr.kind() {
            "string" => decode_string_literal(self.text(expr))?,
            "concatenated_string" => {
                let mut joined = String::new();
                let mut cursor = expr.walk();
                for part in expr.named_children(&mut cursor) {
                    if part.kind() == "string" {
                        joined.push_str(&decode_string_literal(self.text(part))?);
                    }
                }
                joined
            }
            _ => return None,
        };
        Docstring::parse(&raw)
    }
}

fn first_identifier(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "identifier");
    found
}

fn default_shape(node: Node<'_>) -> DefaultShape {
    let mut node = node;
    loop {
        match node.kind() {
            "list" => return DefaultShape::List,
            "set" => return DefaultShape::Set,
            "dictionary" => return DefaultShape::Mapping,
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() != "comment");
                match inner {
                    Some(inner) => node = inner,
                    None => return DefaultShape::Other,
                }
            }
            _ => return DefaultShape::Other,
        }
    }
}

/// Schedules the named children of `node` so they are visited in source order.
fn push_children<'tree>(node: Node<'tree>, stack: &mut Vec<Step<'tree>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.named_children(&mut cursor).collect();
    stack.extend(children.into_iter().rev().map(Step::Visit));
}

/// Converts tree-sitter's byte column into a 1-indexed character column.
pub(crate) fn char_column(src: &[u8], start_byte: usize, byte_column: usize) -> usize {
    let line_start = start_byte.saturating_sub(byte_column);
    let prefix = src.get(line_start..start_byte).unwrap_or_default();
    String::from_utf8_lossy(prefix).chars().count() + 1
}
