//! Kotlin frontend using Tree-sitter.

use std::path::Path;

use decompose_lint_core::syntax::{
    Annotation, Binding, Block, CallExpr, ClassDecl, ClassKind, Declaration, FunctionDecl,
    ImportDirective, KtFile, ObjectDecl, Parameter, PropertyDecl, Span, TypeRef,
};
use tracing::warn;
use tree_sitter::{Language, Node, Parser};

use crate::frontend::{LanguageFrontend, ParseError};

/// Node kinds that hold names.
const NAME_KINDS: &[&str] = &["identifier", "simple_identifier", "type_identifier"];

/// Lowers Kotlin source into a [`KtFile`].
pub struct KotlinFrontend {
    language: Language,
}

impl KotlinFrontend {
    /// Creates a new Kotlin frontend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }
}

impl Default for KotlinFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for KotlinFrontend {
    fn language_id(&self) -> &'static str {
        "kotlin"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".kt", ".kts"]
    }

    fn parse(&self, path: &Path, source: &str) -> Result<KtFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|source| ParseError::Language {
                language: "kotlin",
                source,
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: path.display().to_string(),
            })?;
        let root = tree.root_node();
        if root.has_error() {
            warn!("Syntax errors in {}, lowering partial tree", path.display());
        }

        let lowering = Lowering {
            src: source.as_bytes(),
        };
        let mut file = lowering.file(&root);
        file.path = path.to_path_buf();
        Ok(file)
    }
}

struct Lowering<'s> {
    src: &'s [u8],
}

impl<'s> Lowering<'s> {
    fn text(&self, node: &Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn span(node: &Node<'_>) -> Span {
        let start = node.start_position();
        Span::new(node.start_byte(), node.end_byte(), start.row + 1, start.column + 1)
    }

    /// Join identifier children of a `qualified_identifier` node with dots.
    fn qualified_id(&self, node: &Node<'_>) -> String {
        let mut parts = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if NAME_KINDS.contains(&child.kind()) {
                parts.push(self.text(&child).to_owned());
            }
        }
        parts.join(".")
    }

    fn first_child_of_kind<'t>(node: &Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|c| kinds.contains(&c.kind()));
        found
    }

    fn name(&self, node: &Node<'_>) -> Option<(String, Span)> {
        Self::first_child_of_kind(node, NAME_KINDS)
            .map(|n| (self.text(&n).trim_matches('`').to_owned(), Self::span(&n)))
    }

    fn file(&self, root: &Node<'_>) -> KtFile {
        let mut file = KtFile {
            span: Self::span(root),
            ..KtFile::default()
        };

        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            match node.kind() {
                "package_header" => {
                    if let Some(id) = Self::first_child_of_kind(&node, &["qualified_identifier"]) {
                        file.package = Some(self.qualified_id(&id));
                    }
                }
                "import" | "import_header" | "import_list" => self.imports(&node, &mut file.imports),
                _ => {}
            }
        }

        let mut pending = Vec::new();
        self.declarations(root, &mut pending, &mut file.declarations);
        file
    }

    fn imports(&self, node: &Node<'_>, out: &mut Vec<ImportDirective>) {
        if node.kind() == "import_list" {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                self.imports(&child, out);
            }
            return;
        }
        if let Some(import) = ImportDirective::parse(self.text(node)) {
            out.push(import.with_span(Self::span(node)));
        }
    }

    /// Collects declarations among the children of `node`, descending through
    /// wrapper nodes but never into expressions or bodies.
    ///
    /// Annotations that the grammar leaves as siblings of a declaration are
    /// carried over to the next declaration.
    fn declarations(
        &self,
        node: &Node<'_>,
        pending: &mut Vec<Annotation>,
        out: &mut Vec<Declaration>,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let decl = match child.kind() {
                "class_declaration" => self.class(&child).map(Declaration::Class),
                "object_declaration" | "companion_object" => {
                    Some(Declaration::Object(self.object(&child)))
                }
                "function_declaration" => self.function(&child).map(Declaration::Function),
                "property_declaration" => self.property(&child).map(Declaration::Property),
                "annotation" => {
                    pending.extend(self.annotation(&child));
                    continue;
                }
                kind if child.is_named() && !is_opaque(kind) => {
                    self.declarations(&child, pending, out);
                    continue;
                }
                _ => continue,
            };

            if let Some(mut decl) = decl {
                if !pending.is_empty() {
                    prepend_annotations(&mut decl, std::mem::take(pending));
                }
                out.push(decl);
            }
        }
    }

    fn annotation(&self, node: &Node<'_>) -> Option<Annotation> {
        Annotation::parse(self.text(node)).map(|a| a.with_span(Self::span(node)))
    }

    /// Modifier keywords and annotations attached directly to `node`.
    fn modifiers(&self, node: &Node<'_>) -> (Vec<String>, Vec<Annotation>) {
        let mut keywords = Vec::new();
        let mut annotations = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "annotation" {
                annotations.extend(self.annotation(&child));
            } else if child.kind().ends_with("modifiers") {
                self.modifier_list(&child, &mut keywords, &mut annotations);
            }
        }
        (keywords, annotations)
    }

    fn modifier_list(&self, node: &Node<'_>, keywords: &mut Vec<String>, annotations: &mut Vec<Annotation>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "annotation" {
                annotations.extend(self.annotation(&child));
            } else if child.child_count() == 0 {
                let text = self.text(&child).trim();
                if !text.is_empty() {
                    keywords.push(text.to_owned());
                }
            } else {
                self.modifier_list(&child, keywords, annotations);
            }
        }
    }

    fn supertypes(&self, node: &Node<'_>, out: &mut Vec<TypeRef>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "delegation_specifier" => {
                    if let Some(t) = TypeRef::parse(self.text(&child)) {
                        out.push(t.with_span(Self::span(&child)));
                    }
                }
                "delegation_specifiers" => self.supertypes(&child, out),
                _ => {}
            }
        }
    }

    fn body_declarations(&self, node: &Node<'_>) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        if let Some(body) = Self::first_child_of_kind(node, &["class_body", "enum_class_body"]) {
            let mut pending = Vec::new();
            self.declarations(&body, &mut pending, &mut declarations);
        }
        declarations
    }

    fn class(&self, node: &Node<'_>) -> Option<ClassDecl> {
        let (name, name_span) = self.name(node)?;
        let (modifiers, annotations) = self.modifiers(node);

        let kind = if Self::first_child_of_kind(node, &["interface"]).is_some() {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };

        let mut supertypes = Vec::new();
        self.supertypes(node, &mut supertypes);

        let mut parameters = Vec::new();
        if let Some(ctor) = Self::first_child_of_kind(node, &["primary_constructor"]) {
            self.parameters(&ctor, &mut parameters);
        }

        Some(ClassDecl {
            name,
            name_span,
            span: Self::span(node),
            kind,
            modifiers,
            annotations,
            supertypes,
            parameters,
            declarations: self.body_declarations(node),
        })
    }

    fn parameters(&self, node: &Node<'_>, out: &mut Vec<Parameter>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "class_parameter" {
                out.extend(self.parameter(&child));
            } else {
                self.parameters(&child, out);
            }
        }
    }

    fn parameter(&self, node: &Node<'_>) -> Option<Parameter> {
        let (name, _) = self.name(node)?;
        let (_, annotations) = self.modifiers(node);
        Some(Parameter {
            name,
            span: Self::span(node),
            binding: Self::binding(node),
            annotations,
        })
    }

    /// `val`/`var` keyword among the parameter's children, possibly wrapped.
    fn binding(node: &Node<'_>) -> Option<Binding> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "val" => return Some(Binding::Val),
                "var" => return Some(Binding::Var),
                "binding_pattern_kind" => return Self::binding(&child),
                _ => {}
            }
        }
        None
    }

    fn object(&self, node: &Node<'_>) -> ObjectDecl {
        let name = self
            .name(node)
            .map_or_else(|| "Companion".to_owned(), |(name, _)| name);
        let (modifiers, annotations) = self.modifiers(node);
        let mut supertypes = Vec::new();
        self.supertypes(node, &mut supertypes);

        ObjectDecl {
            name,
            span: Self::span(node),
            modifiers,
            annotations,
            supertypes,
            declarations: self.body_declarations(node),
        }
    }

    fn function(&self, node: &Node<'_>) -> Option<FunctionDecl> {
        let (name, name_span) = self.name(node)?;
        let (modifiers, annotations) = self.modifiers(node);
        let body = Self::first_child_of_kind(node, &["function_body", "block"]).map(|b| self.block(&b));

        Some(FunctionDecl {
            name,
            name_span,
            span: Self::span(node),
            modifiers,
            annotations,
            body,
        })
    }

    fn property(&self, node: &Node<'_>) -> Option<PropertyDecl> {
        let (name, _) = Self::first_child_of_kind(node, &["variable_declaration"])
            .and_then(|v| self.name(&v))
            .or_else(|| self.name(node))?;
        let (_, annotations) = self.modifiers(node);
        Some(PropertyDecl {
            name,
            span: Self::span(node),
            annotations,
        })
    }

    fn block(&self, node: &Node<'_>) -> Block {
        let mut calls = Vec::new();
        self.calls_within(node, &mut calls);
        Block {
            span: Self::span(node),
            calls,
        }
    }

    fn calls_within(&self, node: &Node<'_>, out: &mut Vec<CallExpr>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.calls_at(&child, out);
        }
    }

    fn calls_at(&self, node: &Node<'_>, out: &mut Vec<CallExpr>) {
        if node.kind() == "call_expression" {
            out.push(self.call(node));
        } else {
            self.calls_within(node, out);
        }
    }

    fn call(&self, node: &Node<'_>) -> CallExpr {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        let Some((callee, suffixes)) = children.split_first() else {
            return CallExpr::new(String::new(), Self::span(node));
        };

        // `setContent(parent = null) { }` nests the argument call inside the
        // lambda call; both are one call.
        let mut call = if callee.kind() == "call_expression" && !has_value_arguments(suffixes) {
            let mut inner = self.call(callee);
            inner.span = Self::span(node);
            inner
        } else {
            let mut call = CallExpr::new(self.callee_name(callee), Self::span(node));
            self.calls_at(callee, &mut call.nested);
            call
        };

        for child in suffixes {
            self.call_suffix(child, &mut call);
        }
        call
    }

    /// Name of the called function: the identifier itself, or the selector
    /// of `view.setContent` and `this?.setContent`.
    fn callee_name(&self, node: &Node<'_>) -> String {
        if NAME_KINDS.contains(&node.kind()) {
            return self.text(node).trim_matches('`').to_owned();
        }
        if matches!(node.kind(), "navigation_expression" | "navigation_suffix") {
            let mut cursor = node.walk();
            let selector = node.named_children(&mut cursor).last();
            if let Some(selector) = selector {
                return self.callee_name(&selector);
            }
        }
        callee_text_name(self.text(node))
    }

    fn call_suffix(&self, node: &Node<'_>, call: &mut CallExpr) {
        match node.kind() {
            "annotated_lambda" => {
                if let Some(lambda) = Self::first_child_of_kind(node, &["lambda_literal"]) {
                    call.lambdas.push(self.block(&lambda));
                }
            }
            "lambda_literal" => call.lambdas.push(self.block(node)),
            "call_suffix" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.call_suffix(&child, call);
                }
            }
            _ => self.calls_at(node, &mut call.nested),
        }
    }
}

/// Nodes that never contain member or top-level declarations.
fn is_opaque(kind: &str) -> bool {
    kind.ends_with("_expression")
        || kind.ends_with("_literal")
        || matches!(
            kind,
            "package_header"
                | "import"
                | "import_header"
                | "import_list"
                | "annotated_lambda"
                | "block"
                | "function_body"
                | "value_arguments"
                | "modifiers"
                | "line_comment"
                | "block_comment"
        )
}

/// Fallback for callee shapes without a selector node.
fn callee_text_name(text: &str) -> String {
    let head = text.split('(').next().unwrap_or(text);
    head.rsplit('.')
        .next()
        .unwrap_or(head)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '`')
        .collect()
}

fn has_value_arguments(suffixes: &[Node<'_>]) -> bool {
    suffixes.iter().any(|n| match n.kind() {
        "value_arguments" => true,
        "call_suffix" => {
            let mut cursor = n.walk();
            let found = n
                .named_children(&mut cursor)
                .any(|c| c.kind() == "value_arguments");
            found
        }
        _ => false,
    })
}

fn prepend_annotations(decl: &mut Declaration, mut leading: Vec<Annotation>) {
    let target = match decl {
        Declaration::Class(c) => &mut c.annotations,
        Declaration::Object(o) => &mut o.annotations,
        Declaration::Function(f) => &mut f.annotations,
        Declaration::Property(p) => &mut p.annotations,
    };
    leading.append(target);
    *target = leading;
}
