//! Owned syntax model of one Kotlin source file.
//!
//! The model is produced once per file by a frontend (see `decompose-lint-ts`)
//! and only read by rules. It keeps exactly what the rules query:
//! imports, declarations with their annotations and supertypes, primary
//! constructor parameters, and the call expressions inside function bodies.

mod annotation;
mod import;

pub use annotation::{Annotation, AnnotationArg, ArgValue};
pub use import::ImportDirective;

use std::path::PathBuf;

/// Source span of a syntax node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line of the start position (1-indexed).
    pub line: usize,
    /// Column of the start position (1-indexed).
    pub column: usize,
}

impl Span {
    /// Creates a span from byte offsets and a 1-indexed start position.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declarations that carry annotations.
pub trait Annotated {
    /// Annotations in source order.
    fn annotations(&self) -> &[Annotation];
}

/// One parsed Kotlin file.
#[derive(Debug, Clone, Default)]
pub struct KtFile {
    /// Path of the file as given by the host.
    pub path: PathBuf,
    /// Package name, if declared.
    pub package: Option<String>,
    /// Import directives in source order.
    pub imports: Vec<ImportDirective>,
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Span of the whole file.
    pub span: Span,
}

impl KtFile {
    /// Top-level class and interface declarations.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(Declaration::as_class)
    }
}

/// A named declaration.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// `class`, `interface`, `enum class`, ...
    Class(ClassDecl),
    /// `object`, `data object`, `companion object`.
    Object(ObjectDecl),
    /// `fun`.
    Function(FunctionDecl),
    /// `val` / `var` member.
    Property(PropertyDecl),
}

impl Declaration {
    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Object(o) => &o.name,
            Self::Function(f) => &f.name,
            Self::Property(p) => &p.name,
        }
    }

    /// Span of the whole declaration.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Class(c) => c.span,
            Self::Object(o) => o.span,
            Self::Function(f) => f.span,
            Self::Property(p) => p.span,
        }
    }

    /// Returns the class declaration, if this is one.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassDecl> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the property declaration, if this is one.
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyDecl> {
        match self {
            Self::Property(p) => Some(p),
            _ => None,
        }
    }
}

impl Annotated for Declaration {
    fn annotations(&self) -> &[Annotation] {
        match self {
            Self::Class(c) => &c.annotations,
            Self::Object(o) => &o.annotations,
            Self::Function(f) => &f.annotations,
            Self::Property(p) => &p.annotations,
        }
    }
}

/// Whether a class declaration is a class or an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassKind {
    /// `class Foo`
    #[default]
    Class,
    /// `interface Foo`
    Interface,
}

/// A supertype entry, e.g. `AppCompatActivity()` or `ScreenConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRef {
    /// Qualified name segments without type arguments.
    pub segments: Vec<String>,
    /// Span of the supertype entry.
    pub span: Span,
}

impl TypeRef {
    /// Parses a supertype entry as written in a supertype list.
    ///
    /// Constructor arguments, type arguments, nullability and `by` delegation
    /// are dropped: `foo.Base<T>(x) by impl` becomes `["foo", "Base"]`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.split(" by ").next().unwrap_or(text);
        let end = text
            .find(|c: char| c == '(' || c == '<' || c == '?')
            .unwrap_or(text.len());
        let segments: Vec<String> = text[..end]
            .split('.')
            .map(|s| s.trim().trim_matches('`').to_owned())
            .collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            segments,
            span: Span::default(),
        })
    }

    /// Sets the span of this reference.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Last name segment (`Base` for `foo.Base`).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone, Default)]
pub struct ClassDecl {
    /// Class name.
    pub name: String,
    /// Span of the name identifier.
    pub name_span: Span,
    /// Span of the whole declaration.
    pub span: Span,
    /// Class or interface.
    pub kind: ClassKind,
    /// Modifier keywords (`sealed`, `data`, `private`, ...).
    pub modifiers: Vec<String>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Direct supertypes in source order.
    pub supertypes: Vec<TypeRef>,
    /// Primary constructor parameters.
    pub parameters: Vec<Parameter>,
    /// Member declarations of the class body.
    pub declarations: Vec<Declaration>,
}

impl ClassDecl {
    /// Whether the class has the given modifier keyword.
    #[must_use]
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// `sealed class` or `sealed interface`.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.has_modifier("sealed")
    }

    /// Whether one of the direct supertypes is named `name`.
    #[must_use]
    pub fn is_direct_subtype_of(&self, name: &str) -> bool {
        self.supertypes.iter().any(|t| t.simple_name() == name)
    }

    /// Class declarations nested directly in the class body.
    pub fn nested_classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(Declaration::as_class)
    }

    /// Primary constructor parameters declared with `val` or `var`.
    pub fn property_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.binding.is_some())
    }

    /// Finds a property by name: body properties first, then `val`/`var`
    /// constructor parameters.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<PropertyRef<'_>> {
        self.declarations
            .iter()
            .filter_map(Declaration::as_property)
            .find(|p| p.name == name)
            .map(PropertyRef::Member)
            .or_else(|| {
                self.property_parameters()
                    .find(|p| p.name == name)
                    .map(PropertyRef::Parameter)
            })
    }
}

impl Annotated for ClassDecl {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// An object declaration.
#[derive(Debug, Clone, Default)]
pub struct ObjectDecl {
    /// Object name (`Companion` for an unnamed companion object).
    pub name: String,
    /// Span of the whole declaration.
    pub span: Span,
    /// Modifier keywords.
    pub modifiers: Vec<String>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Direct supertypes in source order.
    pub supertypes: Vec<TypeRef>,
    /// Member declarations of the object body.
    pub declarations: Vec<Declaration>,
}

impl Annotated for ObjectDecl {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A function declaration.
#[derive(Debug, Clone, Default)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Span of the name identifier.
    pub name_span: Span,
    /// Span of the whole declaration.
    pub span: Span,
    /// Modifier keywords.
    pub modifiers: Vec<String>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Function body (block or expression body).
    pub body: Option<Block>,
}

impl Annotated for FunctionDecl {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A property declared in a class body.
#[derive(Debug, Clone, Default)]
pub struct PropertyDecl {
    /// Property name.
    pub name: String,
    /// Span of the whole declaration.
    pub span: Span,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
}

impl Annotated for PropertyDecl {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// `val` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Read-only property.
    Val,
    /// Mutable property.
    Var,
}

/// A primary constructor parameter.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Span of the parameter.
    pub span: Span,
    /// `val`/`var` if the parameter declares a property.
    pub binding: Option<Binding>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
}

impl Annotated for Parameter {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A property found by name on a class.
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    /// Declared in the class body.
    Member(&'a PropertyDecl),
    /// Declared as a `val`/`var` constructor parameter.
    Parameter(&'a Parameter),
}

impl PropertyRef<'_> {
    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Member(p) => &p.name,
            Self::Parameter(p) => &p.name,
        }
    }
}

impl Annotated for PropertyRef<'_> {
    fn annotations(&self) -> &[Annotation] {
        match self {
            Self::Member(p) => &p.annotations,
            Self::Parameter(p) => &p.annotations,
        }
    }
}

/// A block of code: a function body or a lambda literal.
///
/// Only call expressions are retained, as a forest in source order.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Span of the block.
    pub span: Span,
    /// Outermost call expressions in source order.
    pub calls: Vec<CallExpr>,
}

/// A call expression such as `setContent { ... }` or `view.apply(x)`.
#[derive(Debug, Clone, Default)]
pub struct CallExpr {
    /// Callee name: last segment of the callee expression.
    pub callee: String,
    /// Span of the whole call.
    pub span: Span,
    /// Calls inside the receiver and the value arguments, in source order.
    pub nested: Vec<CallExpr>,
    /// Trailing lambda arguments.
    pub lambdas: Vec<Block>,
}

impl CallExpr {
    /// Creates a call with the given callee name and span.
    #[must_use]
    pub fn new(callee: impl Into<String>, span: Span) -> Self {
        Self {
            callee: callee.into(),
            span,
            nested: Vec::new(),
            lambdas: Vec::new(),
        }
    }

    /// First trailing lambda argument.
    #[must_use]
    pub fn first_lambda(&self) -> Option<&Block> {
        self.lambdas.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_drops_arguments() {
        let t = TypeRef::parse("AppCompatActivity()").unwrap();
        assert_eq!(t.segments, vec!["AppCompatActivity"]);

        let t = TypeRef::parse("androidx.fragment.app.Fragment").unwrap();
        assert_eq!(t.simple_name(), "Fragment");

        let t = TypeRef::parse("Base<List<String>>(1, 2)").unwrap();
        assert_eq!(t.simple_name(), "Base");

        let t = TypeRef::parse("Listener by delegate").unwrap();
        assert_eq!(t.simple_name(), "Listener");
    }

    #[test]
    fn type_ref_rejects_empty() {
        assert!(TypeRef::parse("").is_none());
        assert!(TypeRef::parse("a..b").is_none());
    }

    #[test]
    fn find_property_prefers_body_member() {
        let class = ClassDecl {
            name: "Details".into(),
            parameters: vec![Parameter {
                name: "type".into(),
                binding: Some(Binding::Val),
                ..Parameter::default()
            }],
            declarations: vec![Declaration::Property(PropertyDecl {
                name: "type".into(),
                ..PropertyDecl::default()
            })],
            ..ClassDecl::default()
        };
        assert!(matches!(
            class.find_property("type"),
            Some(PropertyRef::Member(_))
        ));
    }

    #[test]
    fn find_property_ignores_plain_parameters() {
        let class = ClassDecl {
            name: "Details".into(),
            parameters: vec![Parameter {
                name: "type".into(),
                binding: None,
                ..Parameter::default()
            }],
            ..ClassDecl::default()
        };
        assert!(class.find_property("type").is_none());
    }
}
