//! Structured annotation entries.
//!
//! Annotations are compared by name and argument list rather than by raw
//! text, so `@SerialName( "type" )` and `@SerialName("type")` are equal.

use super::Span;

/// Value of an annotation argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A plain string literal, unescaped (`"type"` becomes `type`).
    Str(String),
    /// Any other expression, with whitespace removed.
    Expr(String),
}

/// One annotation argument, optionally named (`value = "x"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationArg {
    /// Argument name for named arguments.
    pub name: Option<String>,
    /// Argument value.
    pub value: ArgValue,
}

/// An annotation entry such as `@Composable` or `@SerialName("type")`.
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Use-site target (`field` in `@field:SerialName("x")`).
    pub use_site: Option<String>,
    /// Annotation name as written (`Serializable`, `kotlinx.serialization.Serializable`).
    pub name: String,
    /// Arguments in source order.
    pub arguments: Vec<AnnotationArg>,
    /// Span of the annotation.
    pub span: Span,
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.use_site == other.use_site
            && self.name == other.name
            && self.arguments == other.arguments
    }
}

impl Eq for Annotation {}

impl Annotation {
    /// Parses annotation text such as `@SerialName("type")`.
    ///
    /// Returns `None` for text that is not a single annotation entry.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().strip_prefix('@')?;
        let (head, args) = match text.find('(') {
            Some(open) => {
                let close = text.rfind(')')?;
                if close < open || !text[close + 1..].trim().is_empty() {
                    return None;
                }
                (&text[..open], Some(&text[open + 1..close]))
            }
            None => (text, None),
        };

        let head: String = head.chars().filter(|c| !c.is_whitespace()).collect();
        let (use_site, name) = match head.split_once(':') {
            Some((site, name)) => (Some(site.to_owned()), name.to_owned()),
            None => (None, head),
        };
        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }

        let arguments = match args {
            Some(args) => split_top_level(args)
                .into_iter()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(parse_argument)
                .collect(),
            None => Vec::new(),
        };

        Some(Self {
            use_site,
            name,
            arguments,
            span: Span::default(),
        })
    }

    /// Sets the span of this annotation.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The single positional string argument, e.g. `type` for `@SerialName("type")`.
    #[must_use]
    pub fn string_argument(&self) -> Option<&str> {
        match self.arguments.as_slice() {
            [AnnotationArg {
                value: ArgValue::Str(s),
                ..
            }] => Some(s),
            _ => None,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '`'
}

/// Splits on commas that are outside string literals and brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn parse_argument(text: &str) -> AnnotationArg {
    let (name, value) = match split_named(text) {
        Some((name, value)) => (Some(name.to_owned()), value),
        None => (None, text),
    };
    let value = match string_literal(value) {
        Some(s) => ArgValue::Str(s),
        None => ArgValue::Expr(value.chars().filter(|c| !c.is_whitespace()).collect()),
    };
    AnnotationArg { name, value }
}

/// Splits `name = value`, ignoring `==` and `=` inside string literals.
fn split_named(text: &str) -> Option<(&str, &str)> {
    let eq = text.find('=')?;
    if text[..eq].contains('"') || text[eq + 1..].starts_with('=') {
        return None;
    }
    let name = text[..eq].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, text[eq + 1..].trim()))
}

/// Unescapes a plain `"..."` literal. Raw strings and templates are not literals here.
fn string_literal(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    if inner.starts_with('"') {
        return None;
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                other => out.push(other),
            },
            '"' | '$' => return None,
            _ => out.push(c),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marker_annotation() {
        let a = Annotation::parse("@Composable").unwrap();
        assert_eq!(a.name, "Composable");
        assert!(a.arguments.is_empty());
        assert!(a.use_site.is_none());
    }

    #[test]
    fn parses_string_argument() {
        let a = Annotation::parse("@SerialName(\"type\")").unwrap();
        assert_eq!(a.name, "SerialName");
        assert_eq!(a.string_argument(), Some("type"));
    }

    #[test]
    fn whitespace_does_not_matter() {
        let a = Annotation::parse("@SerialName( \"type\" )").unwrap();
        let b = Annotation::parse("@SerialName(\"type\")").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            Annotation::parse("@Composable()"),
            Annotation::parse("@Composable")
        );
    }

    #[test]
    fn different_arguments_are_not_equal() {
        let a = Annotation::parse("@SerialName(\"t\")").unwrap();
        let b = Annotation::parse("@SerialName(\"type\")").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn parses_use_site_target() {
        let a = Annotation::parse("@field:SerialName(\"type\")").unwrap();
        assert_eq!(a.use_site.as_deref(), Some("field"));
        assert_eq!(a.name, "SerialName");
        assert_ne!(a, Annotation::parse("@SerialName(\"type\")").unwrap());
    }

    #[test]
    fn parses_named_and_expression_arguments() {
        let a = Annotation::parse("@Serializable(with = Foo :: class)").unwrap();
        assert_eq!(a.arguments.len(), 1);
        assert_eq!(a.arguments[0].name.as_deref(), Some("with"));
        assert_eq!(a.arguments[0].value, ArgValue::Expr("Foo::class".into()));
        assert!(a.string_argument().is_none());
    }

    #[test]
    fn commas_inside_literals_do_not_split() {
        let a = Annotation::parse("@Suppress(\"a, b\", \"c\")").unwrap();
        assert_eq!(a.arguments.len(), 2);
        assert_eq!(a.arguments[0].value, ArgValue::Str("a, b".into()));
    }

    #[test]
    fn templates_are_expressions() {
        let a = Annotation::parse("@SerialName(\"$prefix\")").unwrap();
        assert!(matches!(a.arguments[0].value, ArgValue::Expr(_)));
    }

    #[test]
    fn rejects_non_annotations() {
        assert!(Annotation::parse("SerialName(\"type\")").is_none());
        assert!(Annotation::parse("@").is_none());
        assert!(Annotation::parse("@Foo(\"x\"").is_none());
    }
}
