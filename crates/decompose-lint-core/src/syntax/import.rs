//! Import directives as path segments.

use super::Span;

/// An import directive such as `import kotlinx.serialization.Serializable`.
#[derive(Debug, Clone)]
pub struct ImportDirective {
    /// Imported path segments.
    pub path: Vec<String>,
    /// Alias from `import a.B as C`.
    pub alias: Option<String>,
    /// `import a.b.*`.
    pub wildcard: bool,
    /// Span of the directive.
    pub span: Span,
}

impl PartialEq for ImportDirective {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.alias == other.alias && self.wildcard == other.wildcard
    }
}

impl Eq for ImportDirective {}

impl ImportDirective {
    /// Parses an import directive. The leading `import` keyword is optional.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_end_matches(';');
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.first() == Some(&"import") {
            tokens.remove(0);
        }

        let (path_tokens, alias) = match tokens.iter().position(|t| *t == "as") {
            Some(i) => (&tokens[..i], Some((*tokens.get(i + 1)?).to_owned())),
            None => (&tokens[..], None),
        };

        let mut path = path_tokens.concat();
        let wildcard = path.ends_with(".*");
        if wildcard {
            path.truncate(path.len() - 2);
        }

        let path: Vec<String> = path
            .split('.')
            .map(|s| s.trim_matches('`').to_owned())
            .collect();
        if path.iter().any(String::is_empty) {
            return None;
        }

        Some(Self {
            path,
            alias,
            wildcard,
            span: Span::default(),
        })
    }

    /// Sets the span of this directive.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Dotted import path (`kotlinx.serialization.Serializable`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.path.join(".")
    }
}
