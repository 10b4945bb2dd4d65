//! Language frontend trait.
//!
//! `LanguageFrontend` is the extension point between source text and the
//! syntax model in `decompose-lint-core`. Implement it to lower another
//! Tree-sitter grammar into a [`KtFile`].

use std::path::Path;

use decompose_lint_core::syntax::KtFile;

/// Errors raised while setting up or running a parser.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar is incompatible with the linked tree-sitter runtime.
    #[error("failed to load {language} grammar: {source}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying tree-sitter error.
        source: tree_sitter::LanguageError,
    },
    /// The parser produced no tree (cancelled or timed out).
    #[error("parser produced no syntax tree for {path}")]
    NoTree {
        /// Path of the file being parsed.
        path: String,
    },
}

/// Trait for language-specific Tree-sitter lowering.
///
/// Syntax errors inside the source are tolerated: the frontend lowers what
/// it recognizes and skips the rest.
pub trait LanguageFrontend: Send + Sync {
    /// Language identifier (e.g., `"kotlin"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this frontend handles (e.g., `&[".kt", ".kts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` and lowers it into the syntax model.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be set up or yields no tree.
    fn parse(&self, path: &Path, source: &str) -> Result<KtFile, ParseError>;
}
