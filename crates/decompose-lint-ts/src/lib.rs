//! # decompose-lint-ts
//!
//! Tree-sitter frontend for decompose-lint.
//!
//! This crate turns Kotlin source text into the owned syntax model of
//! `decompose-lint-core` so that rule sets can run on real files:
//!
//! - [`LanguageFrontend`] trait for pluggable grammars
//! - [`KotlinFrontend`] lowering `tree-sitter-kotlin-ng` trees into a
//!   [`KtFile`](decompose_lint_core::syntax::KtFile)
//!
//! ## Example
//!
//! ```ignore
//! use decompose_lint_ts::{KotlinFrontend, LanguageFrontend};
//!
//! let file = KotlinFrontend::new().parse(path, &source)?;
//! let findings = rule_set.check(&file);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod frontend;
pub mod kotlin;

pub use frontend::{LanguageFrontend, ParseError};
pub use kotlin::KotlinFrontend;
