//! # decompose-lint-rules
//!
//! Lint rules for Android projects using Decompose and kotlinx.serialization.
//!
//! ## Available Rules
//!
//! | Id | Debt | Description |
//! |----|------|-------------|
//! | `DecomposeComponentContextRule` | 1min | Forbids `defaultComponentContext()` inside composition of an Activity or Fragment |
//! | `SerializableDiscriminatorRule` | 5min | Forbids properties named like the class discriminator in sealed serializable hierarchies |
//!
//! ## Usage
//!
//! ```ignore
//! use decompose_lint_core::{Config, RuleSetProvider};
//! use decompose_lint_rules::DecomposeRuleSetProvider;
//!
//! let config = Config::from_file(Path::new("decompose-lint.toml"))?;
//! let rules = DecomposeRuleSetProvider::new().instance(&config)?;
//! for finding in rules.check(&kt_file) {
//!     println!("{finding}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod component_context;
mod provider;
pub mod serializable_discriminator;

pub use component_context::DecomposeComponentContextRule;
pub use provider::{all_rules, DecomposeRuleSetProvider, RULE_SET_ID};
pub use serializable_discriminator::SerializableDiscriminatorRule;

/// Re-export core types for convenience.
pub use decompose_lint_core::{Finding, Rule, RuleSet, RuleSetProvider, Severity};
