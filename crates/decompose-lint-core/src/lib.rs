//! # decompose-lint-core
//!
//! Core framework for Kotlin lint rules over an owned syntax model.
//!
//! This crate provides the foundational traits and types for building
//! rules. It includes:
//!
//! - [`syntax`] the per-file syntax model rules read
//! - [`query`] total lookup helpers over that model
//! - [`Rule`] visitor trait for per-file rules
//! - [`RuleSet`] and [`RuleSetProvider`] for exposing rules to a host
//! - [`Finding`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use decompose_lint_core::{Config, RuleSet};
//!
//! let rules = RuleSet::new("MyRuleSet").rule(MyRule::new());
//! let findings = rules.check(&kt_file);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod hierarchy;
mod registry;
mod rule;
mod types;

pub mod query;
pub mod syntax;

pub use config::{Config, ConfigError, RuleConfig, RuleSetConfig};
pub use context::{FileContext, FunctionScope};
pub use hierarchy::TypeHierarchy;
pub use registry::{RuleSet, RuleSetProvider};
pub use rule::{Rule, RuleBox};
pub use types::{Debt, Finding, Issue, Location, Severity};
