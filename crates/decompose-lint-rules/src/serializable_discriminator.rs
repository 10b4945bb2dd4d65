//! Rule to forbid properties that collide with the class discriminator.
//!
//! # Rationale
//!
//! Polymorphic serialization in kotlinx.serialization writes the subtype
//! name under a discriminator key (`"type"` by default). A subtype that
//! also serializes a property under that key produces JSON that fails to
//! encode at runtime.
//!
//! # Detected Patterns
//!
//! For `@Serializable sealed` classes and interfaces, each `@Serializable`
//! subtype declared in the same file (top-level) or nested in the sealed
//! class is checked for:
//!
//! - a property named like the discriminator
//! - a `val`/`var` constructor property annotated `@SerialName("<discriminator>")`
//!
//! # Allowed Patterns
//!
//! - `@SerialName("t") val type: String` (renamed away from the discriminator)
//! - Non-sealed serializable classes
//! - Files that do not import `kotlinx.serialization.Serializable`
//!
//! # Configuration
//!
//! - `classDiscriminator`: discriminator key, default `"type"`

use decompose_lint_core::query::{find_annotation, has_annotation, has_import};
use decompose_lint_core::syntax::{Annotation, AnnotationArg, ArgValue, ClassDecl, Span};
use decompose_lint_core::{
    Config, ConfigError, Debt, FileContext, Finding, Issue, Location, Rule, Severity,
};
use tracing::trace;

/// Rule identifier.
pub const ID: &str = "SerializableDiscriminatorRule";

/// Configuration key of the discriminator name.
pub const CLASS_DISCRIMINATOR_KEY: &str = "classDiscriminator";

/// Discriminator used by kotlinx.serialization unless configured otherwise.
pub const DEFAULT_CLASS_DISCRIMINATOR: &str = "type";

/// Documentation on polymorphic serialization.
pub const DOC_REF: &str =
    "https://github.com/Kotlin/kotlinx.serialization/blob/master/docs/polymorphism.md";

const SERIALIZABLE: &str = "@Serializable";
const SERIALIZABLE_IMPORT: &str = "kotlinx.serialization.Serializable";
const SERIAL_NAME: &str = "SerialName";
const SERIAL_NAME_IMPORT: &str = "kotlinx.serialization.SerialName";

/// Reports serializable subtypes whose properties collide with the class
/// discriminator of their sealed parent.
#[derive(Debug, Clone)]
pub struct SerializableDiscriminatorRule {
    issue: Issue,
    class_discriminator: String,
    /// `@SerialName("<class_discriminator>")`.
    alias: Annotation,
}

impl Default for SerializableDiscriminatorRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializableDiscriminatorRule {
    /// Creates the rule with the default `"type"` discriminator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_class_discriminator(DEFAULT_CLASS_DISCRIMINATOR)
    }

    /// Creates the rule for a custom discriminator.
    #[must_use]
    pub fn with_class_discriminator(class_discriminator: impl Into<String>) -> Self {
        let class_discriminator = class_discriminator.into();
        let alias = Annotation {
            use_site: None,
            name: SERIAL_NAME.to_owned(),
            arguments: vec![AnnotationArg {
                name: None,
                value: ArgValue::Str(class_discriminator.clone()),
            }],
            span: Span::default(),
        };
        Self {
            issue: Issue::new(
                ID,
                Severity::CodeSmell,
                "Property collides with the class discriminator of a polymorphic serializable class",
                Debt::FIVE_MINS,
            ),
            class_discriminator,
            alias,
        }
    }

    /// Creates the rule from the `[rules.SerializableDiscriminatorRule]`
    /// section of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `classDiscriminator` is not
    /// a non-empty string.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let discriminator = match config.rule(ID) {
            Some(rule) => rule.require_str(ID, CLASS_DISCRIMINATOR_KEY, DEFAULT_CLASS_DISCRIMINATOR)?,
            None => DEFAULT_CLASS_DISCRIMINATOR.to_owned(),
        };
        Ok(Self::with_class_discriminator(discriminator))
    }

    /// The configured discriminator.
    #[must_use]
    pub fn class_discriminator(&self) -> &str {
        &self.class_discriminator
    }

    fn is_serializable_import_missing(ctx: &FileContext<'_>) -> bool {
        if has_import(ctx.file, SERIALIZABLE_IMPORT) {
            return false;
        }
        trace!("{} does not import {SERIALIZABLE_IMPORT}", ctx.path().display());
        true
    }

    fn is_polymorphic_root(class: &ClassDecl) -> bool {
        class.is_sealed() && has_annotation(class, SERIALIZABLE)
    }

    fn has_collision(&self, ctx: &FileContext<'_>, candidate: &ClassDecl) -> bool {
        let serial_name_imported = has_import(ctx.file, SERIAL_NAME_IMPORT);

        if serial_name_imported
            && candidate
                .property_parameters()
                .any(|p| p.annotations.contains(&self.alias))
        {
            return true;
        }

        let Some(property) = candidate.find_property(&self.class_discriminator) else {
            return false;
        };
        let renamed = find_annotation(&property, SERIAL_NAME).is_some_and(|a| *a != self.alias);
        !(renamed && serial_name_imported)
    }

    fn check(&self, ctx: &FileContext<'_>, candidate: &ClassDecl) -> Option<Finding> {
        if !self.has_collision(ctx, candidate) {
            return None;
        }
        let location = Location::from_span(ctx.path().to_path_buf(), candidate.name_span);
        let message = format!(
            "Do not name properties in polymorphic serializable classes as a class discriminator: {}",
            self.class_discriminator
        );
        Some(Finding::for_issue(&self.issue, location, message).with_doc_ref(DOC_REF))
    }
}

impl Rule for SerializableDiscriminatorRule {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_file(&self, ctx: &FileContext<'_>) -> Vec<Finding> {
        if Self::is_serializable_import_missing(ctx) {
            return Vec::new();
        }

        let classes: Vec<&ClassDecl> = ctx.file.classes().collect();
        let mut findings = Vec::new();
        for root in classes.iter().filter(|c| Self::is_polymorphic_root(c)) {
            for candidate in &classes {
                if std::ptr::eq(*candidate, *root)
                    || !candidate.is_direct_subtype_of(&root.name)
                    || !has_annotation(*candidate, SERIALIZABLE)
                {
                    continue;
                }
                findings.extend(self.check(ctx, candidate));
            }
        }
        findings
    }

    fn visit_class(&self, ctx: &FileContext<'_>, class: &ClassDecl) -> Vec<Finding> {
        if !Self::is_polymorphic_root(class) || Self::is_serializable_import_missing(ctx) {
            return Vec::new();
        }
        class
            .nested_classes()
            .filter(|nested| has_annotation(*nested, SERIALIZABLE))
            .filter_map(|nested| self.check(ctx, nested))
            .collect()
    }
}
