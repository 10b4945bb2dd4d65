//! Core types for rule classification and findings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::syntax::Span;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Advisory finding about a maintainability or correctness smell.
    CodeSmell,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::CodeSmell => write!(f, "code-smell"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Estimated remediation cost of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Debt {
    /// Minutes needed to fix one occurrence.
    pub mins: u32,
}

impl Debt {
    /// One minute of work.
    pub const ONE_MIN: Self = Self { mins: 1 };
    /// Five minutes of work.
    pub const FIVE_MINS: Self = Self { mins: 5 };

    /// Creates a debt estimate in minutes.
    #[must_use]
    pub const fn mins(mins: u32) -> Self {
        Self { mins }
    }
}

impl std::fmt::Display for Debt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.mins)
    }
}

/// Static classification of a rule: what it reports and how costly a fix is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Rule identifier (e.g., `"SerializableDiscriminatorRule"`).
    pub id: String,
    /// Severity of findings reported under this issue.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
    /// Remediation cost per finding.
    pub debt: Debt,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        debt: Debt,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            description: description.into(),
            debt,
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the analyzed file.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a location from a syntax span.
    #[must_use]
    pub fn from_span(file: PathBuf, span: Span) -> Self {
        Self {
            file,
            line: span.line,
            column: span.column,
            offset: span.start,
            length: span.len(),
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }
}

/// A lint finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule identifier (e.g., `"DecomposeComponentContextRule"`).
    pub rule: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Primary location of the finding.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Reference to external documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            doc_ref: None,
        }
    }

    /// Creates a finding classified by `issue`.
    #[must_use]
    pub fn for_issue(issue: &Issue, location: Location, message: impl Into<String>) -> Self {
        Self::new(issue.id.clone(), issue.severity, location, message)
    }

    /// Adds a documentation reference to this finding.
    #[must_use]
    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.rule,
            self.message
        )?;
        if let Some(doc_ref) = &self.doc_ref {
            write!(f, " (see: {doc_ref})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding() -> Finding {
        Finding::new(
            "SerializableDiscriminatorRule",
            Severity::CodeSmell,
            Location::new(PathBuf::from("Config.kt"), 12, 5),
            "Do not name properties as a class discriminator: type",
        )
    }

    #[test]
    fn finding_new_has_no_doc_ref() {
        assert!(make_finding().doc_ref.is_none());
    }

    #[test]
    fn finding_display_includes_doc_ref() {
        let f = make_finding().with_doc_ref("polymorphism.md");
        insta::assert_snapshot!(
            f.to_string(),
            @"Config.kt:12:5: code-smell [SerializableDiscriminatorRule] Do not name properties as a class discriminator: type (see: polymorphism.md)"
        );
    }

    #[test]
    fn finding_display_omits_doc_ref_when_none() {
        assert!(!make_finding().to_string().contains("see:"));
    }

    #[test]
    fn finding_for_issue_copies_classification() {
        let issue = Issue::new("Rule", Severity::CodeSmell, "desc", Debt::ONE_MIN);
        let f = Finding::for_issue(&issue, Location::new(PathBuf::from("A.kt"), 1, 1), "m");
        assert_eq!(f.rule, "Rule");
        assert_eq!(f.severity, Severity::CodeSmell);
    }

    #[test]
    fn location_from_span_carries_offsets() {
        let span = Span::new(10, 25, 2, 3);
        let loc = Location::from_span(PathBuf::from("A.kt"), span);
        assert_eq!((loc.line, loc.column), (2, 3));
        assert_eq!((loc.offset, loc.length), (10, 15));
    }

    #[test]
    fn severity_serializes_kebab_case() {
        let json = serde_json::to_string(&Severity::CodeSmell).unwrap();
        assert_eq!(json, "\"code-smell\"");
        assert!(Severity::CodeSmell < Severity::Warning);
    }

    #[test]
    fn finding_json_skips_missing_doc_ref() {
        let json = serde_json::to_value(make_finding()).unwrap();
        assert_eq!(json["rule"], "SerializableDiscriminatorRule");
        assert_eq!(json["location"]["line"], 12);
        assert!(json.get("doc_ref").is_none());
    }
}
