//! Rule sets: named groups of rules exposed to a host.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::context::{FileContext, FunctionScope};
use crate::rule::{Rule, RuleBox};
use crate::syntax::{ClassDecl, Declaration, KtFile};
use crate::types::{Finding, Severity};

/// Builds a [`RuleSet`] from configuration.
pub trait RuleSetProvider {
    /// Identifier of the provided rule set.
    fn rule_set_id(&self) -> &'static str;

    /// Instantiates the rule set's active rules.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule option is invalid.
    fn instance(&self, config: &Config) -> Result<RuleSet, ConfigError>;
}

/// A named, ordered group of rules.
pub struct RuleSet {
    id: String,
    rules: Vec<RuleBox>,
    severity_overrides: HashMap<String, Severity>,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("id", &self.id)
            .field("rules", &self.rule_ids())
            .finish_non_exhaustive()
    }
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rules: Vec::new(),
            severity_overrides: HashMap::new(),
        }
    }

    /// Creates a rule set from candidate rules, keeping those `config`
    /// marks active and recording severity overrides.
    #[must_use]
    pub fn from_config(id: impl Into<String>, config: &Config, rules: Vec<RuleBox>) -> Self {
        let mut set = Self::new(id);
        for rule in rules {
            if !config.is_rule_active(rule.id()) {
                debug!("Skipping inactive rule: {}", rule.id());
                continue;
            }
            if let Some(severity) = config.rule_severity(rule.id()) {
                set.severity_overrides.insert(rule.id().to_owned(), severity);
            }
            set.rules.push(rule);
        }
        set
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rule set identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registered rules in execution order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Identifiers of the registered rules.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Runs every rule over one file.
    ///
    /// Findings are returned per rule in registration order, and within a
    /// rule in visitation order: declarations depth-first with each class
    /// hook after its members, then the file hook.
    #[must_use]
    pub fn check(&self, file: &KtFile) -> Vec<Finding> {
        let ctx = FileContext::new(file);
        let mut findings = Vec::new();

        for rule in &self.rules {
            let mut found = Vec::new();
            visit_declarations(rule.as_ref(), &ctx, &file.declarations, None, &mut found);
            found.extend(rule.visit_file(&ctx));

            if let Some(severity) = self.severity_overrides.get(rule.id()) {
                for f in &mut found {
                    f.severity = *severity;
                }
            }

            if !found.is_empty() {
                debug!(
                    "{} reported {} finding(s) in {}",
                    rule.id(),
                    found.len(),
                    file.path.display()
                );
            }
            findings.extend(found);
        }

        findings
    }
}

fn visit_declarations<'a>(
    rule: &dyn Rule,
    ctx: &FileContext<'a>,
    declarations: &'a [Declaration],
    enclosing: Option<&'a ClassDecl>,
    out: &mut Vec<Finding>,
) {
    for decl in declarations {
        match decl {
            Declaration::Class(class) => {
                visit_declarations(rule, ctx, &class.declarations, Some(class), out);
                out.extend(rule.visit_class(ctx, class));
            }
            Declaration::Object(object) => {
                visit_declarations(rule, ctx, &object.declarations, enclosing, out);
            }
            Declaration::Function(function) => {
                let scope = FunctionScope {
                    function,
                    containing_class: enclosing,
                };
                out.extend(rule.visit_function(ctx, scope));
            }
            Declaration::Property(_) => {}
        }
    }
}
