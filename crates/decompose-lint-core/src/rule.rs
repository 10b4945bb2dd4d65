//! Rule trait for defining lint rules.

use crate::context::{FileContext, FunctionScope};
use crate::syntax::ClassDecl;
use crate::types::{Finding, Issue};

/// A per-file lint rule over the Kotlin syntax model.
///
/// Rules are visitors: the [`RuleSet`](crate::RuleSet) walks each file and
/// calls the hooks a rule overrides. Every hook returns the findings for
/// that node; the default implementations report nothing.
///
/// # Example
///
/// ```ignore
/// use decompose_lint_core::{FileContext, Finding, FunctionScope, Issue, Rule};
///
/// pub struct NoEmptyFunctions { issue: Issue }
///
/// impl Rule for NoEmptyFunctions {
///     fn issue(&self) -> &Issue { &self.issue }
///
///     fn visit_function(&self, ctx: &FileContext<'_>, scope: FunctionScope<'_>) -> Vec<Finding> {
///         // ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Classification of findings reported by this rule.
    fn issue(&self) -> &Issue;

    /// Stable rule identifier (e.g., `"SerializableDiscriminatorRule"`).
    fn id(&self) -> &str {
        &self.issue().id
    }

    /// Called once per file, after all declarations have been visited.
    fn visit_file(&self, _ctx: &FileContext<'_>) -> Vec<Finding> {
        Vec::new()
    }

    /// Called once per class or interface declaration, after its members.
    fn visit_class(&self, _ctx: &FileContext<'_>, _class: &ClassDecl) -> Vec<Finding> {
        Vec::new()
    }

    /// Called once per function declaration.
    fn visit_function(&self, _ctx: &FileContext<'_>, _scope: FunctionScope<'_>) -> Vec<Finding> {
        Vec::new()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
