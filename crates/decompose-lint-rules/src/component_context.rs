//! Rule to forbid creating a Decompose component context inside composition.
//!
//! # Rationale
//!
//! `defaultComponentContext()` attaches a new lifecycle and state keeper to
//! its Activity or Fragment. Calling it from composable code runs it again
//! on every recomposition and leaks the previous context. The context must
//! be created once, before `setContent`.
//!
//! # Detected Patterns
//!
//! Inside classes extending an `Activity` or a `Fragment`:
//!
//! - `defaultComponentContext()` in a `@Composable` function
//! - `defaultComponentContext()` in the first lambda of `setContent { }`,
//!   including `view.setContent { }` and nested calls such as
//!   `ComposeView(ctx).apply { setContent { } }`
//!
//! # Allowed Patterns
//!
//! - Creating the context before `setContent` and passing it down
//! - Files that do not import `com.arkivanov.decompose.defaultComponentContext`
//!
//! At most one finding is reported per function.

use decompose_lint_core::query::{find_call, has_annotation, has_import};
use decompose_lint_core::syntax::{Block, CallExpr};
use decompose_lint_core::{
    Debt, FileContext, Finding, FunctionScope, Issue, Location, Rule, Severity,
};
use tracing::trace;

/// Rule identifier.
pub const ID: &str = "DecomposeComponentContextRule";

/// Finding message.
pub const MESSAGE: &str = "Avoid using defaultComponentContext inside Composable functions.";

const FACTORY: &str = "defaultComponentContext";
const FACTORY_IMPORT: &str = "com.arkivanov.decompose.defaultComponentContext";
const COMPOSABLE: &str = "@Composable";
const SET_CONTENT: &str = "setContent";
const UI_HOST_SUFFIXES: &[&str] = &["Activity", "Fragment"];

/// Reports `defaultComponentContext()` calls made from composition.
#[derive(Debug, Clone)]
pub struct DecomposeComponentContextRule {
    issue: Issue,
}

impl Default for DecomposeComponentContextRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DecomposeComponentContextRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issue: Issue::new(
                ID,
                Severity::CodeSmell,
                MESSAGE,
                Debt::ONE_MIN,
            ),
        }
    }

    fn leaked_call<'a>(body: &'a Block, composable: bool) -> Option<&'a CallExpr> {
        if composable {
            return find_call(body, FACTORY);
        }
        find_call(body, SET_CONTENT)
            .and_then(CallExpr::first_lambda)
            .and_then(|lambda| find_call(lambda, FACTORY))
    }
}

impl Rule for DecomposeComponentContextRule {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn visit_function(&self, ctx: &FileContext<'_>, scope: FunctionScope<'_>) -> Vec<Finding> {
        let Some(class) = scope.containing_class else {
            return Vec::new();
        };
        let is_ui_host = UI_HOST_SUFFIXES
            .iter()
            .any(|suffix| ctx.hierarchy.inherits_suffix(class, suffix));
        if !is_ui_host {
            return Vec::new();
        }
        if !has_import(ctx.file, FACTORY_IMPORT) {
            trace!("{} does not import {FACTORY}", ctx.path().display());
            return Vec::new();
        }

        let function = scope.function;
        let Some(body) = &function.body else {
            return Vec::new();
        };

        Self::leaked_call(body, has_annotation(function, COMPOSABLE))
            .map(|call| {
                let location = Location::from_span(ctx.path().to_path_buf(), call.span);
                vec![Finding::for_issue(&self.issue, location, MESSAGE)]
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decompose_lint_core::RuleSet;
    use decompose_lint_ts::{KotlinFrontend, LanguageFrontend};
    use std::path::Path;

    fn check_code(code: &str) -> Vec<Finding> {
        let file = KotlinFrontend::new()
            .parse(Path::new("MainActivity.kt"), code)
            .expect("Failed to parse");
        RuleSet::new("Test")
            .rule(DecomposeComponentContextRule::new())
            .check(&file)
    }

    #[test]
    fn test_detects_factory_in_activity_set_content() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainActivity : AppCompatActivity() {
    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContent {
            val root = DefaultRootComponent(defaultComponentContext())
            RootContent(root)
        }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, ID);
        assert_eq!(findings[0].message, MESSAGE);
        assert_eq!(findings[0].location.line, 8);
    }

    #[test]
    fn test_detects_factory_in_fragment_compose_view() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainFragment : Fragment() {
    override fun onCreateView(
        inflater: LayoutInflater,
        container: ViewGroup?,
        savedInstanceState: Bundle?,
    ): View = ComposeView(requireContext()).apply {
        setContent {
            val root = DefaultRootComponent(defaultComponentContext())
            RootContent(root)
        }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_detects_qualified_set_content() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainFragment : Fragment() {
    fun render(view: ComposeView) {
        view.setContent {
            RootContent(DefaultRootComponent(defaultComponentContext()))
        }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_detects_factory_in_set_content_with_arguments() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainActivity : ComponentActivity() {
    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContent(parent = null) {
            defaultComponentContext()
        }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.line, 8);
    }

    #[test]
    fn test_detects_factory_in_qualified_set_content_with_arguments() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainFragment : Fragment() {
    fun render(view: ComposeView) {
        view.setContent(null) {
            RootContent(DefaultRootComponent(defaultComponentContext()))
        }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_issue_description_matches_message() {
        assert_eq!(DecomposeComponentContextRule::new().issue().description, MESSAGE);
    }

    #[test]
    fn test_allows_factory_before_set_content() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainActivity : AppCompatActivity() {
    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        val root = DefaultRootComponent(defaultComponentContext())
        setContent {
            RootContent(root)
        }
    }
}
",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_allows_factory_before_compose_view() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainFragment : Fragment() {
    override fun onCreateView(
        inflater: LayoutInflater,
        container: ViewGroup?,
        savedInstanceState: Bundle?,
    ): View {
        val root = DefaultRootComponent(defaultComponentContext())
        return ComposeView(requireContext()).apply {
            setContent {
                RootContent(root)
            }
        }
    }
}
",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_detects_factory_in_composable_of_activity() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainActivity : AppCompatActivity() {
    @Composable
    fun RootContent() {
        val root = remember { DefaultRootComponent(defaultComponentContext()) }
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_detects_factory_in_composable_of_fragment() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainFragment : Fragment() {
    @Composable
    fun RootContent() {
        val context = defaultComponentContext()
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_requires_factory_import() {
        let findings = check_code(
            r"
class MainActivity : AppCompatActivity() {
    override fun onCreate(savedInstanceState: Bundle?) {
        setContent {
            val context = defaultComponentContext()
        }
    }
}
",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_ignores_non_ui_classes() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class RootPresenter : Presenter() {
    @Composable
    fun Render() {
        val context = defaultComponentContext()
    }
}

@Composable
fun TopLevel() {
    val context = defaultComponentContext()
}
",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_resolves_ui_host_through_file_local_base() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

abstract class BaseScreen : ComponentActivity()

class MainScreen : BaseScreen() {
    @Composable
    fun Content() {
        val context = defaultComponentContext()
    }
}
",
        );
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_reports_first_leak_only() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext

class MainActivity : AppCompatActivity() {
    @Composable
    fun Content() {
        val first = defaultComponentContext()
        val second = defaultComponentContext()
    }
}
",
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.line, 7);
    }

    #[test]
    fn test_aliased_import_is_not_detected() {
        let findings = check_code(
            r"
import com.arkivanov.decompose.defaultComponentContext as dcc

class MainActivity : AppCompatActivity() {
    @Composable
    fun Content() {
        val context = defaultComponentContext()
    }
}
",
        );
        assert!(findings.is_empty());
    }
}
