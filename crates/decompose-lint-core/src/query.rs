//! Tree query helpers shared by rules.
//!
//! All lookups are total: absence is reported as `None`/`false`.

use crate::syntax::{Annotated, Annotation, Block, CallExpr, ClassDecl, ImportDirective, KtFile};

/// Depth-first search for the first call named `name` under `block`.
///
/// Calls are visited in source order, each call before the calls in its
/// receiver, arguments and trailing lambdas. Only the first match is
/// returned.
#[must_use]
pub fn find_call<'a>(block: &'a Block, name: &str) -> Option<&'a CallExpr> {
    block.calls.iter().find_map(|call| find_in_call(call, name))
}

fn find_in_call<'a>(call: &'a CallExpr, name: &str) -> Option<&'a CallExpr> {
    if call.callee == name {
        return Some(call);
    }
    call.nested
        .iter()
        .find_map(|c| find_in_call(c, name))
        .or_else(|| call.lambdas.iter().find_map(|b| find_call(b, name)))
}

/// Whether `file` contains exactly the import `import`.
///
/// `import` may be written with or without the leading keyword. Aliased and
/// wildcard imports never match a plain import.
#[must_use]
pub fn has_import(file: &KtFile, import: &str) -> bool {
    let Some(expected) = ImportDirective::parse(import) else {
        return false;
    };
    file.imports.iter().any(|i| *i == expected)
}

/// Whether `decl` carries an annotation equal to `marker`, e.g. `@Composable`.
#[must_use]
pub fn has_annotation<A: Annotated + ?Sized>(decl: &A, marker: &str) -> bool {
    let Some(expected) = Annotation::parse(marker) else {
        return false;
    };
    decl.annotations().iter().any(|a| *a == expected)
}

/// First annotation on `decl` written `@<name>`, regardless of arguments.
///
/// Annotations with a use-site target (`@field:SerialName(..)`) are skipped.
#[must_use]
pub fn find_annotation<'a, A: Annotated + ?Sized>(decl: &'a A, name: &str) -> Option<&'a Annotation> {
    decl.annotations()
        .iter()
        .find(|a| a.name == name && a.use_site.is_none())
}

/// Whether a direct supertype of `class` has a name ending with `suffix`.
///
/// Purely syntactic: `class Main : BaseScreen()` does not match `"Activity"`
/// even if `BaseScreen` extends an activity. See
/// [`TypeHierarchy`](crate::TypeHierarchy) for file-local resolution.
#[must_use]
pub fn supertype_ends_with(class: &ClassDecl, suffix: &str) -> bool {
    class
        .supertypes
        .iter()
        .any(|t| t.simple_name().ends_with(suffix))
}
