//! Context types for rule execution.

use std::path::Path;

use crate::hierarchy::TypeHierarchy;
use crate::syntax::{ClassDecl, FunctionDecl, KtFile};

/// Context provided to rules while one file is visited.
#[derive(Debug)]
pub struct FileContext<'a> {
    /// The file being analyzed.
    pub file: &'a KtFile,
    /// Classes declared in the file, for supertype resolution.
    pub hierarchy: TypeHierarchy<'a>,
}

impl<'a> FileContext<'a> {
    /// Creates a context for `file`.
    #[must_use]
    pub fn new(file: &'a KtFile) -> Self {
        Self {
            file,
            hierarchy: TypeHierarchy::new(file),
        }
    }

    /// Path of the file being analyzed.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        &self.file.path
    }
}

/// A function together with its nearest enclosing class.
#[derive(Debug, Clone, Copy)]
pub struct FunctionScope<'a> {
    /// The visited function.
    pub function: &'a FunctionDecl,
    /// Nearest enclosing class or interface; objects are skipped over.
    pub containing_class: Option<&'a ClassDecl>,
}
