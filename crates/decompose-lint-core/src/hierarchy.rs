//! File-local supertype resolution.

use std::collections::{HashMap, HashSet};

use crate::syntax::{ClassDecl, Declaration, KtFile};

/// Index of the classes declared in one file, used to follow supertype
/// chains that stay inside the file.
///
/// Types declared elsewhere cannot be resolved; for those only the name
/// written in the supertype list is known.
#[derive(Debug, Default)]
pub struct TypeHierarchy<'a> {
    classes: HashMap<&'a str, &'a ClassDecl>,
}

impl<'a> TypeHierarchy<'a> {
    /// Indexes every class declared in `file`, including nested ones.
    #[must_use]
    pub fn new(file: &'a KtFile) -> Self {
        let mut classes = HashMap::new();
        index(&file.declarations, &mut classes);
        Self { classes }
    }

    /// Class declared in this file under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a ClassDecl> {
        self.classes.get(name).copied()
    }

    /// Whether `class` inherits, directly or through classes declared in
    /// this file, from a type whose name ends with `suffix`.
    ///
    /// Supertypes not declared in the file fall back to the name check
    /// alone.
    #[must_use]
    pub fn inherits_suffix(&self, class: &ClassDecl, suffix: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&str> = class.supertypes.iter().map(|t| t.simple_name()).collect();

        while let Some(name) = pending.pop() {
            if name.ends_with(suffix) {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            if let Some(parent) = self.get(name) {
                pending.extend(parent.supertypes.iter().map(|t| t.simple_name()));
            }
        }
        false
    }
}

fn index<'a>(declarations: &'a [Declaration], out: &mut HashMap<&'a str, &'a ClassDecl>) {
    for decl in declarations {
        match decl {
            Declaration::Class(c) => {
                out.entry(c.name.as_str()).or_insert(c);
                index(&c.declarations, out);
            }
            Declaration::Object(o) => index(&o.declarations, out),
            Declaration::Function(_) | Declaration::Property(_) => {}
        }
    }
}
