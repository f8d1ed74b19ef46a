//! Type resolver
//!
//! Maps a type expression to its display signature and canonical base type.
//! A `pkg.T` base whose `pkg` is a known alias is rewritten to the full
//! import path, in the base type and by substring replacement in the display.

use serde::{Deserialize, Serialize};

use crate::features::type_resolution::domain::{ImportTable, TypeExpr};

/// Display + base pair after alias rewriting
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    pub display: String,
    pub base: String,
}

impl ResolvedType {
    pub fn new(display: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            base: base.into(),
        }
    }
}

pub struct TypeResolver<'a> {
    imports: &'a ImportTable,
}

impl<'a> TypeResolver<'a> {
    pub fn new(imports: &'a ImportTable) -> Self {
        Self { imports }
    }

    pub fn resolve(&self, expr: &TypeExpr) -> ResolvedType {
        let display = expr.display();
        let raw_base = expr.base();

        match raw_base {
            TypeExpr::Qualified { package, name } => match self.imports.resolve(package) {
                Some(path) => {
                    let raw = raw_base.display();
                    let resolved = format!("{path}.{name}");
                    ResolvedType::new(display.replace(&raw, &resolved), resolved)
                }
                None => ResolvedType::new(display, raw_base.display()),
            },
            _ => ResolvedType::new(display, raw_base.display()),
        }
    }

    /// Resolve an optional type; absent types render empty
    pub fn resolve_opt(&self, expr: Option<&TypeExpr>) -> ResolvedType {
        expr.map(|e| self.resolve(e)).unwrap_or_default()
    }
}
