//! Output of visiting one file

use serde::Serialize;

use crate::features::type_resolution::domain::ImportTable;
use crate::shared::models::{Function, Import, Struct, Variable};

/// Declarations of a single file
///
/// Self-contained: nothing here refers to another file, so extractions can
/// be produced concurrently and merged by one owner afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileExtraction {
    pub package: String,
    /// Path relative to the module root, `/`-separated
    pub rel_path: String,
    pub imports: Vec<Import>,
    /// Named functions, methods and literals, ascending by start offset
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
    pub structs: Vec<Struct>,
}

impl FileExtraction {
    pub fn new(package: impl Into<String>, rel_path: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            rel_path: rel_path.into(),
            ..Self::default()
        }
    }

    pub fn import_table(&self) -> ImportTable {
        self.imports.iter().collect()
    }

    pub fn import_paths(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(|i| i.path.as_str())
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn struct_named(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}
