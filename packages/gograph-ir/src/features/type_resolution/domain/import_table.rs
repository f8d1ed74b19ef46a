//! Per-file import-alias table

use std::collections::BTreeMap;

use crate::shared::models::Import;

/// Local alias → full import path; owned by exactly one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    aliases: BTreeMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later imports with the same alias overwrite earlier ones
    pub fn insert(&mut self, import: &Import) {
        self.aliases
            .insert(import.alias.clone(), import.path.clone());
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<'a> FromIterator<&'a Import> for ImportTable {
    fn from_iter<I: IntoIterator<Item = &'a Import>>(iter: I) -> Self {
        let mut table = ImportTable::new();
        for import in iter {
            table.insert(import);
        }
        table
    }
}
