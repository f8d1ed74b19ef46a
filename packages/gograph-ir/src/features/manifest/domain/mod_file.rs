//! Parsed `go.mod` contents

use serde::{Deserialize, Serialize};

use crate::shared::models::{Dependency, ReplaceRule};

/// Manifest of one module, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModFile {
    pub module_path: String,
    /// Language version from the `go` directive; empty when absent
    pub go_version: String,
    pub toolchain: Option<String>,
    pub requires: Vec<Dependency>,
    pub replaces: Vec<ReplaceRule>,
}

impl ModFile {
    pub fn new(module_path: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            ..Self::default()
        }
    }

    pub fn direct_requires(&self) -> impl Iterator<Item = &Dependency> {
        self.requires.iter().filter(|d| !d.indirect)
    }

    /// Replacement target for a module path, if any
    pub fn replacement(&self, path: &str) -> Option<&ReplaceRule> {
        self.replaces.iter().find(|r| r.old_path == path)
    }
}
