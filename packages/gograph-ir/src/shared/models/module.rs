//! Module-level records

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Function, GographError, SourceFile, Struct, Variable};

/// `require` entry of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub path: String,
    pub version: String,
    pub indirect: bool,
}

impl Dependency {
    pub fn new(path: impl Into<String>, version: impl Into<String>, indirect: bool) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            indirect,
        }
    }
}

/// `replace` entry of a manifest; versions are empty when omitted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplaceRule {
    pub old_path: String,
    pub old_version: String,
    pub new_path: String,
    pub new_version: String,
}

impl ReplaceRule {
    /// Targets without a version are local directories
    pub fn is_local(&self) -> bool {
        self.new_version.is_empty()
    }
}

/// A file whose contribution was dropped
#[derive(Debug, Clone, Serialize)]
pub struct FileWarning {
    /// Path relative to the module root
    pub path: String,
    pub error: GographError,
}

/// One discovered module and everything extracted from it
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    /// Canonical module path from the manifest; empty when the manifest failed
    pub path: String,
    pub dir: PathBuf,
    pub go_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<String>,
    pub requires: Vec<Dependency>,
    pub replaces: Vec<ReplaceRule>,
    /// Import paths of non-test files, in walk order
    pub imports: Vec<String>,
    pub files: Vec<SourceFile>,
    pub pkg_functions: BTreeMap<String, Vec<Function>>,
    pub pkg_variables: BTreeMap<String, Vec<Variable>>,
    pub pkg_structs: BTreeMap<String, Vec<Struct>>,
    pub warnings: Vec<FileWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GographError>,
}

impl Module {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: String::new(),
            dir: dir.into(),
            go_version: String::new(),
            toolchain: None,
            requires: Vec::new(),
            replaces: Vec::new(),
            imports: Vec::new(),
            files: Vec::new(),
            pkg_functions: BTreeMap::new(),
            pkg_variables: BTreeMap::new(),
            pkg_structs: BTreeMap::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: GographError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Package path for a file directory relative to the module root
    pub fn package_path(&self, rel_dir: &str) -> String {
        if rel_dir.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, rel_dir)
        }
    }

    /// Add a file and append its declarations under its package key
    pub fn merge_file(
        &mut self,
        file: SourceFile,
        functions: Vec<Function>,
        variables: Vec<Variable>,
        structs: Vec<Struct>,
    ) {
        let package = file.package.clone();
        self.pkg_functions
            .entry(package.clone())
            .or_default()
            .extend(functions);
        self.pkg_variables
            .entry(package.clone())
            .or_default()
            .extend(variables);
        self.pkg_structs.entry(package).or_default().extend(structs);
        self.files.push(file);
    }

    pub fn add_warning(&mut self, path: impl Into<String>, error: GographError) {
        self.warnings.push(FileWarning {
            path: path.into(),
            error,
        });
    }

    /// Package paths of all owned files
    pub fn packages(&self) -> BTreeSet<&str> {
        self.files.iter().map(|f| f.package.as_str()).collect()
    }

    pub fn functions(&self, package: &str) -> &[Function] {
        self.pkg_functions
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn variables(&self, package: &str) -> &[Variable] {
        self.pkg_variables
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn structs(&self, package: &str) -> &[Struct] {
        self.pkg_structs
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn file(&self, rel_path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.rel_path == rel_path)
    }

    /// Functions declared in one file, in offset order
    pub fn file_functions<'a>(&'a self, rel_path: &'a str) -> impl Iterator<Item = &'a Function> + 'a {
        self.pkg_functions
            .values()
            .flatten()
            .filter(move |f| f.file == rel_path)
    }

    pub fn all_functions(&self) -> impl Iterator<Item = &Function> {
        self.pkg_functions.values().flatten()
    }

    pub fn function_count(&self) -> usize {
        self.pkg_functions.values().map(Vec::len).sum()
    }
}
