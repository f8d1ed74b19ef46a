//! Declaration records extracted from a single Go file

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Span;

/// Placeholder name for unnamed fields, parameters and results
pub const UNNAMED: &str = "_";

/// Variable, constant, field, parameter or result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub package: String,
    /// File path relative to the module root
    pub file: String,
    /// Fully rendered type (`*[]map[string]pkg/v2.Thing`)
    pub display_type: String,
    /// Innermost named type, import-qualified
    pub base_type: String,
    /// Initialiser text for package-level `const`/`var` specs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Verbatim spec text for package-level `const`/`var` specs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            file: file.into(),
            display_type: String::new(),
            base_type: String::new(),
            value: None,
            content: None,
            span: None,
        }
    }

    pub fn with_types(mut self, display_type: impl Into<String>, base_type: impl Into<String>) -> Self {
        self.display_type = display_type.into();
        self.base_type = base_type.into();
        self
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn with_source(mut self, content: impl Into<String>, span: Span) -> Self {
        self.content = Some(content.into());
        self.span = Some(span);
        self
    }

    pub fn is_unnamed(&self) -> bool {
        self.name == UNNAMED
    }
}

/// Named function, method or function literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Declared name, or `<parent>$<n>` for literals
    pub name: String,
    pub package: String,
    pub file: String,
    /// Source text of `span`
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Variable>,
    pub params: Vec<Variable>,
    pub results: Vec<Variable>,
    pub span: Span,
    /// Number of literals numbered against this function
    pub child_count: usize,
    /// Symbols read but not called
    pub references: BTreeSet<String>,
    /// Enclosing named function, set for literals only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            file: file.into(),
            content: String::new(),
            receiver: None,
            params: Vec::new(),
            results: Vec::new(),
            span,
            child_count: 0,
            references: BTreeSet::new(),
            parent: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn is_literal(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// What a `type` spec declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    Struct,
    Interface,
    /// Any other named type or alias (`type ID int`, `type F = func()`)
    Named,
}

/// Type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    pub package: String,
    pub file: String,
    pub kind: StructKind,
    /// Source text of the enclosing `type` declaration
    pub content: String,
    pub span: Span,
    pub fields: Vec<Variable>,
}

impl Struct {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        file: impl Into<String>,
        kind: StructKind,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            file: file.into(),
            kind,
            content: String::new(),
            span,
            fields: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// One import spec of a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Import {
    /// Local name the file uses for the package
    pub alias: String,
    /// Whether `alias` was written explicitly
    pub explicit: bool,
    pub path: String,
}

impl Import {
    /// Alias is the explicit name or the final path segment
    pub fn new(path: impl Into<String>, explicit_alias: Option<String>) -> Self {
        let path = path.into();
        match explicit_alias {
            Some(alias) => Self {
                alias,
                explicit: true,
                path,
            },
            None => Self {
                alias: default_alias(&path).to_string(),
                explicit: false,
                path,
            },
        }
    }
}

/// Final path segment of an import path
pub fn default_alias(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx > 0 => &path[idx + 1..],
        _ => path,
    }
}

/// Source file owned by a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the module root, `/`-separated
    pub rel_path: String,
    /// File name without directories
    pub name: String,
    pub package: String,
    pub content: String,
    pub imports: Vec<Import>,
    pub is_test: bool,
}
