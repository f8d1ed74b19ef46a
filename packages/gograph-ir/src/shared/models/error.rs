//! Error types for the gograph-ir crate
//!
//! Every failure below the repository walk is scoped: manifest errors are
//! stored on their `Module`, file errors become `FileWarning`s. Only
//! cancellation and configuration problems escape `parse_repository`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Manifest,
    FileIo,
    Parse,
    Precondition,
    Config,
    Storage,
    NotFound,
    Walk,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Manifest => "manifest",
            ErrorKind::FileIo => "file_io",
            ErrorKind::Parse => "parse",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Config => "config",
            ErrorKind::Storage => "storage",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Walk => "walk",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

/// Main error type for gograph-ir operations
#[derive(Debug, Clone, Error)]
pub enum GographError {
    /// Manifest unreadable or malformed
    #[error("manifest error in {}{}: {message}", .path.display(), .line.map(|l| format!(":{l}")).unwrap_or_default())]
    Manifest {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    /// Source or manifest file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The parse step rejected a file
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A malformed tree reached the visitor
    #[error("malformed syntax tree in {path}: {message}")]
    Precondition { path: String, message: String },

    /// Invalid extraction configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistence collaborator failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Lookup by module path found nothing
    #[error("module not found: {0}")]
    NotFound(String),

    /// Directory traversal failure
    #[error("walk error under {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// The run was cancelled through its token
    #[error("operation cancelled")]
    Cancelled,
}

impl GographError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GographError::Manifest { .. } => ErrorKind::Manifest,
            GographError::FileIo { .. } => ErrorKind::FileIo,
            GographError::Parse { .. } => ErrorKind::Parse,
            GographError::Precondition { .. } => ErrorKind::Precondition,
            GographError::Config(_) => ErrorKind::Config,
            GographError::Storage(_) => ErrorKind::Storage,
            GographError::NotFound(_) => ErrorKind::NotFound,
            GographError::Walk { .. } => ErrorKind::Walk,
            GographError::Cancelled => ErrorKind::Cancelled,
        }
    }

    // Convenience constructors
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GographError::Manifest {
            path: path.into(),
            line: None,
            message: message.into(),
        }
    }

    pub fn manifest_at(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        GographError::Manifest {
            path: path.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn file_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        GographError::FileIo {
            path: path.as_ref().to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        GographError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn precondition(path: impl Into<String>, message: impl Into<String>) -> Self {
        GographError::Precondition {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GographError::Config(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        GographError::Storage(message.into())
    }

    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GographError::Walk {
            path: path.into(),
            message: message.into(),
        }
    }

    /// File-scoped failures never abort their module
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::FileIo | ErrorKind::Parse | ErrorKind::Precondition
        )
    }
}

impl Serialize for GographError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GographError", 2)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GographError>;
