//! Manifest parser port
//!
//! The manifest parse step is an external collaborator: manifest bytes in,
//! module path, language version, dependencies and replace rules out.

use std::path::Path;

use crate::features::manifest::domain::ModFile;
use crate::shared::models::Result;

pub trait ManifestParser: Send + Sync {
    /// Parse manifest text; `path` is used for error reporting only
    fn parse(&self, content: &str, path: &Path) -> Result<ModFile>;
}
