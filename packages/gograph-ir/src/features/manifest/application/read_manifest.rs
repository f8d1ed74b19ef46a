//! Read and parse a module's manifest file

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::features::manifest::domain::ModFile;
use crate::features::manifest::ports::ManifestParser;
use crate::shared::models::{GographError, Result};

/// Read `<dir>/<manifest_file>` and parse it
///
/// Unreadable manifests are reported as manifest errors, not I/O errors, so
/// they land on the module like any other manifest failure.
pub fn read_manifest(
    parser: &dyn ManifestParser,
    dir: &Path,
    manifest_file: &str,
) -> Result<ModFile> {
    let path = dir.join(manifest_file);
    let content = fs::read_to_string(&path)
        .map_err(|e| GographError::manifest(&path, format!("unreadable manifest: {e}")))?;

    let file = parser.parse(&content, &path)?;
    debug!(
        module = %file.module_path,
        requires = file.requires.len(),
        replaces = file.replaces.len(),
        "Parsed manifest"
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::manifest::infrastructure::GoModParser;
    use crate::shared::models::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_read_manifest_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/m\n\ngo 1.22\n").unwrap();

        let file = read_manifest(&GoModParser::new(), dir.path(), "go.mod").unwrap();
        assert_eq!(file.module_path, "example.com/m");
        assert_eq!(file.go_version, "1.22");
    }

    #[test]
    fn test_missing_manifest_is_manifest_error() {
        let dir = TempDir::new().unwrap();
        let err = read_manifest(&GoModParser::new(), dir.path(), "go.mod").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Manifest);
    }
}
