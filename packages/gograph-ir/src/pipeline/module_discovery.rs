//! Module discovery
//!
//! Walks a repository root, hands every directory holding a manifest to the
//! ModuleParser and prunes descent below it. Hidden and excluded directories
//! are never entered. The result is ordered by module path.

use std::path::Path;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::module_parser::ModuleParser;
use crate::config::ExtractConfig;
use crate::shared::models::{GographError, Module, Result};

pub struct ModuleDiscovery {
    parser: ModuleParser,
}

impl ModuleDiscovery {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            parser: ModuleParser::new(config),
        }
    }

    pub fn with_parser(parser: ModuleParser) -> Self {
        Self { parser }
    }

    /// Every module under `root`, sorted by module path
    ///
    /// Module-scoped failures stay on their Module. Only an unusable root or
    /// cancellation fails the whole walk.
    pub fn discover(&self, root: &Path, cancel: &CancellationToken) -> Result<Vec<Module>> {
        if !root.is_dir() {
            return Err(GographError::walk(root, "not a directory"));
        }

        let start = Instant::now();
        let config = self.parser.config();
        let manifest = config.layout.manifest_file.as_str();
        let mut modules = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !config.is_skipped_dir(&e.file_name().to_string_lossy())
            });

        while let Some(entry) = walker.next() {
            if cancel.is_cancelled() {
                info!(root = %root.display(), found = modules.len(), "Discovery cancelled");
                return Err(GographError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Walk error, continuing");
                    continue;
                }
            };
            if !entry.file_type().is_dir() || !entry.path().join(manifest).is_file() {
                continue;
            }

            let module = self.parser.parse(entry.path(), cancel);
            if matches!(module.error, Some(GographError::Cancelled)) {
                return Err(GographError::Cancelled);
            }
            debug!(dir = %entry.path().display(), module = %module.path, "Found module");
            modules.push(module);

            // Nested manifests belong to independent modules
            walker.skip_current_dir();
        }

        modules.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.dir.cmp(&b.dir)));

        info!(
            root = %root.display(),
            modules = modules.len(),
            failed = modules.iter().filter(|m| !m.is_ok()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Repository discovery complete"
        );
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn discover(root: &Path) -> Vec<Module> {
        ModuleDiscovery::new(ExtractConfig::default())
            .discover(root, &CancellationToken::new())
            .unwrap()
    }

    #[test]
    fn test_modules_sorted_by_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "zeta/go.mod", "module example.com/a\n");
        write(dir.path(), "alpha/go.mod", "module example.com/b\n");

        let paths: Vec<String> = discover(dir.path()).into_iter().map(|m| m.path).collect();
        assert_eq!(paths, vec!["example.com/a", "example.com/b"]);
    }

    #[test]
    fn test_nested_and_hidden_modules_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/root\n");
        write(dir.path(), "sub/go.mod", "module example.com/root/sub\n");
        write(dir.path(), ".cache/go.mod", "module example.com/hidden\n");

        let modules = discover(dir.path());
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].path, "example.com/root");
    }

    #[test]
    fn test_manifest_error_does_not_stop_walk() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad/go.mod", "bogus directive\n");
        write(dir.path(), "good/go.mod", "module example.com/good\n");

        let modules = discover(dir.path());
        assert_eq!(modules.len(), 2);
        // The failed module has an empty path and sorts first
        assert_eq!(modules[0].error.as_ref().map(|e| e.kind()), Some(ErrorKind::Manifest));
        assert!(modules[1].is_ok());
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let dir = TempDir::new().unwrap();
        let err = ModuleDiscovery::new(ExtractConfig::default())
            .discover(&dir.path().join("absent"), &CancellationToken::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Walk);
    }

    #[test]
    fn test_cancelled_walk() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "module example.com/root\n");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = ModuleDiscovery::new(ExtractConfig::default())
            .discover(dir.path(), &cancel)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }
}
