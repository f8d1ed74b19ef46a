//! Module parser
//!
//! One module root in, one populated `Module` out. The manifest is read
//! first; a manifest failure yields a Module carrying the error and nothing
//! else. Source files are then extracted independently (in parallel when
//! configured) and merged in walk order by the calling thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ExtractConfig;
use crate::features::extraction::{FileExtraction, FileVisitor};
use crate::features::manifest::{read_manifest, GoModParser, ManifestParser};
use crate::features::parsing::{GoParser, SourceParser};
use crate::shared::models::{GographError, Module, Result, SourceFile};

/// A source file found under the module root
#[derive(Debug, Clone)]
struct SourceEntry {
    path: PathBuf,
    /// `/`-separated, relative to the module root
    rel_path: String,
    name: String,
    package: String,
    is_test: bool,
}

enum FileOutcome {
    Extracted(SourceFile, FileExtraction),
    Failed(String, GographError),
    Cancelled,
}

pub struct ModuleParser {
    config: ExtractConfig,
    source_parser: Arc<dyn SourceParser>,
    manifest_parser: Arc<dyn ManifestParser>,
}

impl ModuleParser {
    pub fn new(config: ExtractConfig) -> Self {
        Self::with_parsers(config, Arc::new(GoParser::new()), Arc::new(GoModParser::new()))
    }

    pub fn with_parsers(
        config: ExtractConfig,
        source_parser: Arc<dyn SourceParser>,
        manifest_parser: Arc<dyn ManifestParser>,
    ) -> Self {
        Self {
            config,
            source_parser,
            manifest_parser,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Parse the module rooted at `dir`
    ///
    /// Never fails: manifest, configuration and cancellation errors are
    /// stored on the returned Module, file errors become warnings.
    pub fn parse(&self, dir: &Path, cancel: &CancellationToken) -> Module {
        let start = Instant::now();
        let mut module = Module::new(dir);

        if let Err(e) = self.config.validate() {
            return module.with_error(e.into());
        }

        let manifest = match read_manifest(
            self.manifest_parser.as_ref(),
            dir,
            &self.config.layout.manifest_file,
        ) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to read module manifest");
                return module.with_error(e);
            }
        };

        module.path = manifest.module_path;
        module.go_version = manifest.go_version;
        module.toolchain = manifest.toolchain;
        module.requires = manifest.requires;
        module.replaces = manifest.replaces;

        let entries = self.source_files(&mut module);
        debug!(module = %module.path, files = entries.len(), "Discovered source files");

        let outcomes = self.extract_all(&entries, cancel);
        for outcome in outcomes {
            match outcome {
                FileOutcome::Extracted(file, extraction) => {
                    if !file.is_test {
                        module
                            .imports
                            .extend(file.imports.iter().map(|i| i.path.clone()));
                    }
                    module.merge_file(
                        file,
                        extraction.functions,
                        extraction.variables,
                        extraction.structs,
                    );
                }
                FileOutcome::Failed(rel_path, error) => {
                    warn!(
                        module = %module.path,
                        file = %rel_path,
                        error = %error,
                        "Skipping file"
                    );
                    module.add_warning(rel_path, error);
                }
                FileOutcome::Cancelled => {
                    if module.error.is_none() {
                        module.error = Some(GographError::Cancelled);
                    }
                }
            }
        }

        debug!(
            module = %module.path,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Parsed module"
        );
        info!(
            module = %module.path,
            files = module.files.len(),
            functions = module.function_count(),
            warnings = module.warnings.len(),
            "Module extracted"
        );
        module
    }

    /// Source files of the module in walk order, excluding nested modules,
    /// hidden and excluded directories
    fn source_files(&self, module: &mut Module) -> Vec<SourceEntry> {
        let config = &self.config;
        let manifest = config.layout.manifest_file.as_str();
        let root = module.dir.clone();
        let mut entries = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !config.is_skipped_dir(&name) && !e.path().join(manifest).is_file()
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| relative_path(&root, p))
                        .unwrap_or_default();
                    let error = GographError::walk(root.join(&path), e.to_string());
                    warn!(module = %module.path, error = %error, "Walk error");
                    module.add_warning(path, error);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !config.is_source_file(&name) {
                continue;
            }
            let is_test = config.is_test_file(&name);
            if is_test && !config.include_tests {
                continue;
            }

            let rel_path = relative_path(&root, entry.path());
            let rel_dir = rel_path
                .rsplit_once('/')
                .map(|(dir, _)| dir)
                .unwrap_or("");
            entries.push(SourceEntry {
                path: entry.path().to_path_buf(),
                package: module.package_path(rel_dir),
                rel_path,
                name,
                is_test,
            });
        }

        entries
    }

    fn extract_all(&self, entries: &[SourceEntry], cancel: &CancellationToken) -> Vec<FileOutcome> {
        let run = |entry: &SourceEntry| self.extract_one(entry, cancel);

        if !self.config.parallel.enabled {
            return entries.iter().map(run).collect();
        }

        match self.config.parallel.workers {
            Some(workers) => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| entries.par_iter().map(run).collect()),
                Err(e) => {
                    warn!(workers, error = %e, "Falling back to the global rayon pool");
                    entries.par_iter().map(run).collect()
                }
            },
            None => entries.par_iter().map(run).collect(),
        }
    }

    fn extract_one(&self, entry: &SourceEntry, cancel: &CancellationToken) -> FileOutcome {
        if cancel.is_cancelled() {
            return FileOutcome::Cancelled;
        }
        match self.read_and_extract(entry) {
            Ok((file, extraction)) => FileOutcome::Extracted(file, extraction),
            Err(e) => FileOutcome::Failed(entry.rel_path.clone(), e),
        }
    }

    fn read_and_extract(&self, entry: &SourceEntry) -> Result<(SourceFile, FileExtraction)> {
        let source =
            fs::read_to_string(&entry.path).map_err(|e| GographError::file_io(&entry.path, e))?;

        let tree = self.source_parser.parse(source, &entry.rel_path)?;
        let mut extraction = FileVisitor::new(&tree, &entry.package, &entry.rel_path).visit();

        let file = SourceFile {
            rel_path: entry.rel_path.clone(),
            name: entry.name.clone(),
            package: entry.package.clone(),
            content: tree.into_source(),
            imports: std::mem::take(&mut extraction.imports),
            is_test: entry.is_test,
        };
        Ok((file, extraction))
    }
}

/// `/`-separated path of `path` below `root`
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
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

    fn sample_module() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "go.mod",
            "module example.com/calc\n\ngo 1.21\n\nrequire github.com/pkg/errors v0.9.1\n",
        );
        write(root, "calc.go", "package calc\n\nimport \"fmt\"\n\nfunc Add(a, b int) int {\n\tfmt.Println(a)\n\treturn a + b\n}\n");
        write(root, "calc_test.go", "package calc\n\nimport \"testing\"\n\nfunc TestAdd(t *testing.T) {}\n");
        write(root, "internal/util/util.go", "package util\n\nvar Limit = 10\n");
        write(root, "README.md", "# calc\n");
        write(root, ".git/hooks/x.go", "package hooks\n");
        write(root, "nested/go.mod", "module example.com/nested\n");
        write(root, "nested/n.go", "package nested\n\nfunc N() {}\n");
        dir
    }

    #[test]
    fn test_parse_module_populates_packages() {
        let dir = sample_module();
        let module = ModuleParser::new(ExtractConfig::default())
            .parse(dir.path(), &CancellationToken::new());

        assert!(module.is_ok(), "unexpected error: {:?}", module.error);
        assert_eq!(module.path, "example.com/calc");
        assert_eq!(module.go_version, "1.21");
        assert_eq!(module.requires.len(), 1);

        let packages: Vec<&str> = module.packages().into_iter().collect();
        assert_eq!(packages, vec!["example.com/calc", "example.com/calc/internal/util"]);

        let names: Vec<&str> = module
            .functions("example.com/calc")
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Add", "TestAdd"]);
        assert_eq!(module.variables("example.com/calc/internal/util")[0].name, "Limit");
    }

    #[test]
    fn test_import_listing_skips_test_files() {
        let dir = sample_module();
        let module = ModuleParser::new(ExtractConfig::default())
            .parse(dir.path(), &CancellationToken::new());
        assert_eq!(module.imports, vec!["fmt".to_string()]);
    }

    #[test]
    fn test_tests_excluded_when_configured() {
        let dir = sample_module();
        let config = ExtractConfig::default().include_tests(false);
        let module = ModuleParser::new(config).parse(dir.path(), &CancellationToken::new());
        assert!(module.file("calc_test.go").is_none());
        assert_eq!(module.functions("example.com/calc").len(), 1);
    }

    #[test]
    fn test_hidden_and_nested_modules_not_walked() {
        let dir = sample_module();
        let module = ModuleParser::new(ExtractConfig::default())
            .parse(dir.path(), &CancellationToken::new());
        assert!(module.files.iter().all(|f| !f.rel_path.starts_with(".git")));
        assert!(module.files.iter().all(|f| !f.rel_path.starts_with("nested")));
    }

    #[test]
    fn test_manifest_error_is_stored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "go.mod", "go 1.21\n");
        let module = ModuleParser::new(ExtractConfig::default())
            .parse(dir.path(), &CancellationToken::new());

        assert_eq!(module.error.as_ref().map(|e| e.kind()), Some(ErrorKind::Manifest));
        assert!(module.files.is_empty());
        assert_eq!(module.dir, dir.path());
    }

    #[test]
    fn test_parse_failure_becomes_warning() {
        let dir = sample_module();
        write(dir.path(), "broken.go", "package calc\n\nfunc {\n");
        let module = ModuleParser::new(ExtractConfig::default().sequential())
            .parse(dir.path(), &CancellationToken::new());

        assert!(module.is_ok());
        assert_eq!(module.warnings.len(), 1);
        assert_eq!(module.warnings[0].path, "broken.go");
        assert_eq!(module.warnings[0].error.kind(), ErrorKind::Parse);
        assert!(module.file("broken.go").is_none());
    }

    #[test]
    fn test_unreadable_file_becomes_warning() {
        let dir = sample_module();
        fs::write(dir.path().join("latin1.go"), b"package calc\n\n// caf\xe9\n").unwrap();
        let module = ModuleParser::new(ExtractConfig::default())
            .parse(dir.path(), &CancellationToken::new());

        assert!(module.is_ok());
        assert_eq!(module.warnings.len(), 1);
        assert_eq!(module.warnings[0].path, "latin1.go");
        assert_eq!(module.warnings[0].error.kind(), ErrorKind::FileIo);
        assert!(module.file("latin1.go").is_none());
        assert!(module.file("calc.go").is_some());
        assert_eq!(module.variables("example.com/calc/internal/util").len(), 1);
    }

    #[test]
    fn test_cancelled_before_start() {
        let dir = sample_module();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let module = ModuleParser::new(ExtractConfig::default()).parse(dir.path(), &cancel);

        assert_eq!(module.error.as_ref().map(|e| e.kind()), Some(ErrorKind::Cancelled));
        assert!(module.files.is_empty());
    }

    #[test]
    fn test_dedicated_pool_matches_sequential() {
        let dir = sample_module();
        let cancel = CancellationToken::new();
        let pooled = ModuleParser::new(ExtractConfig::default().workers(2)).parse(dir.path(), &cancel);
        let sequential =
            ModuleParser::new(ExtractConfig::default().sequential()).parse(dir.path(), &cancel);

        assert_eq!(
            serde_json::to_string(&pooled).unwrap(),
            serde_json::to_string(&sequential).unwrap()
        );
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/repo");
        assert_eq!(relative_path(root, Path::new("/repo/a/b/c.go")), "a/b/c.go");
        assert_eq!(relative_path(root, Path::new("/repo/c.go")), "c.go");
    }
}
