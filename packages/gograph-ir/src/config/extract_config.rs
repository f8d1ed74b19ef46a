//! Extraction configuration
//!
//! Defaults reproduce the plain Go layout: `go.mod` manifests, `.go`
//! sources, `_test.go` tests, dot-prefixed directories hidden, and per-file
//! parallelism on the global rayon pool.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::shared::constants::{layout, thread_pool};

/// Repository layout conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub manifest_file: String,
    /// Extension without the dot
    pub source_extension: String,
    pub test_suffix: String,
    pub hidden_prefix: String,
    /// Directory names never descended (e.g. `vendor`, `testdata`)
    pub excluded_dirs: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            manifest_file: layout::MANIFEST_FILE.to_string(),
            source_extension: layout::SOURCE_EXTENSION.to_string(),
            test_suffix: layout::TEST_SUFFIX.to_string(),
            hidden_prefix: layout::HIDDEN_PREFIX.to_string(),
            excluded_dirs: Vec::new(),
        }
    }
}

/// Per-file parallelism inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    pub enabled: bool,
    /// Dedicated pool size; `None` uses the global rayon pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            workers: None,
        }
    }
}

/// Complete extraction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub layout: LayoutConfig,
    /// Whether `_test.go` files go through full extraction
    pub include_tests: bool,
    pub parallel: ParallelConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            include_tests: true,
            parallel: ParallelConfig::default(),
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// One file at a time
    pub fn sequential(mut self) -> Self {
        self.parallel.enabled = false;
        self.parallel.workers = None;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.parallel.enabled = true;
        self.parallel.workers = Some(workers);
        self
    }

    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.layout.excluded_dirs.push(name.into());
        self
    }

    pub fn manifest_file(mut self, name: impl Into<String>) -> Self {
        self.layout.manifest_file = name.into();
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("layout.manifest_file", &self.layout.manifest_file),
            ("layout.source_extension", &self.layout.source_extension),
            ("layout.test_suffix", &self.layout.test_suffix),
            ("layout.hidden_prefix", &self.layout.hidden_prefix),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Empty(field.to_string()));
            }
        }

        if let Some(workers) = self.parallel.workers {
            if !(thread_pool::MIN_WORKERS..=thread_pool::MAX_WORKERS).contains(&workers) {
                return Err(ConfigError::Range {
                    field: "parallel.workers".to_string(),
                    value: workers.to_string(),
                    min: thread_pool::MIN_WORKERS.to_string(),
                    max: thread_pool::MAX_WORKERS.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn is_manifest(&self, file_name: &str) -> bool {
        file_name == self.layout.manifest_file
    }

    pub fn is_source_file(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .map(|(stem, ext)| !stem.is_empty() && ext == self.layout.source_extension)
            .unwrap_or(false)
    }

    pub fn is_test_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.layout.test_suffix)
    }

    /// Directories that are pruned entirely
    pub fn is_skipped_dir(&self, dir_name: &str) -> bool {
        dir_name.starts_with(&self.layout.hidden_prefix)
            || self.layout.excluded_dirs.iter().any(|d| d == dir_name)
    }
}
