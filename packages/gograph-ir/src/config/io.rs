//! Configuration I/O (YAML loading)
//!
//! Schema v1:
//!
//! ```yaml
//! version: 1
//! layout:
//!   excluded_dirs: [vendor, testdata]
//! include_tests: false
//! parallel:
//!   workers: 8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::extract_config::{ExtractConfig, LayoutConfig, ParallelConfig};
use crate::shared::constants::schema;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tests: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}

impl ExtractConfig {
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !schema::SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: schema::SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let defaults = ExtractConfig::default();
        let config = ExtractConfig {
            layout: export.layout.unwrap_or(defaults.layout),
            include_tests: export.include_tests.unwrap_or(defaults.include_tests),
            parallel: export.parallel.unwrap_or(defaults.parallel),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(schema::CONFIG_VERSION),
            layout: Some(self.layout.clone()),
            include_tests: Some(self.include_tests),
            parallel: Some(self.parallel.clone()),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = ExtractConfig::new().workers(8).exclude_dir("vendor");
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("workers: 8"));

        let loaded = ExtractConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading_partial_sections() {
        let yaml_content = r#"
version: 1
layout:
  excluded_dirs: [vendor, testdata]
include_tests: false
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = ExtractConfig::from_yaml(temp_file.path()).unwrap();
        assert!(config.is_skipped_dir("testdata"));
        assert!(!config.include_tests);
        // Untouched sections keep their defaults
        assert_eq!(config.layout.manifest_file, "go.mod");
        assert!(config.parallel.enabled);
    }

    #[test]
    fn test_missing_version() {
        let err = ExtractConfig::from_yaml_str("include_tests: true\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_unsupported_version() {
        let err = ExtractConfig::from_yaml_str("version: 7\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 7, .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ExtractConfig::from_yaml_str("version: 1\nthreads: 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_invalid_workers_rejected_on_load() {
        let err = ExtractConfig::from_yaml_str("version: 1\nparallel:\n  workers: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }
}
