//! Configuration
//!
//! # Examples
//!
//! ```rust,ignore
//! use gograph_ir::config::ExtractConfig;
//!
//! // Defaults: plain Go layout, parallel per-file extraction
//! let config = ExtractConfig::default();
//!
//! // Builder overrides
//! let config = ExtractConfig::new().workers(4).exclude_dir("vendor");
//!
//! // YAML (schema v1)
//! let config = ExtractConfig::from_yaml("gograph.yaml")?;
//! ```

pub mod error;
pub mod extract_config;
pub mod io;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use extract_config::{ExtractConfig, LayoutConfig, ParallelConfig};
pub use io::ConfigExportV1;
