//! Pipeline orchestration
//!
//! Repository root → ModuleDiscovery → ModuleParser (per module) →
//! FileVisitor (per file, in parallel) → merged Module records.

pub mod module_discovery;
pub mod module_parser;

pub use module_discovery::ModuleDiscovery;
pub use module_parser::ModuleParser;

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::config::ExtractConfig;
use crate::shared::models::{Module, Result};

/// Extract every module under `root`, ordered by module path
pub fn parse_repository(
    root: impl AsRef<Path>,
    config: &ExtractConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Module>> {
    config.validate()?;
    ModuleDiscovery::new(config.clone()).discover(root.as_ref(), cancel)
}

/// Extract the single module rooted at `dir`
///
/// Failures, including an invalid configuration, are carried on the
/// returned Module.
pub fn parse_module(dir: impl AsRef<Path>, config: &ExtractConfig, cancel: &CancellationToken) -> Module {
    ModuleParser::new(config.clone()).parse(dir.as_ref(), cancel)
}
