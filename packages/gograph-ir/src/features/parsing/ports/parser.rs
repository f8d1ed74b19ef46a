//! Parser port (interface)
//!
//! Defines the contract for the external parse step.

use crate::features::parsing::domain::ParsedTree;
use crate::shared::models::Result;

/// Parser trait - abstraction over parsing implementation
///
/// Implementations reject syntactically invalid files with
/// `GographError::Parse`; a returned tree is always error-free.
pub trait SourceParser: Send + Sync {
    /// Parse source code into a ParsedTree
    fn parse(&self, source: String, file_path: &str) -> Result<ParsedTree>;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
