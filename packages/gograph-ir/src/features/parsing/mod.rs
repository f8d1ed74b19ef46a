//! Parsing Feature
//!
//! The external parse step: Go source bytes in, an error-free syntax tree
//! with offset→line/column lookup out.
//!
//! ## Structure
//! - `domain/` - ParsedTree, LineIndex
//! - `ports/` - SourceParser trait
//! - `infrastructure/` - tree-sitter-go binding (GoParser, TopLevelDecl)
//! - `application/` - import-only scan

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::scan_imports;
pub use domain::{LineIndex, ParsedTree};
pub use infrastructure::{GoParser, TopLevelDecl};
pub use ports::SourceParser;
