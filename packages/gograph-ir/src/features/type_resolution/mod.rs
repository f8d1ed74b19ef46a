//! Type Resolution Feature
//!
//! Renders Go type expressions and rewrites package-qualified base types
//! through the file's import-alias table.
//!
//! ## Structure
//! - `domain/` - TypeExpr, ImportTable
//! - `application/` - TypeResolver

pub mod application;
pub mod domain;

pub use application::{ResolvedType, TypeResolver};
pub use domain::{ChanDir, ImportTable, TypeExpr};
