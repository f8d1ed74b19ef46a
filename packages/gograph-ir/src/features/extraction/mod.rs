//! Extraction Feature
//!
//! FileVisitor and its helpers: declaration classification, field-list
//! extraction, literal numbering and reference collection for one file.
//!
//! ## Structure
//! - `domain/` - FileExtraction
//! - `infrastructure/` - FileVisitor, ReferenceCollector, field lists
//! - `application/` - extract_file

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{extract_file, extract_file_with};
pub use domain::FileExtraction;
pub use infrastructure::{FileVisitor, ReferenceCollector};
