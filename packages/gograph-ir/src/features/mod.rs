//! Feature modules - each feature follows the hexagonal layout
//!
//! Each feature contains (as needed):
//! - domain/     - Pure data and rules
//! - ports/      - Collaborator traits
//! - application/ - Use cases
//! - infrastructure/ - tree-sitter, go.mod and storage implementations

pub mod extraction;
pub mod graph_export;
pub mod manifest;
pub mod parsing;
pub mod type_resolution;
