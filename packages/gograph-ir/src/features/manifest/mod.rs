//! Manifest Feature
//!
//! The external manifest parse step: `go.mod` bytes in, module path,
//! language version, dependencies and replace rules out.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::read_manifest;
pub use domain::ModFile;
pub use infrastructure::GoModParser;
pub use ports::ManifestParser;
