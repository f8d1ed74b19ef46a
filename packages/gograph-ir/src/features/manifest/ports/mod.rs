//! Manifest ports (interfaces)

mod manifest_parser;

pub use manifest_parser::ManifestParser;
