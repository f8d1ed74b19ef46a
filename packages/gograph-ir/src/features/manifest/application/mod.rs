//! Manifest use cases

mod read_manifest;

pub use read_manifest::read_manifest;
