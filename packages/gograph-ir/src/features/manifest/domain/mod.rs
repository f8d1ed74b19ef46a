//! Manifest domain models

mod mod_file;

pub use mod_file::ModFile;
