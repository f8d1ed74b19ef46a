//! Extraction use cases

mod extract_file;

pub use extract_file::{extract_file, extract_file_with};
