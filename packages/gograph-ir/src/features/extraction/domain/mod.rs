//! Extraction domain models

mod file_extraction;

pub use file_extraction::FileExtraction;
