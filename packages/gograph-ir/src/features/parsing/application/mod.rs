//! Parsing use cases

mod import_scanner;

pub use import_scanner::scan_imports;
