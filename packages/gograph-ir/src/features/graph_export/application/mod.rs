//! Graph export use cases

mod export;

pub use export::{export_modules, ExportSummary};
