//! Hand extracted modules to a graph store

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::features::graph_export::ports::GraphStore;
use crate::shared::models::{GographError, Module};

/// Outcome of one export run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub stored: Vec<String>,
    /// Modules not stored: their own error, or the store's
    pub skipped: Vec<(PathBuf, GographError)>,
}

impl ExportSummary {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Store every module without an error; failures are collected, not raised
pub fn export_modules(store: &dyn GraphStore, modules: &[Module]) -> ExportSummary {
    let mut summary = ExportSummary::default();

    for module in modules {
        if let Some(err) = &module.error {
            warn!(dir = %module.dir.display(), error = %err, "Skipping module with error");
            summary.skipped.push((module.dir.clone(), err.clone()));
            continue;
        }
        match store.create_module_graph(module) {
            Ok(()) => summary.stored.push(module.path.clone()),
            Err(err) => {
                warn!(module = %module.path, error = %err, "Failed to store module graph");
                summary.skipped.push((module.dir.clone(), err));
            }
        }
    }

    info!(
        stored = summary.stored.len(),
        skipped = summary.skipped.len(),
        "Exported module graphs"
    );
    summary
}
