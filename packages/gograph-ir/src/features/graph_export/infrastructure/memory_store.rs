//! In-Memory Graph Store
//!
//! BTreeMap keyed by module path behind a `parking_lot::RwLock`. Used by
//! tests and by callers that only need the read-side queries.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::features::graph_export::domain::ModuleGraph;
use crate::features::graph_export::ports::GraphStore;
use crate::shared::models::{GographError, Module, Result};

#[derive(Debug, Clone)]
struct StoredModule {
    module: Module,
    graph: ModuleGraph,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphStore {
    modules: Arc<RwLock<BTreeMap<String, StoredModule>>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projected graph of a stored module
    pub fn graph(&self, path: &str) -> Option<ModuleGraph> {
        self.modules.read().get(path).map(|s| s.graph.clone())
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

fn matches_keyword(module: &Module, keyword: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(keyword);

    hit(&module.path)
        || module.packages().into_iter().any(hit)
        || module.all_functions().any(|f| hit(&f.name))
        || module.pkg_structs.values().flatten().any(|s| hit(&s.name))
        || module.pkg_variables.values().flatten().any(|v| hit(&v.name))
}

impl GraphStore for InMemoryGraphStore {
    fn create_module_graph(&self, module: &Module) -> Result<()> {
        if module.path.is_empty() {
            return Err(GographError::storage(format!(
                "module at {} has no path",
                module.dir.display()
            )));
        }

        let graph = ModuleGraph::from_module(module);
        debug!(
            module = %module.path,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Stored module graph"
        );
        self.modules.write().insert(
            module.path.clone(),
            StoredModule {
                module: module.clone(),
                graph,
            },
        );
        Ok(())
    }

    fn find_by_path(&self, path: &str) -> Result<Module> {
        self.modules
            .read()
            .get(path)
            .map(|s| s.module.clone())
            .ok_or_else(|| GographError::NotFound(path.to_string()))
    }

    fn search_by_keyword(&self, keyword: &str, limit: usize, offset: usize) -> Result<Vec<Module>> {
        let keyword = keyword.to_lowercase();
        Ok(self
            .modules
            .read()
            .values()
            .filter(|s| matches_keyword(&s.module, &keyword))
            .skip(offset)
            .take(limit)
            .map(|s| s.module.clone())
            .collect())
    }
}
