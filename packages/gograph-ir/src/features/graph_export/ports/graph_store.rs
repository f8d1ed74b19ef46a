//! Graph Store Port (Trait Interface)
//!
//! The persistence collaborator. Implementations are constructed explicitly
//! and handed to the export step by reference.

use crate::shared::models::{Module, Result};

pub trait GraphStore: Send + Sync {
    /// Create or replace the graph of a module, keyed by module path
    fn create_module_graph(&self, module: &Module) -> Result<()>;

    /// Module stored under `path`; `NotFound` when absent
    fn find_by_path(&self, path: &str) -> Result<Module>;

    /// Modules whose path, package paths or declaration names contain
    /// `keyword`, ordered by module path; `offset` is applied before `limit`
    fn search_by_keyword(&self, keyword: &str, limit: usize, offset: usize) -> Result<Vec<Module>>;
}
