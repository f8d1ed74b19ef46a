//! Graph export domain models

mod graph;

pub use graph::{
    file_id, module_id, package_id, EdgeKind, GraphEdge, GraphNode, ModuleGraph, NodeKind,
};
