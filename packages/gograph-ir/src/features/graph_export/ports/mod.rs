//! Graph export ports (interfaces)

mod graph_store;

pub use graph_store::GraphStore;
