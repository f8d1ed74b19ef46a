//! Graph Export Feature
//!
//! Projection of extracted modules into graph nodes and edges, and the
//! persistence port that receives them.
//!
//! ## Structure
//! - `domain/` - ModuleGraph, GraphNode, GraphEdge
//! - `ports/` - GraphStore trait
//! - `infrastructure/` - InMemoryGraphStore
//! - `application/` - export_modules

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{export_modules, ExportSummary};
pub use domain::{EdgeKind, GraphEdge, GraphNode, ModuleGraph, NodeKind};
pub use infrastructure::InMemoryGraphStore;
pub use ports::GraphStore;
