//! Extraction infrastructure - tree-sitter walkers

mod field_list;
mod file_visitor;
mod reference_collector;

pub use field_list::DeclContext;
pub use file_visitor::FileVisitor;
pub use reference_collector::ReferenceCollector;
