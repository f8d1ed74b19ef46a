//! Parsing domain models

mod line_index;
mod parsed_tree;

pub use line_index::LineIndex;
pub use parsed_tree::ParsedTree;
