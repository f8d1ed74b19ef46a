//! Parsed tree representation
//!
//! Owns the tree-sitter tree together with the bytes it was built from, so
//! node text and positions can be resolved without re-reading the file.

use tree_sitter::{Node, Tree};

use super::line_index::LineIndex;
use crate::shared::models::{Position, Span};

/// Parsed syntax tree of one Go file
#[derive(Debug, Clone)]
pub struct ParsedTree {
    tree: Tree,
    source: String,
    /// File path (for error messages)
    file_path: String,
    line_index: LineIndex,
}

impl ParsedTree {
    pub fn new(tree: Tree, source: String, file_path: impl Into<String>) -> Self {
        let line_index = LineIndex::new(&source);
        Self {
            tree,
            source,
            file_path: file_path.into(),
            line_index,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Source text of a node
    pub fn text(&self, node: &Node) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    pub fn position(&self, offset: usize) -> Position {
        self.line_index.position(offset)
    }

    pub fn span(&self, node: &Node) -> Span {
        Span::new(
            self.position(node.start_byte()),
            self.position(node.end_byte()),
        )
    }

    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Check if file is empty
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    pub fn into_source(self) -> String {
        self.source
    }
}
