//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use tree_sitter::{Node, Parser as TSParser};

use super::syntax::{is_top_level_kind, kinds};
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::{GographError, Result};

/// Tree-sitter based Go parser
///
/// Stateless: a fresh `tree_sitter::Parser` is built per call so one
/// instance can be shared across rayon workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }

    fn ts_parser(&self, file_path: &str) -> Result<TSParser> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|e| GographError::parse(file_path, format!("failed to set language: {e}")))?;
        Ok(parser)
    }

    /// First ERROR or MISSING node in document order
    fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(Self::first_error)
    }

    /// Reject trees the Go tool chain would not accept
    fn validate(tree: &ParsedTree) -> Result<()> {
        let root = tree.root();

        if root.has_error() {
            let message = match Self::first_error(root) {
                Some(node) => {
                    let pos = tree.position(node.start_byte());
                    if node.is_missing() {
                        format!("{}:{}: missing {}", pos.line, pos.column, node.kind())
                    } else {
                        format!("{}:{}: syntax error", pos.line, pos.column)
                    }
                }
                None => "syntax error".to_string(),
            };
            return Err(GographError::parse(tree.file_path(), message));
        }

        // tree-sitter-go accepts bare statements at file scope; Go does not
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if !is_top_level_kind(child.kind()) {
                let pos = tree.position(child.start_byte());
                return Err(GographError::parse(
                    tree.file_path(),
                    format!(
                        "{}:{}: non-declaration statement outside function body",
                        pos.line, pos.column
                    ),
                ));
            }
        }

        let has_package = {
            let mut cursor = root.walk();
            let found = root
                .named_children(&mut cursor)
                .any(|c| c.kind() == kinds::PACKAGE_CLAUSE);
            found
        };
        if !has_package {
            return Err(GographError::parse(
                tree.file_path(),
                "expected 'package' clause",
            ));
        }

        Ok(())
    }
}

impl SourceParser for GoParser {
    fn parse(&self, source: String, file_path: &str) -> Result<ParsedTree> {
        let mut parser = self.ts_parser(file_path)?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| GographError::parse(file_path, "parser returned no tree"))?;

        let parsed = ParsedTree::new(tree, source, file_path);
        Self::validate(&parsed)?;
        Ok(parsed)
    }

    fn language_name(&self) -> &'static str {
        "go"
    }
}
