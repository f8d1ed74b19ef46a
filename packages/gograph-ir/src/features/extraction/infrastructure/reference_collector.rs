//! Reference collection
//!
//! Each top-level statement of a function body is scanned twice: first for
//! call targets, then for identifiers and qualified names. A name that is
//! called anywhere in a statement is not a reference within that statement.
//! The called set is scoped to one statement; a call in one statement does
//! not hide a plain read of the same name in another.

use std::collections::{BTreeSet, HashSet};

use tree_sitter::Node;

use crate::features::parsing::infrastructure::tree_sitter::syntax::{
    block_statements, kinds, named_children, node_text,
};

/// Go's blank identifier; never a symbol
const BLANK: &str = "_";

pub struct ReferenceCollector<'s> {
    source: &'s str,
}

impl<'s> ReferenceCollector<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// References of a function body `block`
    pub fn collect(&self, body: &Node) -> BTreeSet<String> {
        let mut references = BTreeSet::new();
        for statement in block_statements(body) {
            let mut called = HashSet::new();
            self.collect_calls(&statement, &mut called);
            self.collect_names(&statement, &called, &mut references);
        }
        references
    }

    /// Rendered name of an identifier or (nested) selector; None otherwise
    pub fn render(&self, node: &Node) -> Option<String> {
        match node.kind() {
            kinds::IDENTIFIER
            | kinds::TYPE_IDENTIFIER
            | kinds::PACKAGE_IDENTIFIER
            | kinds::FIELD_IDENTIFIER => Some(node_text(node, self.source).to_string()),
            kinds::SELECTOR_EXPRESSION => {
                let operand = node.child_by_field_name("operand")?;
                let field = node.child_by_field_name("field")?;
                Some(format!(
                    "{}.{}",
                    self.render(&operand)?,
                    node_text(&field, self.source)
                ))
            }
            kinds::QUALIFIED_TYPE => {
                let package = node.child_by_field_name("package")?;
                let name = node.child_by_field_name("name")?;
                Some(format!(
                    "{}.{}",
                    node_text(&package, self.source),
                    node_text(&name, self.source)
                ))
            }
            _ => None,
        }
    }

    fn collect_calls(&self, node: &Node, called: &mut HashSet<String>) {
        if node.kind() == kinds::CALL_EXPRESSION {
            if let Some(callee) = node
                .child_by_field_name("function")
                .and_then(|f| self.render(&f))
            {
                called.insert(callee);
            }
        }
        for child in named_children(node) {
            self.collect_calls(&child, called);
        }
    }

    fn collect_names(&self, node: &Node, called: &HashSet<String>, out: &mut BTreeSet<String>) {
        match node.kind() {
            kinds::IDENTIFIER | kinds::TYPE_IDENTIFIER | kinds::PACKAGE_IDENTIFIER => {
                record(node_text(node, self.source).to_string(), called, out);
            }
            kinds::SELECTOR_EXPRESSION => {
                if let Some(name) = self.render(node) {
                    record(name, called, out);
                }
                if let Some(operand) = node.child_by_field_name("operand") {
                    self.collect_names(&operand, called, out);
                }
            }
            kinds::QUALIFIED_TYPE => {
                if let Some(name) = self.render(node) {
                    record(name, called, out);
                }
                if let Some(package) = node.child_by_field_name("package") {
                    self.collect_names(&package, called, out);
                }
            }
            _ => {
                for child in named_children(node) {
                    self.collect_names(&child, called, out);
                }
            }
        }
    }
}

fn record(name: String, called: &HashSet<String>, out: &mut BTreeSet<String>) {
    if name != BLANK && !called.contains(&name) {
        out.insert(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::GoParser;
    use crate::features::parsing::ports::SourceParser;

    fn body_references(body: &str) -> BTreeSet<String> {
        let source = format!("package p\n\nfunc f() {{\n{body}\n}}\n");
        let tree = GoParser::new().parse(source, "f.go").unwrap();
        let root = tree.root();
        let func = named_children(&root)
            .into_iter()
            .find(|n| n.kind() == kinds::FUNCTION_DECLARATION)
            .unwrap();
        let block = func.child_by_field_name("body").unwrap();
        ReferenceCollector::new(tree.source()).collect(&block)
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_call_target_is_not_a_reference() {
        let refs = body_references("\tx(); _ = y.z");
        assert!(!refs.contains("x"));
        assert!(refs.contains("y.z"));
        assert!(refs.contains("y"));
        assert!(!refs.contains("_"));
    }

    #[test]
    fn test_blank_identifier_is_not_a_reference() {
        let refs = body_references("\t_ = y.z\n\t_, err := load()\n\t_ = err");
        assert_eq!(refs, set(&["err", "y", "y.z"]));
    }

    #[test]
    fn test_called_selector_keeps_operand() {
        let refs = body_references("\tfmt.Println(msg)");
        assert_eq!(refs, set(&["fmt", "msg"]));
    }

    #[test]
    fn test_selector_field_is_not_separate() {
        let refs = body_references("\tsink(cfg.Server.Port)");
        assert_eq!(refs, set(&["cfg", "cfg.Server", "cfg.Server.Port"]));
    }

    #[test]
    fn test_called_names_scoped_per_statement() {
        // `helper` is called in the first statement only; the later read
        // in a different statement is still a reference
        let refs = body_references("\thelper()\n\tfn := helper\n\t_ = fn");
        assert!(refs.contains("helper"));
        assert!(refs.contains("fn"));
    }

    #[test]
    fn test_same_statement_call_suppresses_read() {
        let refs = body_references("\t_ = apply(apply)");
        assert!(!refs.contains("apply"));
    }

    #[test]
    fn test_literal_callee_produces_no_entry() {
        let refs = body_references("\tfunc() { counter++ }()");
        assert_eq!(refs, set(&["counter"]));
    }

    #[test]
    fn test_qualified_type_in_body() {
        let refs = body_references("\tvar t *v2.Thing\n\t_ = t");
        assert!(refs.contains("v2.Thing"));
        assert!(refs.contains("v2"));
        assert!(refs.contains("t"));
    }
}
