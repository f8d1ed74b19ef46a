//! Go grammar bindings
//!
//! Node kinds of `tree-sitter-go` the extractor dispatches on, the closed
//! `TopLevelDecl` view of a source file's children, and conversion of type
//! nodes into `TypeExpr`.

use tree_sitter::Node;

use crate::features::type_resolution::domain::{ChanDir, TypeExpr};

/// Node kind names from the tree-sitter-go grammar
pub mod kinds {
    pub const SOURCE_FILE: &str = "source_file";
    pub const PACKAGE_CLAUSE: &str = "package_clause";
    pub const COMMENT: &str = "comment";

    pub const IMPORT_DECLARATION: &str = "import_declaration";
    pub const IMPORT_SPEC: &str = "import_spec";
    pub const IMPORT_SPEC_LIST: &str = "import_spec_list";

    pub const CONST_DECLARATION: &str = "const_declaration";
    pub const CONST_SPEC: &str = "const_spec";
    pub const VAR_DECLARATION: &str = "var_declaration";
    pub const VAR_SPEC: &str = "var_spec";
    pub const VAR_SPEC_LIST: &str = "var_spec_list";

    pub const TYPE_DECLARATION: &str = "type_declaration";
    pub const TYPE_SPEC: &str = "type_spec";
    pub const TYPE_ALIAS: &str = "type_alias";

    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const METHOD_DECLARATION: &str = "method_declaration";
    pub const FUNC_LITERAL: &str = "func_literal";

    pub const PARAMETER_LIST: &str = "parameter_list";
    pub const PARAMETER_DECLARATION: &str = "parameter_declaration";
    pub const VARIADIC_PARAMETER_DECLARATION: &str = "variadic_parameter_declaration";
    pub const FIELD_DECLARATION_LIST: &str = "field_declaration_list";
    pub const FIELD_DECLARATION: &str = "field_declaration";

    pub const BLOCK: &str = "block";
    pub const STATEMENT_LIST: &str = "statement_list";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const SELECTOR_EXPRESSION: &str = "selector_expression";

    pub const IDENTIFIER: &str = "identifier";
    pub const TYPE_IDENTIFIER: &str = "type_identifier";
    pub const PACKAGE_IDENTIFIER: &str = "package_identifier";
    pub const FIELD_IDENTIFIER: &str = "field_identifier";

    pub const QUALIFIED_TYPE: &str = "qualified_type";
    pub const POINTER_TYPE: &str = "pointer_type";
    pub const SLICE_TYPE: &str = "slice_type";
    pub const ARRAY_TYPE: &str = "array_type";
    pub const IMPLICIT_LENGTH_ARRAY_TYPE: &str = "implicit_length_array_type";
    pub const MAP_TYPE: &str = "map_type";
    pub const CHANNEL_TYPE: &str = "channel_type";
    pub const PARENTHESIZED_TYPE: &str = "parenthesized_type";
    pub const GENERIC_TYPE: &str = "generic_type";
    pub const TYPE_ARGUMENTS: &str = "type_arguments";
    pub const TYPE_ELEM: &str = "type_elem";
    pub const STRUCT_TYPE: &str = "struct_type";
    pub const INTERFACE_TYPE: &str = "interface_type";
}

/// Declaration-level child of a `source_file`
#[derive(Debug, Clone, Copy)]
pub enum TopLevelDecl<'tree> {
    Package(Node<'tree>),
    Import(Node<'tree>),
    Const(Node<'tree>),
    Var(Node<'tree>),
    Type(Node<'tree>),
    Function(Node<'tree>),
    Method(Node<'tree>),
    Comment(Node<'tree>),
}

impl<'tree> TopLevelDecl<'tree> {
    /// None for node kinds Go does not allow at file scope
    pub fn classify(node: Node<'tree>) -> Option<Self> {
        let decl = match node.kind() {
            kinds::PACKAGE_CLAUSE => TopLevelDecl::Package(node),
            kinds::IMPORT_DECLARATION => TopLevelDecl::Import(node),
            kinds::CONST_DECLARATION => TopLevelDecl::Const(node),
            kinds::VAR_DECLARATION => TopLevelDecl::Var(node),
            kinds::TYPE_DECLARATION => TopLevelDecl::Type(node),
            kinds::FUNCTION_DECLARATION => TopLevelDecl::Function(node),
            kinds::METHOD_DECLARATION => TopLevelDecl::Method(node),
            kinds::COMMENT => TopLevelDecl::Comment(node),
            _ => return None,
        };
        Some(decl)
    }
}

pub fn is_top_level_kind(kind: &str) -> bool {
    matches!(
        kind,
        kinds::PACKAGE_CLAUSE
            | kinds::IMPORT_DECLARATION
            | kinds::CONST_DECLARATION
            | kinds::VAR_DECLARATION
            | kinds::TYPE_DECLARATION
            | kinds::FUNCTION_DECLARATION
            | kinds::METHOD_DECLARATION
            | kinds::COMMENT
    )
}

/// Source text of a node
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Named children, skipping comments
pub fn named_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != kinds::COMMENT)
        .collect()
}

/// All children bound to a field name, in source order
pub fn field_children<'tree>(node: &Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Top-level statements of a block, with or without a `statement_list` wrapper
pub fn block_statements<'tree>(block: &Node<'tree>) -> Vec<Node<'tree>> {
    named_children(block)
        .into_iter()
        .flat_map(|child| {
            if child.kind() == kinds::STATEMENT_LIST {
                named_children(&child)
            } else {
                vec![child]
            }
        })
        .collect()
}

/// Strip the quotes of an interpreted or raw string literal
pub fn unquote(literal: &str) -> String {
    let trimmed = literal.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'`' && last == b'`') {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

/// `import` specs of an import declaration as (explicit name, path)
pub fn import_specs(decl: &Node, source: &str) -> Vec<(Option<String>, String)> {
    let mut specs = Vec::new();
    for child in named_children(decl) {
        let spec_nodes = match child.kind() {
            kinds::IMPORT_SPEC => vec![child],
            kinds::IMPORT_SPEC_LIST => named_children(&child)
                .into_iter()
                .filter(|n| n.kind() == kinds::IMPORT_SPEC)
                .collect(),
            _ => Vec::new(),
        };
        for spec in spec_nodes {
            let Some(path) = spec.child_by_field_name("path") else {
                continue;
            };
            let name = spec
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string());
            specs.push((name, unquote(node_text(&path, source))));
        }
    }
    specs
}

/// Convert a type node into a `TypeExpr`
///
/// Kinds without a structural rendering keep their source text verbatim.
pub fn type_expr(node: &Node, source: &str) -> TypeExpr {
    let text = || TypeExpr::Literal(node_text(node, source).to_string());
    let field = |name: &str| node.child_by_field_name(name);

    match node.kind() {
        kinds::TYPE_IDENTIFIER | kinds::IDENTIFIER => TypeExpr::named(node_text(node, source)),
        kinds::QUALIFIED_TYPE => match (field("package"), field("name")) {
            (Some(pkg), Some(name)) => {
                TypeExpr::qualified(node_text(&pkg, source), node_text(&name, source))
            }
            _ => text(),
        },
        kinds::POINTER_TYPE => match named_children(node).first() {
            Some(inner) => TypeExpr::pointer(type_expr(inner, source)),
            None => text(),
        },
        kinds::SLICE_TYPE => match field("element") {
            Some(elem) => TypeExpr::slice(type_expr(&elem, source)),
            None => text(),
        },
        kinds::ARRAY_TYPE => match (field("length"), field("element")) {
            (Some(len), Some(elem)) => TypeExpr::Array {
                len: node_text(&len, source).to_string(),
                elem: Box::new(type_expr(&elem, source)),
            },
            _ => text(),
        },
        kinds::IMPLICIT_LENGTH_ARRAY_TYPE => match field("element") {
            Some(elem) => TypeExpr::Array {
                len: "...".to_string(),
                elem: Box::new(type_expr(&elem, source)),
            },
            None => text(),
        },
        kinds::MAP_TYPE => match (field("key"), field("value")) {
            (Some(key), Some(value)) => {
                TypeExpr::map(type_expr(&key, source), type_expr(&value, source))
            }
            _ => text(),
        },
        kinds::CHANNEL_TYPE => match field("value") {
            Some(value) => TypeExpr::Channel {
                dir: channel_dir(node),
                elem: Box::new(type_expr(&value, source)),
            },
            None => text(),
        },
        kinds::PARENTHESIZED_TYPE => match named_children(node).first() {
            Some(inner) => type_expr(inner, source),
            None => text(),
        },
        kinds::GENERIC_TYPE => match (field("type"), field("type_arguments")) {
            (Some(base), Some(args)) => TypeExpr::Generic {
                base: Box::new(type_expr(&base, source)),
                args: named_children(&args)
                    .iter()
                    .map(|arg| type_argument(arg, source))
                    .collect(),
            },
            _ => text(),
        },
        _ => text(),
    }
}

/// Unwrap a single-term `type_elem`; unions stay verbatim
fn type_argument(node: &Node, source: &str) -> TypeExpr {
    if node.kind() == kinds::TYPE_ELEM {
        let terms = named_children(node);
        if let [only] = terms.as_slice() {
            return type_expr(only, source);
        }
        return TypeExpr::Literal(node_text(node, source).to_string());
    }
    type_expr(node, source)
}

fn channel_dir(node: &Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .take(2)
        .map(|c| c.kind())
        .collect();
    match tokens.as_slice() {
        ["<-", ..] => ChanDir::Receive,
        ["chan", "<-"] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}
