//! File visitor
//!
//! Single pass over the declarations of one parsed Go file. Produces the
//! file's imports, package-level variables and constants, type declarations
//! and a flat list of functions (named, methods and every nested literal),
//! sorted by start offset.

use tree_sitter::Node;
use tracing::error;

use super::field_list::DeclContext;
use super::reference_collector::ReferenceCollector;
use crate::features::extraction::domain::FileExtraction;
use crate::features::parsing::application::scan_imports;
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::infrastructure::tree_sitter::syntax::{
    field_children, kinds, named_children,
};
use crate::features::parsing::infrastructure::TopLevelDecl;
use crate::features::type_resolution::{ImportTable, TypeResolver};
use crate::shared::constants::naming::LITERAL_SEPARATOR;
use crate::shared::models::{Function, Struct, StructKind, Variable};

pub struct FileVisitor<'a> {
    tree: &'a ParsedTree,
    package: &'a str,
    rel_path: &'a str,
}

impl<'a> FileVisitor<'a> {
    pub fn new(tree: &'a ParsedTree, package: &'a str, rel_path: &'a str) -> Self {
        Self {
            tree,
            package,
            rel_path,
        }
    }

    pub fn visit(&self) -> FileExtraction {
        let mut out = FileExtraction::new(self.package, self.rel_path);
        let root = self.tree.root();

        if root.has_error() {
            self.precondition_violation(&root, "tree contains syntax errors");
        }

        // Go requires imports before every other declaration, so the table
        // is complete before any type is resolved
        let imports = scan_imports(self.tree);
        let table: ImportTable = imports.iter().collect();
        out.imports = imports;

        let ctx = DeclContext {
            tree: self.tree,
            package: self.package,
            file: self.rel_path,
            resolver: TypeResolver::new(&table),
        };

        let mut cursor = root.walk();
        let children: Vec<Node> = root.named_children(&mut cursor).collect();
        for child in children {
            let Some(decl) = TopLevelDecl::classify(child) else {
                self.precondition_violation(&child, "unexpected top-level node");
                continue;
            };
            match decl {
                TopLevelDecl::Package(_) | TopLevelDecl::Import(_) | TopLevelDecl::Comment(_) => {}
                TopLevelDecl::Const(node) | TopLevelDecl::Var(node) => {
                    out.variables.extend(self.value_specs(&ctx, &node));
                }
                TopLevelDecl::Type(node) => {
                    out.structs.extend(self.type_specs(&ctx, &node));
                }
                TopLevelDecl::Function(node) | TopLevelDecl::Method(node) => {
                    out.functions.extend(self.function(&ctx, &node));
                }
            }
        }

        // Stable: a literal never shares a start offset with its parent
        out.functions.sort_by_key(|f| f.span.start.offset);
        out
    }

    fn precondition_violation(&self, node: &Node, message: &str) {
        let pos = self.tree.position(node.start_byte());
        error!(
            file = %self.rel_path,
            line = pos.line,
            column = pos.column,
            kind = node.kind(),
            "Malformed syntax tree: {message}"
        );
        debug_assert!(
            false,
            "malformed syntax tree in {} at {}:{}: {message} ({})",
            self.rel_path,
            pos.line,
            pos.column,
            node.kind()
        );
    }

    /// One variable per declared name of every `const`/`var` spec
    fn value_specs(&self, ctx: &DeclContext, decl: &Node) -> Vec<Variable> {
        let specs = named_children(decl).into_iter().flat_map(|child| {
            if child.kind() == kinds::VAR_SPEC_LIST {
                named_children(&child)
            } else {
                vec![child]
            }
        });

        let mut vars = Vec::new();
        for spec in specs {
            if spec.kind() != kinds::CONST_SPEC && spec.kind() != kinds::VAR_SPEC {
                continue;
            }
            let ty = spec.child_by_field_name("type").map(|t| ctx.type_of(&t));
            let values = spec
                .child_by_field_name("value")
                .map(|v| named_children(&v))
                .unwrap_or_default();
            let content = ctx.text(&spec);
            let span = self.tree.span(&spec);

            for (i, name) in field_children(&spec, "name").iter().enumerate() {
                let value = values.get(i).map(|v| ctx.text(v).to_string());
                vars.push(
                    ctx.variable(ctx.text(name), ty.as_ref())
                        .with_value(value)
                        .with_source(content, span),
                );
            }
        }
        vars
    }

    /// Every spec of a `type` declaration; grouped specs share the group's span
    fn type_specs(&self, ctx: &DeclContext, decl: &Node) -> Vec<Struct> {
        let content = ctx.text(decl);
        let span = self.tree.span(decl);

        named_children(decl)
            .into_iter()
            .filter(|spec| matches!(spec.kind(), kinds::TYPE_SPEC | kinds::TYPE_ALIAS))
            .filter_map(|spec| {
                let name = spec.child_by_field_name("name")?;
                let type_node = spec.child_by_field_name("type")?;
                let kind = match type_node.kind() {
                    kinds::STRUCT_TYPE if spec.kind() == kinds::TYPE_SPEC => StructKind::Struct,
                    kinds::INTERFACE_TYPE if spec.kind() == kinds::TYPE_SPEC => {
                        StructKind::Interface
                    }
                    _ => StructKind::Named,
                };

                let mut record =
                    Struct::new(ctx.text(&name), self.package, self.rel_path, kind, span)
                        .with_content(content);
                if kind == StructKind::Struct {
                    if let Some(list) = named_children(&type_node)
                        .into_iter()
                        .find(|n| n.kind() == kinds::FIELD_DECLARATION_LIST)
                    {
                        record.fields = ctx.struct_fields(&list);
                    }
                }
                Some(record)
            })
            .collect()
    }

    /// A named function or method followed by the literals inside it
    fn function(&self, ctx: &DeclContext, node: &Node) -> Vec<Function> {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.text(&n))
            .unwrap_or_default();

        let mut func = self.signature(ctx, node, name);
        if node.kind() == kinds::METHOD_DECLARATION {
            func.receiver = node
                .child_by_field_name("receiver")
                .and_then(|r| ctx.receiver(&r));
        }

        let Some(body) = node.child_by_field_name("body") else {
            return vec![func];
        };

        let mut literals = Vec::new();
        collect_literals(&body, &mut literals);
        func.child_count = literals.len();
        func.references = ReferenceCollector::new(self.tree.source()).collect(&body);

        let mut out = Vec::with_capacity(literals.len() + 1);
        for (i, literal) in literals.iter().enumerate() {
            let literal_name = format!("{}{}{}", func.name, LITERAL_SEPARATOR, i + 1);
            out.push(self.signature(ctx, literal, &literal_name).with_parent(func.name.clone()));
        }
        out.insert(0, func);
        out
    }

    /// Name, span, text, parameters and results of a function-like node
    fn signature(&self, ctx: &DeclContext, node: &Node, name: &str) -> Function {
        let mut func = Function::new(name, self.package, self.rel_path, self.tree.span(node))
            .with_content(ctx.text(node));
        func.params = node
            .child_by_field_name("parameters")
            .map(|p| ctx.parameters(&p))
            .unwrap_or_default();
        func.results = node
            .child_by_field_name("result")
            .map(|r| ctx.results(&r))
            .unwrap_or_default();
        func
    }
}

/// Function literals below `node`, pre-order
fn collect_literals<'t>(node: &Node<'t>, out: &mut Vec<Node<'t>>) {
    for child in named_children(node) {
        if child.kind() == kinds::FUNC_LITERAL {
            out.push(child);
        }
        collect_literals(&child, out);
    }
}
