//! Field-list extraction
//!
//! Shared by struct fields, receivers, parameters and results. Each name of
//! a field group becomes one `Variable`; unnamed groups yield a single
//! `Variable` named `_`.

use tree_sitter::Node;

use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::infrastructure::tree_sitter::syntax::{
    field_children, kinds, named_children, node_text, type_expr,
};
use crate::features::type_resolution::{TypeExpr, TypeResolver};
use crate::shared::models::{Variable, UNNAMED};

/// Per-file state every declaration extractor needs
pub struct DeclContext<'a> {
    pub tree: &'a ParsedTree,
    pub package: &'a str,
    pub file: &'a str,
    pub resolver: TypeResolver<'a>,
}

impl<'a> DeclContext<'a> {
    pub fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.tree.source())
    }

    pub fn type_of(&self, node: &Node) -> TypeExpr {
        type_expr(node, self.tree.source())
    }

    /// Variable with display and base types resolved through the alias table
    pub fn variable(&self, name: &str, ty: Option<&TypeExpr>) -> Variable {
        let resolved = self.resolver.resolve_opt(ty);
        Variable::new(name, self.package, self.file).with_types(resolved.display, resolved.base)
    }

    /// One variable per name, or a single `_` when the group is unnamed
    fn group(&self, names: &[Node], ty: &TypeExpr) -> Vec<Variable> {
        if names.is_empty() {
            return vec![self.variable(UNNAMED, Some(ty))];
        }
        names
            .iter()
            .map(|name| self.variable(self.text(name), Some(ty)))
            .collect()
    }

    /// Parameters of a `parameter_list`
    pub fn parameters(&self, list: &Node) -> Vec<Variable> {
        let mut vars = Vec::new();
        for decl in named_children(list) {
            let Some(type_node) = decl.child_by_field_name("type") else {
                continue;
            };
            let mut ty = self.type_of(&type_node);
            if decl.kind() == kinds::VARIADIC_PARAMETER_DECLARATION {
                ty = TypeExpr::Variadic(Box::new(ty));
            }
            vars.extend(self.group(&field_children(&decl, "name"), &ty));
        }
        vars
    }

    /// Results: a parenthesised list or a single bare type
    pub fn results(&self, result: &Node) -> Vec<Variable> {
        if result.kind() == kinds::PARAMETER_LIST {
            self.parameters(result)
        } else {
            vec![self.variable(UNNAMED, Some(&self.type_of(result)))]
        }
    }

    /// Receiver of a method; the last field of the receiver list
    pub fn receiver(&self, list: &Node) -> Option<Variable> {
        self.parameters(list).pop()
    }

    /// Fields of a `field_declaration_list`; embedded fields are named `_`
    pub fn struct_fields(&self, list: &Node) -> Vec<Variable> {
        let mut vars = Vec::new();
        for decl in named_children(list) {
            if decl.kind() != kinds::FIELD_DECLARATION {
                continue;
            }
            let Some(type_node) = decl.child_by_field_name("type") else {
                continue;
            };
            let names = field_children(&decl, "name");
            let mut ty = self.type_of(&type_node);
            if names.is_empty() && is_embedded_pointer(&decl) {
                ty = TypeExpr::pointer(ty);
            }
            vars.extend(self.group(&names, &ty));
        }
        vars
    }
}

/// `*T` embedding: the `*` token is a sibling of the type, not a pointer_type
fn is_embedded_pointer(decl: &Node) -> bool {
    let mut cursor = decl.walk();
    let found = decl.children(&mut cursor).any(|c| c.kind() == "*");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::GoParser;
    use crate::features::parsing::ports::SourceParser;
    use crate::features::type_resolution::ImportTable;
    use crate::shared::models::Import;

    fn first_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        children.into_iter().find_map(|c| first_of_kind(c, kind))
    }

    fn with_context<R>(source: &str, f: impl FnOnce(&DeclContext, Node) -> R) -> R {
        let tree = GoParser::new().parse(source.to_string(), "x.go").unwrap();
        let imports: ImportTable = [Import::new("pkg/v2", None)].iter().collect();
        let ctx = DeclContext {
            tree: &tree,
            package: "example.com/m",
            file: "x.go",
            resolver: TypeResolver::new(&imports),
        };
        f(&ctx, tree.root())
    }

    #[test]
    fn test_parameters_share_group_type() {
        let source = "package p\n\nfunc f(a, b int, opts ...v2.Option) {}\n";
        with_context(source, |ctx, root| {
            let list = first_of_kind(root, kinds::PARAMETER_LIST).unwrap();
            let params = ctx.parameters(&list);

            let names: Vec<&str> = params.iter().map(|v| v.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b", "opts"]);
            assert_eq!(params[0].base_type, "int");
            assert_eq!(params[2].display_type, "...pkg/v2.Option");
            assert_eq!(params[2].base_type, "pkg/v2.Option");
            assert_eq!(params[2].package, "example.com/m");
        });
    }

    #[test]
    fn test_unnamed_parameters() {
        let source = "package p\n\nfunc f(int, *v2.Thing) {}\n";
        with_context(source, |ctx, root| {
            let list = first_of_kind(root, kinds::PARAMETER_LIST).unwrap();
            let params = ctx.parameters(&list);
            assert_eq!(params.len(), 2);
            assert!(params.iter().all(Variable::is_unnamed));
            assert_eq!(params[1].display_type, "*pkg/v2.Thing");
        });
    }

    #[test]
    fn test_struct_fields_with_embedding() {
        let source = r#"package p

type S struct {
	Name, Alias string
	*v2.Base
	io.Reader
	Tags map[string][]v2.Tag `json:"tags"`
}
"#;
        with_context(source, |ctx, root| {
            let list = first_of_kind(root, kinds::FIELD_DECLARATION_LIST).unwrap();
            let fields = ctx.struct_fields(&list);

            let names: Vec<&str> = fields.iter().map(|v| v.name.as_str()).collect();
            assert_eq!(names, vec!["Name", "Alias", "_", "_", "Tags"]);
            assert_eq!(fields[2].display_type, "*pkg/v2.Base");
            assert_eq!(fields[3].base_type, "io.Reader");
            assert_eq!(fields[4].display_type, "map[string][]pkg/v2.Tag");
            assert_eq!(fields[4].base_type, "pkg/v2.Tag");
        });
    }
}
