//! Graph projection of a Module
//!
//! Nodes and edges shaped for a code knowledge graph. Projection is a pure
//! function of the Module, so two projections of equal modules are equal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::shared::models::{Function, Module, Span, Struct, Variable};

// ═══════════════════════════════════════════════════════════════════════════
// Nodes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Module,
    Package,
    File,
    Struct,
    Function,
    Variable,
    /// A module reached through `require` or `replace`, not parsed here
    ExternalModule,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Package => "package",
            NodeKind::File => "file",
            NodeKind::Struct => "struct",
            NodeKind::Function => "function",
            NodeKind::Variable => "variable",
            NodeKind::ExternalModule => "external_module",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique within one ModuleGraph
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Edges
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeKind {
    /// module → package → file → declaration
    Contains,
    /// function → referenced symbol name
    References,
    /// module → required module
    DependsOn { version: String, indirect: bool },
    /// replaced module → replacement
    Replaces {
        old_version: String,
        new_version: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    /// Node id, or the raw symbol name for `References`
    pub target: String,
    pub kind: EdgeKind,
}

// ═══════════════════════════════════════════════════════════════════════════
// ModuleGraph
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    pub module_path: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ModuleGraph {
    pub fn from_module(module: &Module) -> Self {
        Projector::new(module).project()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == source)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

pub fn module_id(path: &str) -> String {
    format!("module:{path}")
}

pub fn package_id(package: &str) -> String {
    format!("package:{package}")
}

pub fn file_id(module_path: &str, rel_path: &str) -> String {
    format!("file:{module_path}/{rel_path}")
}

struct Projector<'m> {
    module: &'m Module,
    graph: ModuleGraph,
    ids: BTreeSet<String>,
}

impl<'m> Projector<'m> {
    fn new(module: &'m Module) -> Self {
        let module_path = if module.path.is_empty() {
            module.dir.display().to_string()
        } else {
            module.path.clone()
        };
        Self {
            module,
            graph: ModuleGraph {
                module_path,
                ..ModuleGraph::default()
            },
            ids: BTreeSet::new(),
        }
    }

    fn project(mut self) -> ModuleGraph {
        let module = self.module;
        let root = module_id(&self.graph.module_path);
        let root_name = self.graph.module_path.clone();
        self.add_node(root.clone(), NodeKind::Module, root_name, None, None);

        // package → files, in path order
        let mut files_by_package: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for file in &module.files {
            files_by_package
                .entry(file.package.as_str())
                .or_default()
                .push(file.rel_path.as_str());
        }

        for (package, files) in &files_by_package {
            let pkg = package_id(package);
            self.add_node(pkg.clone(), NodeKind::Package, package.to_string(), None, None);
            self.contains(&root, &pkg);
            for rel_path in files {
                let file = file_id(&self.graph.module_path, rel_path);
                self.add_node(file.clone(), NodeKind::File, rel_path.to_string(), None, None);
                self.contains(&pkg, &file);
            }
        }

        for structs in module.pkg_structs.values() {
            for record in structs {
                self.add_struct(record);
            }
        }
        for vars in module.pkg_variables.values() {
            for var in vars {
                self.add_variable(var);
            }
        }
        for funcs in module.pkg_functions.values() {
            for func in funcs {
                self.add_function(func);
            }
        }

        self.add_dependencies(&root);
        self.graph
    }

    /// Insert a node; colliding ids get a `#n` suffix
    fn add_node(
        &mut self,
        id: String,
        kind: NodeKind,
        name: String,
        file: Option<String>,
        span: Option<Span>,
    ) -> String {
        let mut unique = id.clone();
        let mut n = 1;
        while self.ids.contains(&unique) {
            n += 1;
            unique = format!("{id}#{n}");
        }
        self.ids.insert(unique.clone());
        self.graph.nodes.push(GraphNode {
            id: unique.clone(),
            kind,
            name,
            file,
            span,
        });
        unique
    }

    fn contains(&mut self, source: &str, target: &str) {
        self.graph.edges.push(GraphEdge {
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Contains,
        });
    }

    fn decl_id(&self, kind: NodeKind, package: &str, file: &str, name: &str) -> String {
        format!("{}:{package}:{file}:{name}", kind.as_str())
    }

    fn add_struct(&mut self, record: &Struct) {
        let id = self.decl_id(NodeKind::Struct, &record.package, &record.file, &record.name);
        let id = self.add_node(
            id,
            NodeKind::Struct,
            record.name.clone(),
            Some(record.file.clone()),
            Some(record.span),
        );
        let file = file_id(&self.graph.module_path, &record.file);
        self.contains(&file, &id);
    }

    fn add_variable(&mut self, var: &Variable) {
        let id = self.decl_id(NodeKind::Variable, &var.package, &var.file, &var.name);
        let id = self.add_node(
            id,
            NodeKind::Variable,
            var.name.clone(),
            Some(var.file.clone()),
            var.span,
        );
        let file = file_id(&self.graph.module_path, &var.file);
        self.contains(&file, &id);
    }

    fn add_function(&mut self, func: &Function) {
        // methods are keyed by receiver type so `A.String` and `B.String` differ
        let qualified = match &func.receiver {
            Some(recv) if !recv.base_type.is_empty() => format!("{}.{}", recv.base_type, func.name),
            _ => func.name.clone(),
        };
        let id = self.decl_id(NodeKind::Function, &func.package, &func.file, &qualified);
        let id = self.add_node(
            id,
            NodeKind::Function,
            func.name.clone(),
            Some(func.file.clone()),
            Some(func.span),
        );
        let file = file_id(&self.graph.module_path, &func.file);
        self.contains(&file, &id);

        for symbol in &func.references {
            self.graph.edges.push(GraphEdge {
                source: id.clone(),
                target: symbol.clone(),
                kind: EdgeKind::References,
            });
        }
    }

    fn external(&mut self, path: &str) -> String {
        let id = module_id(path);
        if !self.ids.contains(&id) {
            self.add_node(id.clone(), NodeKind::ExternalModule, path.to_string(), None, None);
        }
        id
    }

    fn add_dependencies(&mut self, root: &str) {
        let module = self.module;
        for dep in &module.requires {
            let target = self.external(&dep.path);
            self.graph.edges.push(GraphEdge {
                source: root.to_string(),
                target,
                kind: EdgeKind::DependsOn {
                    version: dep.version.clone(),
                    indirect: dep.indirect,
                },
            });
        }
        for rule in &module.replaces {
            let source = self.external(&rule.old_path);
            let target = self.external(&rule.new_path);
            self.graph.edges.push(GraphEdge {
                source,
                target,
                kind: EdgeKind::Replaces {
                    old_version: rule.old_version.clone(),
                    new_version: rule.new_version.clone(),
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Dependency, ReplaceRule, SourceFile, StructKind};

    fn sample_module() -> Module {
        let mut module = Module::new("/repo/svc");
        module.path = "example.com/svc".to_string();
        module.requires = vec![Dependency::new("github.com/pkg/errors", "v0.9.1", false)];
        module.replaces = vec![ReplaceRule {
            old_path: "github.com/pkg/errors".to_string(),
            old_version: String::new(),
            new_path: "../errors".to_string(),
            new_version: String::new(),
        }];

        let file = SourceFile {
            rel_path: "api/handler.go".to_string(),
            name: "handler.go".to_string(),
            package: "example.com/svc/api".to_string(),
            content: String::new(),
            imports: Vec::new(),
            is_test: false,
        };

        let mut init_a = Function::new("init", &file.package, &file.rel_path, Span::zero());
        init_a.references.insert("registry".to_string());
        let init_b = Function::new("init", &file.package, &file.rel_path, Span::zero());
        let handler = Struct::new(
            "Handler",
            &file.package,
            &file.rel_path,
            StructKind::Struct,
            Span::zero(),
        );

        module.merge_file(file, vec![init_a, init_b], Vec::new(), vec![handler]);
        module
    }

    #[test]
    fn test_containment_chain() {
        let graph = ModuleGraph::from_module(&sample_module());

        let root = module_id("example.com/svc");
        let pkg = package_id("example.com/svc/api");
        let file = file_id("example.com/svc", "api/handler.go");

        assert_eq!(graph.node(&root).unwrap().kind, NodeKind::Module);
        assert!(graph.edges_from(&root).any(|e| e.target == pkg));
        assert!(graph.edges_from(&pkg).any(|e| e.target == file));
        assert_eq!(
            graph
                .edges_from(&file)
                .filter(|e| e.kind == EdgeKind::Contains)
                .count(),
            3
        );
    }

    #[test]
    fn test_ids_unique_for_repeated_init() {
        let graph = ModuleGraph::from_module(&sample_module());
        let ids: BTreeSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), graph.node_count());
        assert_eq!(graph.nodes_of(NodeKind::Function).count(), 2);
    }

    #[test]
    fn test_reference_and_dependency_edges() {
        let graph = ModuleGraph::from_module(&sample_module());

        assert!(graph
            .edges
            .iter()
            .any(|e| e.kind == EdgeKind::References && e.target == "registry"));

        let root = module_id("example.com/svc");
        let dep = graph
            .edges_from(&root)
            .find(|e| matches!(e.kind, EdgeKind::DependsOn { .. }))
            .unwrap();
        assert_eq!(dep.target, module_id("github.com/pkg/errors"));

        let replace = graph
            .edges
            .iter()
            .find(|e| matches!(e.kind, EdgeKind::Replaces { .. }))
            .unwrap();
        assert_eq!(replace.source, module_id("github.com/pkg/errors"));
        assert_eq!(replace.target, module_id("../errors"));
        // the required module node is shared, not duplicated
        assert_eq!(graph.nodes_of(NodeKind::ExternalModule).count(), 2);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let module = sample_module();
        assert_eq!(ModuleGraph::from_module(&module), ModuleGraph::from_module(&module));
    }
}
