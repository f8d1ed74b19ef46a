//! Import-only scan
//!
//! Reads the import declarations of a parsed file without visiting any other
//! declaration. Go requires imports to precede all other declarations, so
//! the scan stops at the first non-import, non-package declaration.

use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::infrastructure::tree_sitter::syntax::{import_specs, named_children};
use crate::features::parsing::infrastructure::TopLevelDecl;
use crate::shared::models::Import;

/// Imports of a file in declaration order
pub fn scan_imports(tree: &ParsedTree) -> Vec<Import> {
    let root = tree.root();
    let mut imports = Vec::new();

    for child in named_children(&root) {
        match TopLevelDecl::classify(child) {
            Some(TopLevelDecl::Import(decl)) => {
                imports.extend(
                    import_specs(&decl, tree.source())
                        .into_iter()
                        .map(|(alias, path)| Import::new(path, alias)),
                );
            }
            Some(TopLevelDecl::Package(_)) | Some(TopLevelDecl::Comment(_)) => {}
            Some(
                TopLevelDecl::Const(_)
                | TopLevelDecl::Var(_)
                | TopLevelDecl::Type(_)
                | TopLevelDecl::Function(_)
                | TopLevelDecl::Method(_),
            )
            | None => break,
        }
    }

    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::GoParser;
    use crate::features::parsing::ports::SourceParser;
    use crate::shared::models::Result;

    fn scan_source_imports(
        parser: &dyn SourceParser,
        source: String,
        file_path: &str,
    ) -> Result<Vec<Import>> {
        let tree = parser.parse(source, file_path)?;
        Ok(scan_imports(&tree))
    }

    #[test]
    fn test_scan_grouped_and_single_imports() {
        let source = r#"package main

import "fmt"

import (
	"net/http"
	v2 "github.com/acme/pkg/v2"
	. "strings"
)

func main() {}
"#;
        let imports = scan_source_imports(&GoParser::new(), source.to_string(), "main.go").unwrap();
        let paths: Vec<&str> = imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["fmt", "net/http", "github.com/acme/pkg/v2", "strings"]
        );

        assert_eq!(imports[1].alias, "http");
        assert!(!imports[1].explicit);
        assert_eq!(imports[2].alias, "v2");
        assert!(imports[2].explicit);
        assert_eq!(imports[3].alias, ".");
    }

    #[test]
    fn test_no_imports() {
        let imports =
            scan_source_imports(&GoParser::new(), "package p\n".to_string(), "p.go").unwrap();
        assert!(imports.is_empty());
    }

    #[test]
    fn test_parse_failure_propagates() {
        let result = scan_source_imports(&GoParser::new(), "package\n".to_string(), "bad.go");
        assert!(result.is_err());
    }
}
