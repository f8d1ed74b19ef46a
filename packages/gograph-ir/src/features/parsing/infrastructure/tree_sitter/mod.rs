//! Tree-sitter based parser implementation

mod parser;
pub mod syntax;

pub use parser::GoParser;
pub use syntax::TopLevelDecl;
