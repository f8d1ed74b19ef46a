//! Shared models

mod declarations;
mod error;
mod module;
mod span;

pub use declarations::{
    default_alias, Function, Import, SourceFile, Struct, StructKind, Variable, UNNAMED,
};
pub use error::{ErrorKind, GographError, Result};
pub use module::{Dependency, FileWarning, Module, ReplaceRule};
pub use span::{Position, Span};
