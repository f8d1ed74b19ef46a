//! Type resolution domain models

mod import_table;
mod type_expr;

pub use import_table::ImportTable;
pub use type_expr::{ChanDir, TypeExpr};
