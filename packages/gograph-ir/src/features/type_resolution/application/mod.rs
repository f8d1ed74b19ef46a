//! Type resolution use cases

mod resolver;

pub use resolver::{ResolvedType, TypeResolver};
