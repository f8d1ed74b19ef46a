//! Type expressions
//!
//! Closed representation of the Go type syntax the extractor understands.
//! Anything else (function, struct and interface type literals, constraint
//! unions) is kept as verbatim source text.

use serde::{Deserialize, Serialize};

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Receive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    /// `T`
    Named(String),
    /// `pkg.T`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`, length kept verbatim (`...` for implicit lengths)
    Array { len: String, elem: Box<TypeExpr> },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `chan<- T`, `<-chan T`
    Channel { dir: ChanDir, elem: Box<TypeExpr> },
    /// `...T` in a parameter list
    Variadic(Box<TypeExpr>),
    /// `G[A, B]`
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    /// Verbatim source of a type literal
    Literal(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(inner: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(inner))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Fully rendered signature with every wrapper
    pub fn display(&self) -> String {
        match self {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
            TypeExpr::Pointer(inner) => format!("*{}", inner.display()),
            TypeExpr::Slice(inner) => format!("[]{}", inner.display()),
            TypeExpr::Array { len, elem } => format!("[{len}]{}", elem.display()),
            TypeExpr::Map { key, value } => format!("map[{}]{}", key.display(), value.display()),
            TypeExpr::Channel { dir, elem } => match dir {
                ChanDir::Both => format!("chan {}", elem.display()),
                ChanDir::Send => format!("chan<- {}", elem.display()),
                ChanDir::Receive => format!("<-chan {}", elem.display()),
            },
            TypeExpr::Variadic(inner) => format!("...{}", inner.display()),
            TypeExpr::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(TypeExpr::display).collect();
                format!("{}[{}]", base.display(), args.join(", "))
            }
            TypeExpr::Literal(text) => text.clone(),
        }
    }

    /// Innermost named type, before import resolution
    pub fn base(&self) -> &TypeExpr {
        match self {
            TypeExpr::Pointer(inner)
            | TypeExpr::Slice(inner)
            | TypeExpr::Variadic(inner)
            | TypeExpr::Array { elem: inner, .. }
            | TypeExpr::Channel { elem: inner, .. } => inner.base(),
            TypeExpr::Map { value, .. } => value.base(),
            TypeExpr::Generic { base, .. } => base.base(),
            TypeExpr::Named(_) | TypeExpr::Qualified { .. } | TypeExpr::Literal(_) => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_wrappers() {
        let ty = TypeExpr::pointer(TypeExpr::slice(TypeExpr::map(
            TypeExpr::named("string"),
            TypeExpr::qualified("v2", "Thing"),
        )));
        assert_eq!(ty.display(), "*[]map[string]v2.Thing");
        assert_eq!(ty.base(), &TypeExpr::qualified("v2", "Thing"));
    }

    #[test]
    fn test_channel_and_variadic_display() {
        let ch = TypeExpr::Channel {
            dir: ChanDir::Receive,
            elem: Box::new(TypeExpr::named("int")),
        };
        assert_eq!(ch.display(), "<-chan int");
        assert_eq!(ch.base().display(), "int");

        let va = TypeExpr::Variadic(Box::new(TypeExpr::named("any")));
        assert_eq!(va.display(), "...any");
    }

    #[test]
    fn test_generic_base_is_the_generic_type() {
        let ty = TypeExpr::Generic {
            base: Box::new(TypeExpr::qualified("list", "List")),
            args: vec![TypeExpr::named("int"), TypeExpr::pointer(TypeExpr::named("T"))],
        };
        assert_eq!(ty.display(), "list.List[int, *T]");
        assert!(matches!(ty.base(), TypeExpr::Qualified { .. }));
    }
}
