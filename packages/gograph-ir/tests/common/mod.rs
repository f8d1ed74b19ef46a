//! Common test utilities for gograph-ir
//!
//! Go source fixtures and a temporary repository builder shared by the
//! integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
