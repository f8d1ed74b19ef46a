//! Manifest infrastructure

mod go_mod;

pub use go_mod::GoModParser;
