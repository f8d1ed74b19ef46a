//! Shared models and constants used across features

pub mod constants;
pub mod models;
