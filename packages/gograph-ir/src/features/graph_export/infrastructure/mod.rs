//! Graph export infrastructure

mod memory_store;

pub use memory_store::InMemoryGraphStore;
