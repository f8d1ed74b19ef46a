/*
 * gograph-ir - Go repository extraction
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Module, Function, Span, GographError)
 * - config/      : ExtractConfig (builder + YAML)
 * - features/    : Vertical slices (parsing → manifest → type_resolution → extraction → graph_export)
 * - pipeline/    : ModuleDiscovery and ModuleParser
 *
 * Per-file extraction runs on rayon; merges into a Module happen on the
 * calling thread in walk order.
 */

#![allow(clippy::while_let_on_iterator)] // skip_current_dir needs the walker by name

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Discovery and per-module orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::ExtractConfig;
pub use features::extraction::{extract_file, FileExtraction};
pub use features::graph_export::{GraphStore, InMemoryGraphStore, ModuleGraph};
pub use pipeline::{parse_module, parse_repository, ModuleDiscovery, ModuleParser};
pub use shared::models::{
    Dependency, ErrorKind, FileWarning, Function, GographError, Module, ReplaceRule, Result,
    SourceFile, Span, Struct, StructKind, Variable,
};
pub use tokio_util::sync::CancellationToken;
