//! Centralized constants
//!
//! Defaults for the Go repository layout and tunable limits. Runtime
//! overrides live in `config::ExtractConfig`.

/// Go repository layout
pub mod layout {
    /// Module manifest file name
    pub const MANIFEST_FILE: &str = "go.mod";

    /// Source file extension (without dot)
    pub const SOURCE_EXTENSION: &str = "go";

    /// Suffix marking test files
    pub const TEST_SUFFIX: &str = "_test.go";

    /// Directories starting with this prefix are never descended
    pub const HIDDEN_PREFIX: &str = ".";
}

/// Thread pool configuration
pub mod thread_pool {
    /// Minimum number of workers
    pub const MIN_WORKERS: usize = 1;

    /// Maximum accepted worker count
    pub const MAX_WORKERS: usize = 512;
}

/// Naming of synthesized records
pub mod naming {
    /// Separator between a parent function name and a literal's ordinal
    pub const LITERAL_SEPARATOR: char = '$';
}

/// Configuration schema
pub mod schema {
    /// Current YAML schema version
    pub const CONFIG_VERSION: u32 = 1;

    pub const SUPPORTED_VERSIONS: &[u32] = &[1];
}
