pub mod matcher;

// Re-export common utilities
pub use matcher::{compile_pattern, join_patterns};
