//! Settings module for override-hub
//!
//! Holds the profile: every table an override run reads, with built-in
//! defaults and optional YAML/TOML overrides.

pub mod profile;

use thiserror::Error;

pub use profile::{CompiledProfile, CompiledRegion, GroupIcons, GroupNames, Profile};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid pattern for {name}: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown region '{region}' referenced by {owner}")]
    UnknownRegion { owner: String, region: String },

    #[error("Duplicate group name: {0}")]
    DuplicateGroup(String),

    #[error("Unknown group '{member}' referenced by {owner}")]
    UnknownMember { owner: String, member: String },

    #[error("Direct group '{0}' is not defined as a service")]
    MissingDirectGroup(String),
}
