//! Generate rule-based routing overrides from a proxy subscription.
//!
//! The pipeline resolves host flags, classifies nodes by region, and
//! assembles proxy groups, rule providers, rules and DNS settings for a
//! Clash-compatible router.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod constants;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

pub use generator::{override_to_clash, ClashOverride};
pub use interfaces::{
    override_config, override_json, override_yaml, OutputFormat, OverrideConfig,
    OverrideConfigBuilder, OverrideError,
};
pub use models::{FeatureFlags, ProxyNode, SubscriptionConfig};
pub use settings::{CompiledProfile, Profile, SettingsError};
