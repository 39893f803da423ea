pub mod override_config;

pub use override_config::{
    override_config, override_json, override_yaml, parse_subscription, render, OutputFormat,
    OverrideConfig, OverrideConfigBuilder, OverrideError,
};
