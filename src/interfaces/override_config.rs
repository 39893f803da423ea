use clap::ValueEnum;
use log::{debug, info};
use thiserror::Error;

use crate::generator::{override_to_clash, ClashOverride};
use crate::models::{FeatureFlags, SubscriptionConfig};
use crate::parser::{parse_query_string, RawArgs};
use crate::settings::{CompiledProfile, Profile, SettingsError};

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile error: {0}")]
    Settings(#[from] SettingsError),

    #[error("No subscription provided")]
    MissingSubscription,
}

/// Serialisation of the generated document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    JsonPretty,
}

/// Parse a subscription document, JSON if it looks like an object, YAML otherwise
pub fn parse_subscription(content: &str) -> Result<SubscriptionConfig, OverrideError> {
    if content.trim_start().starts_with('{') {
        debug!("Parsing subscription as JSON");
        Ok(serde_json::from_str(content)?)
    } else {
        debug!("Parsing subscription as YAML");
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Run the override pipeline on an already parsed subscription
pub fn override_config(
    input: &SubscriptionConfig,
    flags: &FeatureFlags,
    profile: &CompiledProfile,
) -> ClashOverride {
    override_to_clash(input, flags, profile)
}

/// Serialise a generated document
pub fn render(output: &ClashOverride, format: OutputFormat) -> Result<String, OverrideError> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(output)?,
        OutputFormat::Json => serde_json::to_string(output)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(output)?,
    })
}

/// Override a YAML or JSON subscription with the built-in profile, returning YAML
pub fn override_yaml(content: &str, args: &RawArgs) -> Result<String, OverrideError> {
    OverrideConfigBuilder::new()
        .subscription_content(content)
        .args(args.clone())
        .format(OutputFormat::Yaml)
        .build()?
        .run()
}

/// Same as [`override_yaml`] but renders compact JSON
pub fn override_json(content: &str, args: &RawArgs) -> Result<String, OverrideError> {
    OverrideConfigBuilder::new()
        .subscription_content(content)
        .args(args.clone())
        .format(OutputFormat::Json)
        .build()?
        .run()
}

/// A fully resolved override request
#[derive(Debug, Clone)]
pub struct OverrideConfig {
    /// Parsed input subscription
    pub subscription: SubscriptionConfig,
    /// Resolved feature switches
    pub flags: FeatureFlags,
    /// Custom profile, the built-in one when `None`
    pub profile: Option<CompiledProfile>,
    pub format: OutputFormat,
}

impl OverrideConfig {
    pub fn profile(&self) -> &CompiledProfile {
        match &self.profile {
            Some(profile) => profile,
            None => CompiledProfile::builtin(),
        }
    }

    /// Generate the override document
    pub fn generate(&self) -> ClashOverride {
        override_config(&self.subscription, &self.flags, self.profile())
    }

    /// Generate and render in the requested format
    pub fn run(&self) -> Result<String, OverrideError> {
        info!(
            "Processing override request for {} proxies",
            self.subscription.proxies.len()
        );
        render(&self.generate(), self.format)
    }
}

/// Builder for OverrideConfig
#[derive(Debug, Clone, Default)]
pub struct OverrideConfigBuilder {
    subscription: Option<SubscriptionConfig>,
    content: Option<String>,
    args: RawArgs,
    flags: Option<FeatureFlags>,
    profile: Option<Profile>,
    format: OutputFormat,
}

impl OverrideConfigBuilder {
    /// Create a new default builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already parsed subscription
    pub fn subscription(mut self, subscription: SubscriptionConfig) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Use raw YAML or JSON content, parsed on `build`
    pub fn subscription_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Replace the raw host arguments
    pub fn args(mut self, args: RawArgs) -> Self {
        self.args = args;
        self
    }

    /// Add a single raw argument
    pub fn arg(mut self, key: &str, value: serde_json::Value) -> Self {
        self.args.insert(key.to_string(), value);
        self
    }

    /// Merge arguments from a `key=value&...` query string
    pub fn query(mut self, query: &str) -> Self {
        self.args.extend(parse_query_string(query));
        self
    }

    /// Set flags directly, ignoring raw arguments
    pub fn flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<OverrideConfig, OverrideError> {
        let subscription = match (self.subscription, self.content) {
            (Some(subscription), _) => subscription,
            (None, Some(content)) => parse_subscription(&content)?,
            (None, None) => return Err(OverrideError::MissingSubscription),
        };
        let flags = self
            .flags
            .unwrap_or_else(|| FeatureFlags::from_args(&self.args));
        let profile = self.profile.map(Profile::compile).transpose()?;

        Ok(OverrideConfig {
            subscription,
            flags,
            profile,
            format: self.format,
        })
    }
}
