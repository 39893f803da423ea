//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use override_hub::models::{ProxyGroupConfig, ProxyGroupType, SubscriptionConfig};
//!
//! let sub = SubscriptionConfig::from_names(["HK-01", "US-01"]);
//! assert_eq!(sub.proxies.len(), 2);
//!
//! let group = ProxyGroupConfig::select("手动选择", Vec::new()).with_include_all();
//! assert_eq!(group.group_type, ProxyGroupType::Select);
//! ```

pub mod flags;
pub mod proxy;
pub mod proxy_group_config;
pub mod region;
pub mod ruleset;
pub mod service;

pub use flags::FeatureFlags;
pub use proxy::{ProxyNode, SubscriptionConfig};
pub use proxy_group_config::{HealthCheck, ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
pub use region::{CountryCount, RegionEntry, RegionSummary};
pub use ruleset::{Rule, RuleProvider};
pub use service::{CandidateOverride, CandidateSource, GroupRef, ServiceGroup};
