pub mod dns;
pub mod group;
pub mod lists;
pub mod ruleconvert;
pub mod service;

pub use dns::{build_dns_config, geox_url, runtime_settings, sniffer_config};
pub use group::{
    append_global_group, build_country_groups, build_proxy_groups, validate_group_references,
    ReferenceIssue,
};
pub use lists::{BaseLists, ListBuilder};
pub use ruleconvert::{build_rule_providers, build_rules};
pub use service::{order_regions, order_service_proxies};
