use log::{debug, info, warn};

use crate::generator::config::{
    build_dns_config, build_proxy_groups, build_rule_providers, build_rules, geox_url,
    runtime_settings, sniffer_config, validate_group_references,
};
use crate::generator::yaml::clash::{ClashOverride, ClashProxyGroup};
use crate::models::{FeatureFlags, SubscriptionConfig};
use crate::parser::classify_regions;
use crate::settings::CompiledProfile;

/// Convert a parsed subscription into a complete Clash override document
///
/// Only the input's `proxies` are carried over; every other key is
/// generated fresh. The run is pure: the same input, flags and profile always
/// yield the same document.
///
/// # Arguments
/// * `config` - Parsed subscription holding the raw proxy list
/// * `flags` - Resolved feature switches
/// * `profile` - Compiled region, service and rule tables
pub fn override_to_clash(
    config: &SubscriptionConfig,
    flags: &FeatureFlags,
    profile: &CompiledProfile,
) -> ClashOverride {
    debug!("Building override for {} proxies with {:?}", config.proxies.len(), flags);

    let summary = classify_regions(&config.proxies, profile);
    let active = summary.active_regions(flags.country_threshold);
    info!(
        "Active region groups: {} of {} matched, low-cost nodes: {}",
        active.len(),
        summary.counts.len(),
        summary.low_cost
    );

    let groups = build_proxy_groups(&active, summary.low_cost, flags, profile);
    for issue in validate_group_references(&groups) {
        warn!("Proxy group reference problem: {}", issue);
    }

    ClashOverride {
        proxies: config.proxies.clone(),
        runtime: flags.full_config.then(|| runtime_settings(flags)),
        proxy_groups: groups.iter().map(ClashProxyGroup::from).collect(),
        rule_providers: build_rule_providers(profile),
        rules: build_rules(&profile.rules, flags.quic_enabled),
        sniffer: sniffer_config(),
        dns: build_dns_config(flags),
        geodata_mode: true,
        geox_url: geox_url(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(names: &[&str], flags: FeatureFlags) -> ClashOverride {
        let config = SubscriptionConfig::from_names(names.iter().copied());
        override_to_clash(&config, &flags, CompiledProfile::builtin())
    }

    #[test]
    fn test_scenario_selector() {
        let out = run(&["HK-01", "US-01 大流量"], FeatureFlags::default());
        let select = out.group("选择代理").unwrap();
        assert_eq!(
            select.proxies,
            vec!["故障转移", "香港节点", "美国节点", "低倍率节点", "手动选择", "DIRECT"]
        );
        assert!(out.runtime.is_none());
        assert_eq!(out.proxies.len(), 2);
    }

    #[test]
    fn test_threshold_drops_sparse_regions() {
        let flags = FeatureFlags {
            country_threshold: 2,
            ..Default::default()
        };
        let out = run(&["HK-01", "HK-02", "JP-01"], flags);
        assert!(out.group("香港节点").is_some());
        assert!(out.group("日本节点").is_none());
    }

    #[test]
    fn test_full_config_adds_runtime() {
        let flags = FeatureFlags {
            full_config: true,
            ipv6_enabled: true,
            ..Default::default()
        };
        let out = run(&["SG-01"], flags);
        let runtime = out.runtime.as_ref().unwrap();
        assert!(runtime.ipv6);
        assert_eq!(runtime.external_controller, ":9999");
    }
}
