use linked_hash_map::LinkedHashMap;
use serde::Serialize;

use crate::models::{ProxyGroupConfig, ProxyNode, RuleProvider};

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_ref().map_or(true, |s| s.is_empty())
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The complete override document handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashOverride {
    pub proxies: Vec<ProxyNode>,

    // Only present when the full runtime block was requested
    #[serde(flatten)]
    pub runtime: Option<ClashRuntime>,

    pub proxy_groups: Vec<ClashProxyGroup>,
    pub rule_providers: LinkedHashMap<String, RuleProvider>,
    pub rules: Vec<String>,
    pub sniffer: ClashSniffer,
    pub dns: ClashDns,
    pub geodata_mode: bool,
    pub geox_url: ClashGeoxUrl,
}

impl ClashOverride {
    /// Look up an emitted group by name
    pub fn group(&self, name: &str) -> Option<&ClashProxyGroup> {
        self.proxy_groups.iter().find(|g| g.name == name)
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.proxy_groups.iter().map(|g| g.name.as_str()).collect()
    }
}

/// One entry of `proxy-groups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub include_all: bool,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub exclude_filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub proxies: Vec<String>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

impl From<&ProxyGroupConfig> for ClashProxyGroup {
    fn from(group: &ProxyGroupConfig) -> Self {
        let check = group.health_check.as_ref();
        Self {
            name: group.name.clone(),
            group_type: group.type_str().to_string(),
            icon: group.icon.clone(),
            include_all: group.include_all,
            filter: group.filter.clone(),
            exclude_filter: group.exclude_filter.clone(),
            proxies: group.proxies.clone(),
            url: check.map(|c| c.url.clone()),
            interval: check.and_then(|c| c.interval),
            tolerance: check.and_then(|c| c.tolerance),
            lazy: check.and_then(|c| c.lazy),
        }
    }
}

/// DNS configuration for Clash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDns {
    pub enable: bool,
    pub ipv6: bool,
    pub prefer_h3: bool,
    pub enhanced_mode: String,
    pub default_nameserver: Vec<String>,
    pub nameserver: Vec<String>,
    pub fallback: Vec<String>,
    pub proxy_server_nameserver: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_ip_filter: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SniffPorts {
    pub ports: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SniffProtocols {
    #[serde(rename = "TLS")]
    pub tls: SniffPorts,
    #[serde(rename = "HTTP")]
    pub http: SniffPorts,
    #[serde(rename = "QUIC")]
    pub quic: SniffPorts,
}

/// Sniffer settings for Clash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashSniffer {
    pub sniff: SniffProtocols,
    pub override_destination: bool,
    pub enable: bool,
    pub force_dns_mapping: bool,
    pub skip_domain: Vec<String>,
}

/// Profile settings for Clash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProfile {
    pub store_selected: bool,
}

/// Router runtime settings, emitted for standalone kernels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashRuntime {
    pub mixed_port: u16,
    pub redir_port: u16,
    pub tproxy_port: u16,
    pub routing_mark: u32,
    pub allow_lan: bool,
    pub ipv6: bool,
    pub mode: String,
    pub unified_delay: bool,
    pub tcp_concurrent: bool,
    pub find_process_mode: String,
    pub log_level: String,
    pub geodata_loader: String,
    pub external_controller: String,
    pub disable_keep_alive: bool,
    pub profile: ClashProfile,
}

/// Download locations for geodata files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClashGeoxUrl {
    pub geoip: String,
    pub geosite: String,
    pub mmdb: String,
    pub asn: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthCheck, ProxyGroupType};

    #[test]
    fn test_group_skips_empty_fields() {
        let group = ProxyGroupConfig::new("手动选择", ProxyGroupType::Select).with_include_all();
        let out = serde_yaml::to_string(&ClashProxyGroup::from(&group)).unwrap();
        assert_eq!(out, "name: 手动选择\ntype: select\ninclude-all: true\n");
    }

    #[test]
    fn test_group_with_health_check() {
        let group = ProxyGroupConfig::new("香港节点", ProxyGroupType::URLTest)
            .with_include_all()
            .with_filter("(?i)港|HK")
            .with_health_check(HealthCheck::new("https://cp.cloudflare.com/generate_204", 60, 20));
        let clash = ClashProxyGroup::from(&group);
        assert_eq!(clash.group_type, "url-test");
        assert_eq!(clash.interval, Some(60));
        assert_eq!(clash.lazy, Some(false));

        let value: serde_json::Value = serde_json::to_value(&clash).unwrap();
        assert_eq!(value["filter"], "(?i)港|HK");
        assert_eq!(value["tolerance"], 20);
        assert!(value.get("proxies").is_none());
        assert!(value.get("exclude-filter").is_none());
    }
}
