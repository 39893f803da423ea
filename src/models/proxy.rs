//! Proxy model definitions
//!
//! Contains the input side of an override run: the subscription document and
//! the proxy nodes it carries.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// A single proxy entry from a subscription.
///
/// Only `name` is inspected. Every other field is router-specific and is
/// carried through untouched, in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyNode {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ProxyNode {
    /// Create a node with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Mapping::new(),
        }
    }
}

/// A parsed subscription document.
///
/// Keys other than `proxies` are accepted but not retained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    #[serde(default)]
    pub proxies: Vec<ProxyNode>,
}

impl SubscriptionConfig {
    pub fn new(proxies: Vec<ProxyNode>) -> Self {
        Self { proxies }
    }

    /// Build a subscription from bare node names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(ProxyNode::new).collect())
    }

    /// Iterate over node names in subscription order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.proxies.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_keeps_unknown_fields() {
        let yaml = r#"
name: "HK-01"
type: ss
server: hk.example.com
port: 443
"#;
        let node: ProxyNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.name, "HK-01");
        assert_eq!(node.extra.len(), 3);
        assert_eq!(
            node.extra.get("server").and_then(|v| v.as_str()),
            Some("hk.example.com")
        );

        let out = serde_yaml::to_string(&node).unwrap();
        assert!(out.contains("server: hk.example.com"));
        assert!(out.starts_with("name: HK-01"));
    }

    #[test]
    fn test_missing_proxies_is_empty() {
        let config: SubscriptionConfig = serde_yaml::from_str("mode: rule\n").unwrap();
        assert!(config.proxies.is_empty());
    }

    #[test]
    fn test_node_without_name() {
        let node: ProxyNode = serde_json::from_str(r#"{"type":"vmess"}"#).unwrap();
        assert_eq!(node.name, "");
    }
}
