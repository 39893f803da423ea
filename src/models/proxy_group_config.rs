use serde::{Deserialize, Serialize};

/// Type of proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyGroupType {
    Select,
    #[serde(rename = "url-test")]
    URLTest,
    Fallback,
    LoadBalance,
}

impl ProxyGroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
            ProxyGroupType::LoadBalance => "load-balance",
            ProxyGroupType::Fallback => "fallback",
        }
    }

    /// Region groups test latency unless load balancing was requested
    pub fn for_region(load_balance: bool) -> Self {
        if load_balance {
            ProxyGroupType::LoadBalance
        } else {
            ProxyGroupType::URLTest
        }
    }
}

/// Health-check parameters attached to latency-tested groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    /// URL for testing
    pub url: String,
    /// Interval in seconds between tests
    pub interval: Option<u32>,
    /// Tolerance value for tests
    pub tolerance: Option<u32>,
    /// Whether to use lazy loading
    pub lazy: Option<bool>,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            url: String::new(),
            interval: None,
            tolerance: None,
            lazy: None,
        }
    }
}

impl HealthCheck {
    /// A health check that only carries the test URL
    pub fn url_only(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn new(url: &str, interval: u32, tolerance: u32) -> Self {
        Self {
            url: url.to_string(),
            interval: Some(interval),
            tolerance: Some(tolerance),
            lazy: Some(false),
        }
    }
}

/// Configuration for a proxy group
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group, unique within one output
    pub name: String,
    /// Type of the proxy group
    pub group_type: ProxyGroupType,
    /// Ordered member references: group names or literal directives
    pub proxies: Vec<String>,
    /// Implicitly include every raw proxy node
    pub include_all: bool,
    /// Regex selecting nodes from the implicit set
    pub filter: Option<String>,
    /// Regex removing nodes from the implicit set
    pub exclude_filter: Option<String>,
    pub icon: Option<String>,
    pub health_check: Option<HealthCheck>,
}

impl Default for ProxyGroupConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            group_type: ProxyGroupType::Select,
            proxies: Vec::new(),
            include_all: false,
            filter: None,
            exclude_filter: None,
            icon: None,
            health_check: None,
        }
    }
}

impl ProxyGroupConfig {
    /// Create a new proxy group config
    pub fn new(name: impl Into<String>, group_type: ProxyGroupType) -> Self {
        Self {
            name: name.into(),
            group_type,
            ..Default::default()
        }
    }

    /// Shorthand for a `select` group over an explicit member list
    pub fn select(name: impl Into<String>, proxies: Vec<String>) -> Self {
        Self {
            proxies,
            ..Self::new(name, ProxyGroupType::Select)
        }
    }

    pub fn with_icon(mut self, icon: Option<&str>) -> Self {
        self.icon = icon.map(str::to_string);
        self
    }

    pub fn with_include_all(mut self) -> Self {
        self.include_all = true;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    pub fn with_exclude_filter(mut self, exclude: &str) -> Self {
        self.exclude_filter = Some(exclude.to_string());
        self
    }

    pub fn with_health_check(mut self, check: HealthCheck) -> Self {
        self.health_check = Some(check);
        self
    }

    /// Get string representation of the group type
    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }
}

/// A collection of proxy group configurations
pub type ProxyGroupConfigs = Vec<ProxyGroupConfig>;
