//! Shared candidate lists
//!
//! Each list concatenates optional segments in a fixed order. A disabled
//! segment is left out entirely, so lists never carry placeholders.

use crate::constants::services::POLICY_DIRECT;
use crate::settings::GroupNames;

/// Accumulates group references, skipping disabled segments
#[derive(Debug, Default)]
pub struct ListBuilder {
    items: Vec<String>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: &str) -> Self {
        self.items.push(name.to_string());
        self
    }

    pub fn push_if(self, enabled: bool, name: &str) -> Self {
        if enabled {
            self.push(name)
        } else {
            self
        }
    }

    pub fn extend(mut self, names: &[String]) -> Self {
        self.items.extend(names.iter().cloned());
        self
    }

    pub fn build(self) -> Vec<String> {
        self.items
    }
}

/// The four reusable candidate lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseLists {
    /// Select group members: `[Fallback, Landing?, regions, LowCost?, Manual, DIRECT]`
    pub default_selector: Vec<String>,
    /// Most service groups: `[Select, regions, LowCost?, Manual, Direct]`
    pub default_proxies: Vec<String>,
    /// Direct-first services: `[Direct, regions, LowCost?, Select, Manual]`
    pub default_proxies_direct: Vec<String>,
    /// Fallback group members: `[Landing?, regions, LowCost?, Manual, DIRECT]`
    pub default_fallback: Vec<String>,
}

impl BaseLists {
    /// Build every list from the active region group names
    pub fn build(names: &GroupNames, landing: bool, low_cost: bool, region_groups: &[String]) -> Self {
        let default_selector = ListBuilder::new()
            .push(&names.fallback)
            .push_if(landing, &names.landing)
            .extend(region_groups)
            .push_if(low_cost, &names.low_cost)
            .push(&names.manual)
            .push(POLICY_DIRECT)
            .build();

        let default_proxies = ListBuilder::new()
            .push(&names.select)
            .extend(region_groups)
            .push_if(low_cost, &names.low_cost)
            .push(&names.manual)
            .push(&names.direct)
            .build();

        let default_proxies_direct = ListBuilder::new()
            .push(&names.direct)
            .extend(region_groups)
            .push_if(low_cost, &names.low_cost)
            .push(&names.select)
            .push(&names.manual)
            .build();

        let default_fallback = ListBuilder::new()
            .push_if(landing, &names.landing)
            .extend(region_groups)
            .push_if(low_cost, &names.low_cost)
            .push(&names.manual)
            .push(POLICY_DIRECT)
            .build();

        Self {
            default_selector,
            default_proxies,
            default_proxies_direct,
            default_fallback,
        }
    }

    /// Front-proxy members: the selector list without Landing and Fallback.
    ///
    /// Keeping either would let Select -> Fallback -> Landing -> front proxy
    /// loop back on itself.
    pub fn front_proxy_selector(&self, names: &GroupNames) -> Vec<String> {
        self.default_selector
            .iter()
            .filter(|n| **n != names.landing && **n != names.fallback)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<String> {
        vec!["香港节点".to_string(), "美国节点".to_string()]
    }

    #[test]
    fn test_selector_list_plain() {
        let lists = BaseLists::build(&GroupNames::default(), false, true, &regions());
        assert_eq!(
            lists.default_selector,
            vec!["故障转移", "香港节点", "美国节点", "低倍率节点", "手动选择", "DIRECT"]
        );
    }

    #[test]
    fn test_lists_with_landing() {
        let lists = BaseLists::build(&GroupNames::default(), true, false, &regions());
        assert_eq!(
            lists.default_selector,
            vec!["故障转移", "落地节点", "香港节点", "美国节点", "手动选择", "DIRECT"]
        );
        assert_eq!(
            lists.default_fallback,
            vec!["落地节点", "香港节点", "美国节点", "手动选择", "DIRECT"]
        );
        assert_eq!(
            lists.default_proxies,
            vec!["选择代理", "香港节点", "美国节点", "手动选择", "直连"]
        );
        assert_eq!(
            lists.default_proxies_direct,
            vec!["直连", "香港节点", "美国节点", "选择代理", "手动选择"]
        );
    }

    #[test]
    fn test_no_regions_no_placeholders() {
        let lists = BaseLists::build(&GroupNames::default(), false, false, &[]);
        assert_eq!(lists.default_selector, vec!["故障转移", "手动选择", "DIRECT"]);
        assert_eq!(lists.default_fallback, vec!["手动选择", "DIRECT"]);
        for list in [
            &lists.default_selector,
            &lists.default_proxies,
            &lists.default_proxies_direct,
            &lists.default_fallback,
        ] {
            assert!(list.iter().all(|n| !n.is_empty()));
        }
    }

    #[test]
    fn test_front_proxy_cuts_cycle() {
        let names = GroupNames::default();
        let lists = BaseLists::build(&names, true, true, &regions());
        let front = lists.front_proxy_selector(&names);
        assert_eq!(
            front,
            vec!["香港节点", "美国节点", "低倍率节点", "手动选择", "DIRECT"]
        );
    }
}
