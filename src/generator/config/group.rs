//! Group generation utilities
//!
//! Assembles the ordered `proxy-groups` collection: infrastructure groups,
//! one group per service, the optional low-cost aggregate, one latency-tested group
//! per active region, and finally `GLOBAL`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use super::lists::BaseLists;
use super::service::order_service_proxies;
use crate::constants::services::BUILTIN_POLICIES;
use crate::models::{
    CandidateSource, FeatureFlags, GroupRef, ProxyGroupConfig, ProxyGroupConfigs,
    ProxyGroupType, ServiceGroup,
};
use crate::settings::Profile;
use crate::utils::join_patterns;

/// Build one url-test or load-balance group per active region.
///
/// Region ids missing from the profile's table are skipped.
pub fn build_country_groups(
    active_regions: &[String],
    flags: &FeatureFlags,
    profile: &Profile,
) -> ProxyGroupConfigs {
    let exclude = if flags.landing {
        join_patterns(&profile.isp_pattern, &profile.base_exclude_filter)
    } else {
        profile.base_exclude_filter.clone()
    };
    let group_type = ProxyGroupType::for_region(flags.load_balance);

    let mut groups = Vec::with_capacity(active_regions.len());
    for id in active_regions {
        let Some(entry) = profile.regions.iter().find(|r| &r.id == id) else {
            continue;
        };
        let mut group = ProxyGroupConfig::new(profile.region_group_name(id), group_type)
            .with_icon(entry.icon.as_deref())
            .with_include_all()
            .with_filter(&entry.pattern);
        if !exclude.is_empty() {
            group = group.with_exclude_filter(&exclude);
        }
        if !flags.load_balance {
            group = group.with_health_check(profile.region_check.clone());
        }
        groups.push(group);
    }
    groups
}

/// Resolve a hand-written member list.
///
/// Region references become region group names; those naming an inactive
/// region are dropped.
fn resolve_members(members: &[GroupRef], active_regions: &[String], profile: &Profile) -> Vec<String> {
    members
        .iter()
        .filter_map(|member| match member {
            GroupRef::Name(name) => Some(name.clone()),
            GroupRef::Region { region } => active_regions
                .contains(region)
                .then(|| profile.region_group_name(region)),
        })
        .collect()
}

fn service_candidates(
    service: &ServiceGroup,
    lists: &BaseLists,
    active_regions: &[String],
    low_cost: bool,
    profile: &Profile,
) -> Vec<String> {
    if let Some(rule) = profile
        .overrides
        .iter()
        .find(|o| o.service == service.name && o.applies(active_regions))
    {
        debug!("Candidate override applied to service {}", service.name);
        return resolve_members(&rule.proxies, active_regions, profile);
    }

    match &service.candidates {
        CandidateSource::Default => lists.default_proxies.clone(),
        CandidateSource::DirectFirst => lists.default_proxies_direct.clone(),
        CandidateSource::Priority(priority) => {
            order_service_proxies(priority, active_regions, low_cost, profile)
        }
        CandidateSource::Fixed(members) => resolve_members(members, active_regions, profile),
    }
}

/// Assemble every proxy group in output order, `GLOBAL` last.
///
/// `active_regions` are region ids that passed the threshold, in classifier
/// order.
pub fn build_proxy_groups(
    active_regions: &[String],
    low_cost: bool,
    flags: &FeatureFlags,
    profile: &Profile,
) -> ProxyGroupConfigs {
    let names = &profile.names;
    let icons = &profile.icons;

    let active: Vec<String> = active_regions
        .iter()
        .filter(|id| profile.regions.iter().any(|r| &r.id == *id))
        .cloned()
        .collect();
    let region_groups: Vec<String> = active.iter().map(|id| profile.region_group_name(id)).collect();
    let lists = BaseLists::build(names, flags.landing, low_cost, &region_groups);

    let mut groups: ProxyGroupConfigs = Vec::new();

    groups.push(
        ProxyGroupConfig::select(&names.select, lists.default_selector.clone())
            .with_icon(icons.select.as_deref()),
    );
    groups.push(
        ProxyGroupConfig::new(&names.manual, ProxyGroupType::Select)
            .with_icon(icons.manual.as_deref())
            .with_include_all(),
    );
    if flags.landing {
        groups.push(
            ProxyGroupConfig::select(&names.front_proxy, lists.front_proxy_selector(names))
                .with_icon(icons.front_proxy.as_deref())
                .with_include_all()
                .with_exclude_filter(&profile.isp_pattern),
        );
        groups.push(
            ProxyGroupConfig::new(&names.landing, ProxyGroupType::Select)
                .with_icon(icons.landing.as_deref())
                .with_include_all()
                .with_filter(&profile.isp_pattern),
        );
    }
    groups.push(ProxyGroupConfig {
        proxies: lists.default_fallback.clone(),
        ..ProxyGroupConfig::new(&names.fallback, ProxyGroupType::Fallback)
            .with_icon(icons.fallback.as_deref())
            .with_health_check(profile.fallback_check.clone())
    });

    for service in &profile.services {
        let proxies = service_candidates(service, &lists, &active, low_cost, profile);
        groups.push(ProxyGroupConfig::select(&service.name, proxies).with_icon(service.icon.as_deref()));
    }

    if low_cost {
        groups.push(
            ProxyGroupConfig::new(&names.low_cost, ProxyGroupType::URLTest)
                .with_icon(icons.low_cost.as_deref())
                .with_include_all()
                .with_filter(&profile.low_cost_pattern)
                .with_health_check(profile.low_cost_check.clone()),
        );
    }

    groups.extend(build_country_groups(&active, flags, profile));
    append_global_group(&mut groups, profile);
    groups
}

/// Append the catch-all group listing every group built so far
pub fn append_global_group(groups: &mut ProxyGroupConfigs, profile: &Profile) {
    let members: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
    groups.push(
        ProxyGroupConfig::select(&profile.names.global, members)
            .with_icon(profile.icons.global.as_deref())
            .with_include_all(),
    );
}

/// A member reference the router would reject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceIssue {
    /// Member names neither a group nor a built-in policy
    Dangling { group: String, member: String },
    /// Group lists itself as a member
    SelfReference { group: String },
    /// Groups reach each other in a loop, first name repeated at the end
    Cycle { path: Vec<String> },
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceIssue::Dangling { group, member } => {
                write!(f, "group '{}' references unknown '{}'", group, member)
            }
            ReferenceIssue::SelfReference { group } => {
                write!(f, "group '{}' references itself", group)
            }
            ReferenceIssue::Cycle { path } => write!(f, "group cycle: {}", path.join(" -> ")),
        }
    }
}

/// Check that every explicit member resolves and that no group loops.
///
/// Returns an empty list for a consistent collection.
pub fn validate_group_references(groups: &[ProxyGroupConfig]) -> Vec<ReferenceIssue> {
    let index: HashMap<&str, usize> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| (g.name.as_str(), i))
        .collect();

    let mut issues = Vec::new();
    for group in groups {
        for member in &group.proxies {
            if *member == group.name {
                issues.push(ReferenceIssue::SelfReference {
                    group: group.name.clone(),
                });
            } else if !index.contains_key(member.as_str())
                && !BUILTIN_POLICIES.contains(&member.as_str())
            {
                issues.push(ReferenceIssue::Dangling {
                    group: group.name.clone(),
                    member: member.clone(),
                });
            }
        }
    }

    let mut done: HashSet<usize> = HashSet::new();
    for start in 0..groups.len() {
        let mut stack: Vec<usize> = Vec::new();
        if let Some(path) = find_cycle(start, groups, &index, &mut stack, &mut done) {
            issues.push(ReferenceIssue::Cycle { path });
            // report each loop once
            done.extend(stack.drain(..));
        }
    }
    issues
}

fn find_cycle(
    node: usize,
    groups: &[ProxyGroupConfig],
    index: &HashMap<&str, usize>,
    stack: &mut Vec<usize>,
    done: &mut HashSet<usize>,
) -> Option<Vec<String>> {
    if done.contains(&node) {
        return None;
    }
    if let Some(pos) = stack.iter().position(|&n| n == node) {
        let mut path: Vec<String> = stack[pos..].iter().map(|&n| groups[n].name.clone()).collect();
        path.push(groups[node].name.clone());
        return Some(path);
    }

    stack.push(node);
    for member in &groups[node].proxies {
        // self references are reported separately
        if *member == groups[node].name {
            continue;
        }
        if let Some(&next) = index.get(member.as_str()) {
            if let Some(path) = find_cycle(next, groups, index, stack, done) {
                return Some(path);
            }
        }
    }
    stack.pop();
    done.insert(node);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn find<'a>(groups: &'a [ProxyGroupConfig], name: &str) -> &'a ProxyGroupConfig {
        groups
            .iter()
            .find(|g| g.name == name)
            .unwrap_or_else(|| panic!("missing group {}", name))
    }

    #[test]
    fn test_basic_scenario() {
        let profile = Profile::default();
        let flags = FeatureFlags::default();
        let groups = build_proxy_groups(&ids(&["香港", "美国"]), true, &flags, &profile);

        assert_eq!(
            find(&groups, "选择代理").proxies,
            ids(&["故障转移", "香港节点", "美国节点", "低倍率节点", "手动选择", "DIRECT"])
        );
        assert!(groups.iter().all(|g| g.name != "落地节点" && g.name != "前置代理"));

        let hk = find(&groups, "香港节点");
        assert_eq!(hk.group_type, ProxyGroupType::URLTest);
        assert_eq!(hk.exclude_filter.as_deref(), Some("低倍率|省流|大流量"));
        assert_eq!(hk.health_check.as_ref().and_then(|c| c.interval), Some(60));

        let low_cost = find(&groups, "低倍率节点");
        assert!(low_cost.include_all);
        assert_eq!(low_cost.health_check.as_ref().and_then(|c| c.interval), None);

        assert!(validate_group_references(&groups).is_empty());
    }

    #[test]
    fn test_group_order() {
        let profile = Profile::default();
        let groups = build_proxy_groups(&ids(&["日本"]), false, &FeatureFlags::default(), &profile);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();

        assert_eq!(&names[..4], &["选择代理", "手动选择", "故障转移", "OpenAI"]);
        assert_eq!(names[names.len() - 2], "日本节点");
        assert_eq!(names[names.len() - 1], "GLOBAL");
        assert_eq!(names.len(), 3 + profile.services.len() + 1 + 1);
    }

    #[test]
    fn test_landing_groups() {
        let profile = Profile::default();
        let flags = FeatureFlags {
            landing: true,
            ..Default::default()
        };
        let groups = build_proxy_groups(&ids(&["香港"]), false, &flags, &profile);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(&names[..5], &["选择代理", "手动选择", "前置代理", "落地节点", "故障转移"]);

        let front = find(&groups, "前置代理");
        assert_eq!(front.proxies, ids(&["香港节点", "手动选择", "DIRECT"]));
        assert_eq!(front.exclude_filter.as_deref(), Some(profile.isp_pattern.as_str()));

        let landing = find(&groups, "落地节点");
        assert_eq!(landing.filter.as_deref(), Some(profile.isp_pattern.as_str()));
        assert!(landing.proxies.is_empty());

        let hk = find(&groups, "香港节点");
        let expected = format!("{}|低倍率|省流|大流量", profile.isp_pattern);
        assert_eq!(hk.exclude_filter.as_deref(), Some(expected.as_str()));

        assert_eq!(find(&groups, "故障转移").proxies[0], "落地节点");
        assert!(validate_group_references(&groups).is_empty());
    }

    #[test]
    fn test_load_balance_omits_health_check() {
        let profile = Profile::default();
        let flags = FeatureFlags {
            load_balance: true,
            ..Default::default()
        };
        let groups = build_country_groups(&ids(&["美国", "火星"]), &flags, &profile);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_type, ProxyGroupType::LoadBalance);
        assert!(groups[0].health_check.is_none());
    }

    #[test]
    fn test_priority_service_lists() {
        let profile = Profile::default();
        let groups = build_proxy_groups(
            &ids(&["香港", "美国", "日本"]),
            false,
            &FeatureFlags::default(),
            &profile,
        );
        assert_eq!(
            find(&groups, "OpenAI").proxies,
            ids(&["日本节点", "美国节点", "香港节点", "选择代理", "手动选择"])
        );
        assert_eq!(
            find(&groups, "Telegram").proxies,
            ids(&["选择代理", "香港节点", "美国节点", "日本节点", "手动选择", "直连"])
        );
        assert_eq!(
            find(&groups, "Microsoft").proxies,
            ids(&["直连", "香港节点", "美国节点", "日本节点", "选择代理", "手动选择"])
        );
        assert_eq!(find(&groups, "广告拦截").proxies, ids(&["REJECT", "REJECT-DROP", "直连"]));
    }

    #[test]
    fn test_bilibili_override() {
        let profile = Profile::default();
        let flags = FeatureFlags::default();

        let both = build_proxy_groups(&ids(&["台湾", "香港"]), false, &flags, &profile);
        assert_eq!(find(&both, "Bilibili").proxies, ids(&["直连", "台湾节点", "香港节点"]));

        let only_hk = build_proxy_groups(&ids(&["香港"]), false, &flags, &profile);
        assert_eq!(
            find(&only_hk, "Bilibili").proxies,
            ids(&["直连", "香港节点", "选择代理", "手动选择"])
        );
    }

    #[test]
    fn test_fixed_region_members_follow_activity() {
        let mut profile = Profile::default();
        profile.node_suffix = " Nodes".to_string();
        profile.services.push(ServiceGroup {
            name: "Steam".to_string(),
            icon: None,
            candidates: CandidateSource::Fixed(vec![
                GroupRef::region("日本"),
                GroupRef::name("直连"),
                GroupRef::region("美国"),
            ]),
        });
        let flags = FeatureFlags::default();

        let groups = build_proxy_groups(&ids(&["美国"]), false, &flags, &profile);
        assert_eq!(find(&groups, "Steam").proxies, ids(&["直连", "美国 Nodes"]));

        let both = build_proxy_groups(&ids(&["台湾", "香港"]), false, &flags, &profile);
        assert_eq!(
            find(&both, "Bilibili").proxies,
            ids(&["直连", "台湾 Nodes", "香港 Nodes"])
        );
        assert!(validate_group_references(&both).is_empty());
    }

    #[test]
    fn test_global_lists_every_previous_group() {
        let profile = Profile::default();
        let groups = build_proxy_groups(&[], false, &FeatureFlags::default(), &profile);
        let global = groups.last().unwrap();
        assert_eq!(global.name, "GLOBAL");
        assert!(global.include_all);
        assert_eq!(global.proxies.len(), groups.len() - 1);
        for (member, group) in global.proxies.iter().zip(groups.iter()) {
            assert_eq!(member, &group.name);
        }
        assert!(!global.proxies.contains(&global.name));
    }

    #[test]
    fn test_validate_reports_problems() {
        let groups = vec![
            ProxyGroupConfig::select("A", ids(&["B", "DIRECT"])),
            ProxyGroupConfig::select("B", ids(&["C", "A"])),
            ProxyGroupConfig::select("C", ids(&["C", "missing", "REJECT"])),
        ];
        let issues = validate_group_references(&groups);
        assert!(issues.contains(&ReferenceIssue::SelfReference {
            group: "C".to_string()
        }));
        assert!(issues.contains(&ReferenceIssue::Dangling {
            group: "C".to_string(),
            member: "missing".to_string()
        }));
        assert!(issues.contains(&ReferenceIssue::Cycle {
            path: ids(&["A", "B", "A"])
        }));
        assert_eq!(
            ReferenceIssue::Cycle { path: ids(&["A", "B", "A"]) }.to_string(),
            "group cycle: A -> B -> A"
        );
    }
}
