use serde::{Deserialize, Serialize};

/// A member of a hand-written candidate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    /// The group of a region, written `{ region: 台湾 }`.
    ///
    /// Resolves to the region's group name; dropped while the region is inactive.
    Region { region: String },
    /// A group name or built-in policy, used verbatim
    Name(String),
}

impl GroupRef {
    pub fn name(name: &str) -> Self {
        GroupRef::Name(name.to_string())
    }

    pub fn region(id: &str) -> Self {
        GroupRef::Region {
            region: id.to_string(),
        }
    }
}

/// Where a service group takes its candidate list from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    /// The shared default list (Select first)
    Default,
    /// The shared direct-first list
    DirectFirst,
    /// Active regions reordered by this priority list of region ids
    Priority(Vec<String>),
    /// A literal member list
    Fixed(Vec<GroupRef>),
}

impl Default for CandidateSource {
    fn default() -> Self {
        CandidateSource::Default
    }
}

/// A named service group, e.g. `OpenAI` or `Netflix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Written as `direct-first`, `priority: [...]` or `fixed: [...]`
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub candidates: CandidateSource,
}

impl ServiceGroup {
    pub fn new(name: &str, icon: &str, candidates: CandidateSource) -> Self {
        Self {
            name: name.to_string(),
            icon: Some(icon.to_string()),
            candidates,
        }
    }
}

/// Replaces a service's candidate list when every listed region is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CandidateOverride {
    pub service: String,
    pub when_regions: Vec<String>,
    pub proxies: Vec<GroupRef>,
}

impl CandidateOverride {
    /// Whether all trigger regions are among `active`
    pub fn applies(&self, active: &[String]) -> bool {
        !self.when_regions.is_empty() && self.when_regions.iter().all(|r| active.contains(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_requires_every_region() {
        let rule = CandidateOverride {
            service: "Bilibili".to_string(),
            when_regions: vec!["台湾".to_string(), "香港".to_string()],
            proxies: vec![GroupRef::name("直连")],
        };
        let both = vec!["香港".to_string(), "日本".to_string(), "台湾".to_string()];
        let only_hk = vec!["香港".to_string()];
        assert!(rule.applies(&both));
        assert!(!rule.applies(&only_hk));
        assert!(!rule.applies(&[]));
    }

    #[test]
    fn test_candidate_source_from_yaml() {
        let yaml = r#"
- name: OpenAI
  candidates:
    priority: [韩国, 日本]
- name: Microsoft
  candidates: direct-first
- name: Telegram
- name: IDM
  candidates:
    fixed: [直连, { region: 日本 }, DIRECT]
"#;
        let groups: Vec<ServiceGroup> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            groups[0].candidates,
            CandidateSource::Priority(vec!["韩国".to_string(), "日本".to_string()])
        );
        assert_eq!(groups[1].candidates, CandidateSource::DirectFirst);
        assert_eq!(groups[2].candidates, CandidateSource::Default);
        assert_eq!(groups[2].icon, None);
        assert_eq!(
            groups[3].candidates,
            CandidateSource::Fixed(vec![
                GroupRef::name("直连"),
                GroupRef::region("日本"),
                GroupRef::name("DIRECT"),
            ])
        );
    }

    #[test]
    fn test_candidate_source_yaml_round_trip_uses_maps() {
        let group = ServiceGroup::new(
            "Reddit",
            "icon.png",
            CandidateSource::Priority(vec!["美国".to_string()]),
        );
        let out = serde_yaml::to_string(&group).unwrap();
        assert!(out.contains("candidates:\n  priority:\n  - 美国\n"), "{}", out);
        assert!(!out.contains('!'));
    }

    #[test]
    fn test_override_from_yaml() {
        let yaml = r#"
service: Bilibili
when-regions: [台湾, 香港]
proxies: [直连, { region: 台湾 }, { region: 香港 }]
"#;
        let rule: CandidateOverride = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.proxies[1], GroupRef::region("台湾"));
        assert_eq!(rule.proxies[0], GroupRef::name("直连"));
    }
}
