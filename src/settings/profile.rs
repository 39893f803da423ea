use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::SettingsError;
use crate::constants::{network, regions, rules, services};
use crate::models::{
    CandidateOverride, CandidateSource, GroupRef, HealthCheck, RegionEntry, Rule, ServiceGroup,
};
use crate::utils::compile_pattern;

lazy_static! {
    static ref DEFAULT_PROFILE: CompiledProfile = Profile::default()
        .compile()
        .expect("built-in profile must compile");
}

/// Names of the infrastructure groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GroupNames {
    pub select: String,
    pub manual: String,
    pub fallback: String,
    pub direct: String,
    pub landing: String,
    pub low_cost: String,
    pub front_proxy: String,
    pub global: String,
}

impl Default for GroupNames {
    fn default() -> Self {
        Self {
            select: services::SELECT.to_string(),
            manual: services::MANUAL.to_string(),
            fallback: services::FALLBACK.to_string(),
            direct: services::DIRECT.to_string(),
            landing: services::LANDING.to_string(),
            low_cost: services::LOW_COST.to_string(),
            front_proxy: services::FRONT_PROXY.to_string(),
            global: services::GLOBAL.to_string(),
        }
    }
}

/// Icons of the infrastructure groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GroupIcons {
    pub select: Option<String>,
    pub manual: Option<String>,
    pub fallback: Option<String>,
    pub landing: Option<String>,
    pub low_cost: Option<String>,
    pub front_proxy: Option<String>,
    pub global: Option<String>,
}

impl Default for GroupIcons {
    fn default() -> Self {
        Self {
            select: Some(services::ICON_SELECT.to_string()),
            manual: Some(services::ICON_MANUAL.to_string()),
            fallback: Some(services::ICON_FALLBACK.to_string()),
            landing: Some(services::ICON_LANDING.to_string()),
            low_cost: Some(services::ICON_LOW_COST.to_string()),
            front_proxy: Some(services::ICON_FRONT_PROXY.to_string()),
            global: Some(services::ICON_GLOBAL.to_string()),
        }
    }
}

/// Every table an override run reads.
///
/// Deserializes from YAML or TOML with kebab-case keys; omitted keys keep the
/// built-in value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Profile {
    pub node_suffix: String,
    pub names: GroupNames,
    pub icons: GroupIcons,
    /// Region table in match order
    pub regions: Vec<RegionEntry>,
    pub isp_pattern: String,
    pub low_cost_pattern: String,
    pub base_exclude_filter: String,
    /// Service groups in output order
    pub services: Vec<ServiceGroup>,
    pub overrides: Vec<CandidateOverride>,
    pub region_check: HealthCheck,
    pub fallback_check: HealthCheck,
    pub low_cost_check: HealthCheck,
    pub rule_provider_base: String,
    pub rule_provider_interval: u32,
    pub rule_providers: Vec<String>,
    pub rules: Vec<Rule>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            node_suffix: regions::NODE_SUFFIX.to_string(),
            names: GroupNames::default(),
            icons: GroupIcons::default(),
            regions: regions::default_regions(),
            isp_pattern: regions::ISP_PATTERN.to_string(),
            low_cost_pattern: regions::LOW_COST_PATTERN.to_string(),
            base_exclude_filter: regions::BASE_EXCLUDE_FILTER.to_string(),
            services: services::default_services(),
            overrides: services::default_overrides(),
            region_check: HealthCheck::new(
                network::TEST_URL,
                network::REGION_CHECK_INTERVAL,
                network::CHECK_TOLERANCE,
            ),
            fallback_check: HealthCheck::new(
                network::TEST_URL,
                network::FALLBACK_CHECK_INTERVAL,
                network::CHECK_TOLERANCE,
            ),
            low_cost_check: HealthCheck::url_only(network::TEST_URL),
            rule_provider_base: rules::RULE_PROVIDER_BASE.to_string(),
            rule_provider_interval: rules::RULE_PROVIDER_INTERVAL,
            rule_providers: rules::RULE_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            rules: rules::default_rules(),
        }
    }
}

impl Profile {
    /// Load a profile from YAML or TOML content.
    ///
    /// Content that parses as a TOML document is read as TOML, anything else
    /// as YAML.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        if toml::from_str::<toml::Value>(content).is_ok() {
            debug!("Loading profile as TOML");
            return Ok(toml::from_str(content)?);
        }
        debug!("Loading profile as YAML");
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a profile from a file, picking the format from its extension
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Self::load_from_content(&content),
        }
    }

    /// Group name for a region id, e.g. `香港` -> `香港节点`
    pub fn region_group_name(&self, region_id: &str) -> String {
        format!("{}{}", region_id, self.node_suffix)
    }

    /// Validate the tables and compile every pattern
    pub fn compile(self) -> Result<CompiledProfile, SettingsError> {
        let mut compiled_regions = Vec::with_capacity(self.regions.len());
        for entry in &self.regions {
            let regex = compile_pattern(&entry.pattern).map_err(|source| {
                warn!("Region {} has an invalid pattern: {}", entry.id, entry.pattern);
                SettingsError::Pattern {
                    name: entry.id.clone(),
                    source,
                }
            })?;
            compiled_regions.push(CompiledRegion {
                entry: entry.clone(),
                regex,
            });
        }

        let isp = compile_pattern(&self.isp_pattern).map_err(|source| SettingsError::Pattern {
            name: "isp-pattern".to_string(),
            source,
        })?;
        let low_cost =
            compile_pattern(&self.low_cost_pattern).map_err(|source| SettingsError::Pattern {
                name: "low-cost-pattern".to_string(),
                source,
            })?;

        self.check_region_references()?;
        self.check_unique_names()?;
        self.check_members()?;

        Ok(CompiledProfile {
            profile: self,
            regions: compiled_regions,
            isp,
            low_cost,
        })
    }

    fn check_region_references(&self) -> Result<(), SettingsError> {
        let known: HashSet<&str> = self.regions.iter().map(|r| r.id.as_str()).collect();
        let priorities = self.services.iter().filter_map(|s| match &s.candidates {
            CandidateSource::Priority(list) => Some((s.name.as_str(), list)),
            _ => None,
        });
        let triggers = self
            .overrides
            .iter()
            .map(|o| (o.service.as_str(), &o.when_regions));

        for (owner, list) in priorities.chain(triggers) {
            if let Some(region) = list.iter().find(|r| !known.contains(r.as_str())) {
                return Err(SettingsError::UnknownRegion {
                    owner: owner.to_string(),
                    region: region.clone(),
                });
            }
        }
        Ok(())
    }

    fn infrastructure_names(&self) -> [&String; 7] {
        let n = &self.names;
        [
            &n.select,
            &n.manual,
            &n.fallback,
            &n.landing,
            &n.low_cost,
            &n.front_proxy,
            &n.global,
        ]
    }

    fn check_unique_names(&self) -> Result<(), SettingsError> {
        let mut seen: HashSet<String> = HashSet::new();
        let names = self
            .infrastructure_names()
            .into_iter()
            .cloned()
            .chain(self.services.iter().map(|s| s.name.clone()))
            .chain(self.regions.iter().map(|r| self.region_group_name(&r.id)));
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(SettingsError::DuplicateGroup(name));
            }
        }
        Ok(())
    }

    /// Every hand-written member must name a group or a built-in policy.
    ///
    /// The direct group is listed by the generated candidate lists, so it has
    /// to exist as a service.
    fn check_members(&self) -> Result<(), SettingsError> {
        if !self.services.iter().any(|s| s.name == self.names.direct) {
            return Err(SettingsError::MissingDirectGroup(self.names.direct.clone()));
        }

        let mut known: HashSet<String> = self
            .infrastructure_names()
            .into_iter()
            .cloned()
            .chain(self.services.iter().map(|s| s.name.clone()))
            .chain(self.regions.iter().map(|r| self.region_group_name(&r.id)))
            .collect();
        known.extend(services::BUILTIN_POLICIES.iter().map(|p| p.to_string()));
        let regions: HashSet<&str> = self.regions.iter().map(|r| r.id.as_str()).collect();

        let fixed = self.services.iter().filter_map(|s| match &s.candidates {
            CandidateSource::Fixed(members) => Some((s.name.as_str(), members)),
            _ => None,
        });
        let overrides = self.overrides.iter().map(|o| (o.service.as_str(), &o.proxies));

        for (owner, members) in fixed.chain(overrides) {
            for member in members {
                match member {
                    GroupRef::Name(name) if !known.contains(name) => {
                        return Err(SettingsError::UnknownMember {
                            owner: owner.to_string(),
                            member: name.clone(),
                        });
                    }
                    GroupRef::Region { region } if !regions.contains(region.as_str()) => {
                        return Err(SettingsError::UnknownRegion {
                            owner: owner.to_string(),
                            region: region.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// A region entry with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledRegion {
    pub entry: RegionEntry,
    pub regex: Regex,
}

/// A validated profile with every pattern compiled once
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    pub profile: Profile,
    pub regions: Vec<CompiledRegion>,
    pub isp: Regex,
    pub low_cost: Regex,
}

impl CompiledProfile {
    /// The shared built-in profile
    pub fn builtin() -> &'static CompiledProfile {
        &DEFAULT_PROFILE
    }

    pub fn region(&self, region_id: &str) -> Option<&RegionEntry> {
        self.regions
            .iter()
            .map(|r| &r.entry)
            .find(|e| e.id == region_id)
    }
}

impl std::ops::Deref for CompiledProfile {
    type Target = Profile;

    fn deref(&self) -> &Profile {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profile_compiles() {
        let profile = CompiledProfile::builtin();
        assert_eq!(profile.regions.len(), 17);
        assert_eq!(profile.services.len(), 33);
        assert_eq!(profile.rule_providers.len(), 42);
        assert_eq!(profile.region_group_name("香港"), "香港节点");
        assert!(profile.region("台湾").is_some());
        assert!(profile.region("火星").is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
node-suffix: " Nodes"
names:
  select: Proxy
  direct: Direct
regions:
  - id: HK
    pattern: "Hong Kong|HK"
  - id: JP
    pattern: "Japan|JP"
services:
  - name: Direct
    candidates:
      fixed: [DIRECT, Proxy]
overrides: []
"#;
        let profile = Profile::load_from_content(yaml).unwrap();
        assert_eq!(profile.node_suffix, " Nodes");
        assert_eq!(profile.names.select, "Proxy");
        assert_eq!(profile.names.manual, services::MANUAL);
        assert_eq!(profile.regions.len(), 2);
        assert_eq!(profile.regions[0].icon, None);
        assert_eq!(profile.rule_providers.len(), 42);
        assert_eq!(
            profile.services[0].candidates,
            CandidateSource::Fixed(vec![GroupRef::name("DIRECT"), GroupRef::name("Proxy")])
        );

        let compiled = profile.compile().unwrap();
        assert_eq!(compiled.region_group_name("JP"), "JP Nodes");
    }

    #[test]
    fn test_toml_profile() {
        let toml_content = r#"
base-exclude-filter = "x0.1"

[region-check]
url = "http://www.gstatic.com/generate_204"
interval = 300
tolerance = 50
"#;
        let profile = Profile::load_from_content(toml_content).unwrap();
        assert_eq!(profile.base_exclude_filter, "x0.1");
        assert_eq!(profile.region_check.interval, Some(300));
        assert_eq!(profile.region_check.lazy, None);
        assert_eq!(profile.fallback_check.interval, Some(180));
    }

    #[test]
    fn test_invalid_region_pattern() {
        let mut profile = Profile::default();
        profile.regions[0].pattern = "(unclosed".to_string();
        match profile.compile() {
            Err(SettingsError::Pattern { name, .. }) => assert_eq!(name, "香港"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unknown_priority_region() {
        let mut profile = Profile::default();
        profile.regions.retain(|r| r.id != "韩国");
        match profile.compile() {
            Err(SettingsError::UnknownRegion { owner, region }) => {
                assert_eq!(owner, "OpenAI");
                assert_eq!(region, "韩国");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_group_name() {
        let mut profile = Profile::default();
        profile.services.push(ServiceGroup {
            name: "香港节点".to_string(),
            icon: None,
            candidates: CandidateSource::Default,
        });
        assert!(matches!(
            profile.compile(),
            Err(SettingsError::DuplicateGroup(name)) if name == "香港节点"
        ));
    }

    #[test]
    fn test_missing_direct_group() {
        let mut profile = Profile::default();
        profile.names.direct = "Direct".to_string();
        assert!(matches!(
            profile.compile(),
            Err(SettingsError::MissingDirectGroup(name)) if name == "Direct"
        ));
    }

    #[test]
    fn test_unknown_fixed_member() {
        let mut profile = Profile::default();
        profile.services.push(ServiceGroup {
            name: "Steam".to_string(),
            icon: None,
            candidates: CandidateSource::Fixed(vec![GroupRef::name("直连"), GroupRef::name("美国 Nodes")]),
        });
        match profile.compile() {
            Err(SettingsError::UnknownMember { owner, member }) => {
                assert_eq!(owner, "Steam");
                assert_eq!(member, "美国 Nodes");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_override_region_reference_must_exist() {
        let mut profile = Profile::default();
        profile.overrides[0].proxies.push(GroupRef::region("火星"));
        assert!(matches!(
            profile.compile(),
            Err(SettingsError::UnknownRegion { region, .. }) if region == "火星"
        ));
    }

    #[test]
    fn test_member_names_follow_suffix() {
        let mut profile = Profile::default();
        profile.node_suffix = " Nodes".to_string();
        let compiled = profile.compile().unwrap();
        assert!(compiled.overrides[0].proxies.contains(&GroupRef::region("台湾")));

        let mut stale = Profile::default();
        stale.node_suffix = " Nodes".to_string();
        stale.overrides[0].proxies.push(GroupRef::name("香港节点"));
        assert!(matches!(
            stale.compile(),
            Err(SettingsError::UnknownMember { member, .. }) if member == "香港节点"
        ));
    }
}
