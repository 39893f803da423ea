use linked_hash_map::LinkedHashMap;

use crate::constants::rules::QUIC_REJECT_RULE;
use crate::models::{Rule, RuleProvider};
use crate::settings::Profile;

/// Render the rule list, blocking QUIC first unless it is allowed
pub fn build_rules(rules: &[Rule], quic_enabled: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(rules.len() + 1);
    if !quic_enabled {
        lines.push(QUIC_REJECT_RULE.to_string());
    }
    lines.extend(rules.iter().map(Rule::to_line));
    lines
}

/// One http provider per configured name, in table order
pub fn build_rule_providers(profile: &Profile) -> LinkedHashMap<String, RuleProvider> {
    profile
        .rule_providers
        .iter()
        .map(|name| {
            (
                name.clone(),
                RuleProvider::http(&profile.rule_provider_base, name, profile.rule_provider_interval),
            )
        })
        .collect()
}
