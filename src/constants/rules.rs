//! Built-in rule providers and routing rules.

use super::services::{AD_BLOCK, DIRECT, POLICY_DIRECT, SELECT};
use crate::models::Rule;

pub const RULE_PROVIDER_BASE: &str =
    "https://cdn.jsdelivr.net/gh/zuluion/Clash-Template-Config@master/Filter";

pub const RULE_PROVIDER_INTERVAL: u32 = 3600;

/// Logical rule dropping QUIC (UDP/443); prepended unless QUIC is allowed
pub const QUIC_REJECT_RULE: &str = "AND,((DST-PORT,443),(NETWORK,UDP)),REJECT";

/// Provider names in output order
pub const RULE_PROVIDERS: &[&str] = &[
    // ad blocking
    "AdBlock",
    "AWAvenue-Ads-Rule",
    // AI
    "OpenAI",
    "Claude",
    "Gemini",
    "Perplexity",
    "Copilot",
    // streaming
    "Netflix",
    "YouTube",
    "TikTok",
    "Bilibili",
    "Spotify",
    "DisneyPlus",
    "Hulu",
    "HBO",
    // social
    "Telegram",
    "Discord",
    "Facebook",
    "Twitter",
    "Reddit",
    // vendors
    "Apple",
    "Adobe",
    "Amazon",
    "Microsoft",
    "OneDrive",
    "OutLook",
    "Google",
    "GitHub",
    // games and downloads
    "Steam",
    "Ubisoft",
    "Netch",
    "PikPak",
    "JavSP",
    // misc
    "Speedtest",
    "PayPal",
    "Tencent",
    "China",
    "Proxy",
    "ProxyClient",
    "Direct",
    "DownLoadClient",
    "IDM",
];

/// `(provider, target group)` pairs, matched top to bottom
const RULE_SET_TARGETS: &[(&str, &str)] = &[
    ("DownLoadClient", DIRECT),
    ("ProxyClient", DIRECT),
    ("AdBlock", AD_BLOCK),
    ("AWAvenue-Ads-Rule", AD_BLOCK),
    ("OpenAI", "OpenAI"),
    ("Claude", "Claude"),
    ("Gemini", "Gemini"),
    ("Perplexity", "Perplexity"),
    ("Copilot", "Copilot"),
    ("Apple", "Apple"),
    ("Adobe", SELECT),
    ("Amazon", "Amazon"),
    ("GitHub", SELECT),
    ("Google", "Google"),
    ("OneDrive", "OneDrive"),
    ("OutLook", "OutLook"),
    ("Microsoft", "Microsoft"),
    ("Netflix", "Netflix"),
    ("DisneyPlus", "DisneyPlus"),
    ("Hulu", "Hulu"),
    ("HBO", "HBO"),
    ("TikTok", "TikTok"),
    ("Speedtest", "Speedtest"),
    ("Steam", "Steam"),
    ("Ubisoft", "Ubisoft"),
    ("Netch", "Netch"),
    ("Spotify", "Spotify"),
    ("PikPak", "PikPak"),
    ("Telegram", "Telegram"),
    ("Twitter", SELECT),
    ("Tencent", DIRECT),
    ("YouTube", "YouTube"),
    ("PayPal", "PayPal"),
    ("Discord", "Discord"),
    ("Facebook", "Facebook"),
    ("Reddit", "Reddit"),
    ("JavSP", "JavSP"),
    ("IDM", "IDM"),
    ("Bilibili", "Bilibili"),
    ("Proxy", SELECT),
    ("Direct", POLICY_DIRECT),
];

/// The static rule list, ending with `MATCH`
pub fn default_rules() -> Vec<Rule> {
    let mut rules: Vec<Rule> = RULE_SET_TARGETS
        .iter()
        .map(|(provider, target)| Rule::rule_set(provider, target))
        .collect();
    rules.push(Rule::new("GEOIP", "CN", POLICY_DIRECT));
    rules.push(Rule::final_match(SELECT));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_set_has_a_provider() {
        for (provider, _) in RULE_SET_TARGETS {
            assert!(RULE_PROVIDERS.contains(provider), "{}", provider);
        }
    }

    #[test]
    fn test_default_rules_shape() {
        let rules = default_rules();
        assert_eq!(rules.len(), 43);
        assert_eq!(rules[0].to_line(), "RULE-SET,DownLoadClient,直连");
        assert_eq!(rules.last().unwrap().to_line(), "MATCH,选择代理");
    }
}
