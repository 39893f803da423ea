use serde::{Deserialize, Serialize};

/// A remote rule-set provider entry (`rule-providers.<name>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    pub interval: u32,
    pub url: String,
    pub path: String,
}

impl RuleProvider {
    /// An http provider fetched from `<base>/<name>.yaml`
    pub fn http(base_url: &str, name: &str, interval: u32) -> Self {
        Self {
            provider_type: "http".to_string(),
            behavior: "classical".to_string(),
            interval,
            url: format!("{}/{}.yaml", base_url.trim_end_matches('/'), name),
            path: format!("./ruleset/{}.yaml", name),
        }
    }
}

/// One routing rule: `TYPE,VALUE,TARGET`, or `TYPE,TARGET` when there is no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub matcher_type: String,
    #[serde(default)]
    pub value: String,
    pub target: String,
}

impl Rule {
    pub fn new(matcher_type: &str, value: &str, target: &str) -> Self {
        Self {
            matcher_type: matcher_type.to_string(),
            value: value.to_string(),
            target: target.to_string(),
        }
    }

    pub fn rule_set(provider: &str, target: &str) -> Self {
        Self::new("RULE-SET", provider, target)
    }

    /// Catch-all rule
    pub fn final_match(target: &str) -> Self {
        Self::new("MATCH", "", target)
    }

    /// Render in the router's comma-separated form
    pub fn to_line(&self) -> String {
        if self.value.is_empty() {
            format!("{},{}", self.matcher_type, self.target)
        } else {
            format!("{},{},{}", self.matcher_type, self.value, self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_lines() {
        assert_eq!(
            Rule::rule_set("OpenAI", "OpenAI").to_line(),
            "RULE-SET,OpenAI,OpenAI"
        );
        assert_eq!(Rule::final_match("选择代理").to_line(), "MATCH,选择代理");
        assert_eq!(
            Rule::new("AND", "((DST-PORT,443),(NETWORK,UDP))", "REJECT").to_line(),
            "AND,((DST-PORT,443),(NETWORK,UDP)),REJECT"
        );
    }

    #[test]
    fn test_http_provider() {
        let p = RuleProvider::http("https://cdn.example.com/Filter/", "Claude", 3600);
        assert_eq!(p.url, "https://cdn.example.com/Filter/Claude.yaml");
        assert_eq!(p.path, "./ruleset/Claude.yaml");
        assert_eq!(p.provider_type, "http");
        assert_eq!(p.behavior, "classical");
    }
}
