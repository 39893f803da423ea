//! Built-in group names, service groups and per-service region priorities.

use crate::models::{CandidateOverride, CandidateSource, GroupRef, ServiceGroup};

pub const SELECT: &str = "选择代理";
pub const MANUAL: &str = "手动选择";
pub const FALLBACK: &str = "故障转移";
pub const DIRECT: &str = "直连";
pub const LANDING: &str = "落地节点";
pub const LOW_COST: &str = "低倍率节点";
pub const FRONT_PROXY: &str = "前置代理";
pub const GLOBAL: &str = "GLOBAL";
pub const AD_BLOCK: &str = "广告拦截";

/// Built-in router policies that need no group definition
pub const POLICY_DIRECT: &str = "DIRECT";
pub const POLICY_REJECT: &str = "REJECT";
pub const POLICY_REJECT_DROP: &str = "REJECT-DROP";
pub const POLICY_PASS: &str = "PASS";
pub const BUILTIN_POLICIES: &[&str] = &[POLICY_DIRECT, POLICY_REJECT, POLICY_REJECT_DROP, POLICY_PASS];

pub const ICON_SELECT: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Proxy.png";
pub const ICON_MANUAL: &str =
    "https://gcore.jsdelivr.net/gh/shindgewongxj/WHATSINStash@master/icon/select.png";
pub const ICON_FRONT_PROXY: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Area.png";
pub const ICON_LANDING: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Airport.png";
pub const ICON_FALLBACK: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Bypass.png";
pub const ICON_LOW_COST: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Lab.png";
pub const ICON_GLOBAL: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/Global.png";

const SERVICE_ICON_BASE: &str = "https://cdn.jsdelivr.net/gh/zuluion/Qure@master/IconSet/Color";

const AI_PRIORITY_TAIL: &[&str] = &["新加坡", "英国", "爱尔兰", "加拿大", "法国", "澳大利亚"];

fn priority(head: &[&str], tail: &[&str]) -> CandidateSource {
    let mut seen: Vec<String> = Vec::new();
    for region in head.iter().chain(tail.iter()) {
        if !seen.iter().any(|r| r == region) {
            seen.push(region.to_string());
        }
    }
    CandidateSource::Priority(seen)
}

fn fixed(members: &[&str]) -> CandidateSource {
    CandidateSource::Fixed(members.iter().map(|m| GroupRef::name(m)).collect())
}

fn service(name: &str, icon: &str, candidates: CandidateSource) -> ServiceGroup {
    ServiceGroup::new(name, &format!("{}/{}.png", SERVICE_ICON_BASE, icon), candidates)
}

/// Service groups in output order
pub fn default_services() -> Vec<ServiceGroup> {
    use CandidateSource::{Default, DirectFirst};

    vec![
        // AI
        service("OpenAI", "ChatGPT", priority(&["韩国", "日本", "美国"], AI_PRIORITY_TAIL)),
        service("Claude", "Claude", priority(&["英国", "美国", "韩国", "日本"], AI_PRIORITY_TAIL)),
        service("Gemini", "AI", priority(&["美国", "英国", "韩国", "日本"], AI_PRIORITY_TAIL)),
        service(
            "Perplexity",
            "Perplexity",
            priority(&["美国", "英国", "韩国", "日本"], AI_PRIORITY_TAIL),
        ),
        service("Copilot", "Copilot", Default),
        service(
            "Google",
            "Google_Search",
            priority(&["美国", "英国", "韩国", "日本"], AI_PRIORITY_TAIL),
        ),
        // social
        service("Telegram", "Telegram", Default),
        service("Discord", "Discord", Default),
        service("Facebook", "Facebook", Default),
        service("Reddit", "Reddit", priority(&["美国"], &[])),
        // streaming
        service("YouTube", "YouTube", Default),
        service("Netflix", "Netflix", Default),
        service("DisneyPlus", "Disney+_1", Default),
        service("Hulu", "Hulu", Default),
        service("HBO", "HBO_1", Default),
        service("TikTok", "TikTok_1", priority(&["美国", "日本", "韩国", "新加坡"], &[])),
        service("Bilibili", "bilibili_1", DirectFirst),
        service("Spotify", "Spotify", Default),
        // vendors, direct first
        service("Microsoft", "Microsoft", DirectFirst),
        service("OneDrive", "OneDrive", DirectFirst),
        service("OutLook", "Mail", Default),
        service("Apple", "Apple_1", DirectFirst),
        service("Amazon", "Amazon_1", DirectFirst),
        service("Speedtest", "Speedtest", DirectFirst),
        // games and downloads
        service("Steam", "Steam", Default),
        service("Ubisoft", "Ubisoft", Default),
        service("Netch", "Game", Default),
        service("PikPak", "Pikpak", Default),
        service("PayPal", "PayPal", Default),
        service("JavSP", "JavSP", priority(&["日本"], &[])),
        service("IDM", "Download", fixed(&[DIRECT, SELECT])),
        // system
        service(DIRECT, "Direct", fixed(&[POLICY_DIRECT, SELECT])),
        ServiceGroup::new(
            AD_BLOCK,
            "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color/AdBlack.png",
            fixed(&[POLICY_REJECT, POLICY_REJECT_DROP, DIRECT]),
        ),
    ]
}

/// Hand-picked candidate lists that win over the service's template
pub fn default_overrides() -> Vec<CandidateOverride> {
    vec![CandidateOverride {
        service: "Bilibili".to_string(),
        when_regions: vec!["台湾".to_string(), "香港".to_string()],
        proxies: vec![
            GroupRef::name(DIRECT),
            GroupRef::region("台湾"),
            GroupRef::region("香港"),
        ],
    }]
}
