//! Built-in region table.
//!
//! Order matters: a node is attributed to the first region whose pattern
//! matches.

use crate::models::RegionEntry;

const ICON_BASE: &str = "https://gcore.jsdelivr.net/gh/Koolson/Qure@master/IconSet/Color";

/// Nodes from residential, business-line or satellite exits
pub const ISP_PATTERN: &str = "(?i)家宽|家庭|家庭宽带|商宽|商业宽带|星链|Starlink|落地";

/// Nodes billed at a reduced traffic rate
pub const LOW_COST_PATTERN: &str = r"(?i)0\.[0-5]|低倍率|省流|大流量|实验性";

/// Removed from every region group so reduced-rate nodes only live in their own group
pub const BASE_EXCLUDE_FILTER: &str = "低倍率|省流|大流量";

/// Appended to a region id to form its group name
pub const NODE_SUFFIX: &str = "节点";

const REGIONS: &[(&str, &str, &str)] = &[
    ("香港", "(?i)香港|港|HK|hk|Hong Kong|HongKong|hongkong|🇭🇰", "Hong_Kong"),
    ("澳门", "(?i)澳门|MO|Macau|🇲🇴", "Macao"),
    ("台湾", "(?i)台|新北|彰化|TW|Taiwan|🇹🇼", "Taiwan"),
    ("新加坡", "(?i)新加坡|坡|狮城|SG|Singapore|🇸🇬", "Singapore"),
    (
        "日本",
        "(?i)日本|川日|东京|大阪|泉日|埼玉|沪日|深日|JP|Japan|🇯🇵",
        "Japan",
    ),
    ("韩国", "(?i)KR|Korea|KOR|首尔|韩|韓|🇰🇷", "Korea"),
    ("美国", "(?i)美国|美|US|United States|🇺🇸", "United_States"),
    ("加拿大", "(?i)加拿大|Canada|CA|🇨🇦", "Canada"),
    (
        "英国",
        "(?i)英国|United Kingdom|UK|伦敦|London|🇬🇧",
        "United_Kingdom",
    ),
    ("澳大利亚", "(?i)澳洲|澳大利亚|AU|Australia|🇦🇺", "Australia"),
    ("德国", "(?i)德国|德|DE|Germany|🇩🇪", "Germany"),
    ("法国", "(?i)法国|法|FR|France|🇫🇷", "France"),
    ("俄罗斯", "(?i)俄罗斯|俄|RU|Russia|🇷🇺", "Russia"),
    ("泰国", "(?i)泰国|泰|TH|Thailand|🇹🇭", "Thailand"),
    ("印度", "(?i)印度|IN|India|🇮🇳", "India"),
    ("马来西亚", "(?i)马来西亚|马来|MY|Malaysia|🇲🇾", "Malaysia"),
    ("爱尔兰", "(?i)爱尔兰|Ireland|IE|ChatGPT|🇮🇪", "Ireland"),
];

/// The built-in region table in match order
pub fn default_regions() -> Vec<RegionEntry> {
    REGIONS
        .iter()
        .map(|(id, pattern, icon)| {
            RegionEntry::new(id, pattern, &format!("{}/{}.png", ICON_BASE, icon))
        })
        .collect()
}
