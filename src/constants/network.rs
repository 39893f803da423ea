//! DNS, sniffer, geodata and runtime defaults.

pub const TEST_URL: &str = "https://cp.cloudflare.com/generate_204";

pub const REGION_CHECK_INTERVAL: u32 = 60;
pub const FALLBACK_CHECK_INTERVAL: u32 = 180;
pub const CHECK_TOLERANCE: u32 = 20;

pub const DEFAULT_NAMESERVER: &[&str] = &["119.29.29.29", "223.5.5.5"];

pub const NAMESERVER: &[&str] = &["system", "223.5.5.5", "119.29.29.29", "180.184.1.1"];

pub const FALLBACK_NAMESERVER: &[&str] = &[
    "quic://dns0.eu",
    "https://dns.cloudflare.com/dns-query",
    "https://dns.sb/dns-query",
    "tcp://208.67.222.222",
    "tcp://8.26.56.2",
];

pub const PROXY_SERVER_NAMESERVER: &[&str] = &["https://dns.alidns.com/dns-query", "tls://dot.pub"];

pub const FAKE_IP_FILTER: &[&str] = &[
    "geosite:private",
    "geosite:connectivity-check",
    "geosite:cn",
    "Mijia Cloud",
    "dig.io.mi.com",
    "localhost.ptlogin2.qq.com",
    "*.icloud.com",
    "*.stun.*.*",
    "*.stun.*.*.*",
];

pub const SNIFF_TLS_PORTS: &[u16] = &[443, 8443];
pub const SNIFF_HTTP_PORTS: &[u16] = &[80, 8080, 8880];
pub const SNIFF_QUIC_PORTS: &[u16] = &[443, 8443];
pub const SNIFF_SKIP_DOMAIN: &[&str] = &["Mijia Cloud", "dlg.io.mi.com", "+.push.apple.com"];

pub const GEOX_GEOIP: &str = "https://gcore.jsdelivr.net/gh/Loyalsoldier/v2ray-rules-dat@release/geoip.dat";
pub const GEOX_GEOSITE: &str =
    "https://gcore.jsdelivr.net/gh/Loyalsoldier/v2ray-rules-dat@release/geosite.dat";
pub const GEOX_MMDB: &str = "https://gcore.jsdelivr.net/gh/Loyalsoldier/geoip@release/Country.mmdb";
pub const GEOX_ASN: &str = "https://gcore.jsdelivr.net/gh/Loyalsoldier/geoip@release/GeoLite2-ASN.mmdb";

pub const MIXED_PORT: u16 = 7890;
pub const REDIR_PORT: u16 = 7892;
pub const TPROXY_PORT: u16 = 7893;
pub const ROUTING_MARK: u32 = 7894;
pub const EXTERNAL_CONTROLLER: &str = ":9999";
