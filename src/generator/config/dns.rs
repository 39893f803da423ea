//! DNS, sniffer, geodata and runtime blocks
//!
//! Everything here is static apart from the handful of switches taken from
//! [`FeatureFlags`].

use crate::constants::network::*;
use crate::generator::yaml::clash::{
    ClashDns, ClashGeoxUrl, ClashProfile, ClashRuntime, ClashSniffer, SniffPorts, SniffProtocols,
};
use crate::models::FeatureFlags;

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// `fake-ip` with its filter list when requested, `redir-host` otherwise
pub fn build_dns_config(flags: &FeatureFlags) -> ClashDns {
    let (mode, fake_ip_filter) = if flags.fake_ip_enabled {
        ("fake-ip", Some(strings(FAKE_IP_FILTER)))
    } else {
        ("redir-host", None)
    };

    ClashDns {
        enable: true,
        ipv6: flags.ipv6_enabled,
        prefer_h3: true,
        enhanced_mode: mode.to_string(),
        default_nameserver: strings(DEFAULT_NAMESERVER),
        nameserver: strings(NAMESERVER),
        fallback: strings(FALLBACK_NAMESERVER),
        proxy_server_nameserver: strings(PROXY_SERVER_NAMESERVER),
        fake_ip_filter,
    }
}

pub fn sniffer_config() -> ClashSniffer {
    ClashSniffer {
        sniff: SniffProtocols {
            tls: SniffPorts {
                ports: SNIFF_TLS_PORTS.to_vec(),
            },
            http: SniffPorts {
                ports: SNIFF_HTTP_PORTS.to_vec(),
            },
            quic: SniffPorts {
                ports: SNIFF_QUIC_PORTS.to_vec(),
            },
        },
        override_destination: false,
        enable: true,
        force_dns_mapping: true,
        skip_domain: strings(SNIFF_SKIP_DOMAIN),
    }
}

pub fn geox_url() -> ClashGeoxUrl {
    ClashGeoxUrl {
        geoip: GEOX_GEOIP.to_string(),
        geosite: GEOX_GEOSITE.to_string(),
        mmdb: GEOX_MMDB.to_string(),
        asn: GEOX_ASN.to_string(),
    }
}

/// Router runtime block, emitted only when a full config was requested
pub fn runtime_settings(flags: &FeatureFlags) -> ClashRuntime {
    ClashRuntime {
        mixed_port: MIXED_PORT,
        redir_port: REDIR_PORT,
        tproxy_port: TPROXY_PORT,
        routing_mark: ROUTING_MARK,
        allow_lan: true,
        ipv6: flags.ipv6_enabled,
        mode: "rule".to_string(),
        unified_delay: true,
        tcp_concurrent: true,
        find_process_mode: "off".to_string(),
        log_level: "info".to_string(),
        geodata_loader: "standard".to_string(),
        external_controller: EXTERNAL_CONTROLLER.to_string(),
        disable_keep_alive: !flags.keep_alive_enabled,
        profile: ClashProfile {
            store_selected: true,
        },
    }
}
