/// Feature switches for one override run.
///
/// Built once from the host's raw arguments (see [`crate::parser::flags`]) and
/// never mutated afterwards. Every boolean defaults to `false` and the
/// threshold to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// `loadbalance`: region groups use `load-balance` instead of `url-test`
    pub load_balance: bool,
    /// `landing`: emit landing and front-proxy groups
    pub landing: bool,
    /// `ipv6`
    pub ipv6_enabled: bool,
    /// `full`: emit the runtime settings block
    pub full_config: bool,
    /// `keepalive`
    pub keep_alive_enabled: bool,
    /// `fakeip`: DNS in fake-ip mode instead of redir-host
    pub fake_ip_enabled: bool,
    /// `quic`: allow UDP/443
    pub quic_enabled: bool,
    /// `threshold`: minimum node count for a region group
    pub country_threshold: i64,
}
