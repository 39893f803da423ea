//! Flag resolution
//!
//! Hosts pass script arguments as loosely typed values: real booleans and
//! numbers, or strings such as `"true"`, `"1"` and `"5"`. Resolution never
//! fails; anything unrecognised falls back to the documented default.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::models::FeatureFlags;

/// Raw, string-keyed host arguments
pub type RawArgs = HashMap<String, Value>;

/// `true` for boolean `true`, or a string equal to `"true"` (any case) or `"1"`
pub fn parse_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => false,
    }
}

/// Parse a base-10 integer, returning `default` for absent or malformed input.
///
/// Strings are read up to the first non-digit after optional leading
/// whitespace and sign, so `"12abc"` yields `12` and `"abc"` the default.
/// Fractional numbers are truncated.
pub fn parse_number(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => parse_int_prefix(s).unwrap_or_else(|| {
            debug!("Malformed number {:?}, using default {}", s, default);
            default
        }),
        _ => default,
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    // Only overflow can fail here; saturate like a float parse would.
    Some(match rest[..end].parse::<i64>() {
        Ok(magnitude) if negative => -magnitude,
        Ok(magnitude) => magnitude,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

/// Split a `key=value&key2=value2` string into raw arguments.
///
/// A leading `?` or `#` is ignored and values are percent-decoded. A key
/// without `=` maps to an empty string.
pub fn parse_query_string(query: &str) -> RawArgs {
    let query = query.trim_start_matches(|c: char| c == '?' || c == '#');
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let mut parts = pair.splitn(2, '=');
        if let Some(key) = parts.next() {
            let raw = parts.next().unwrap_or("");
            let value = urlencoding::decode(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            params.insert(key.to_string(), Value::String(value));
        }
    }
    params
}

impl FeatureFlags {
    /// Resolve flags from host arguments
    pub fn from_args(args: &RawArgs) -> Self {
        let flag = |key: &str| args.get(key).map_or(false, parse_bool);
        let flags = Self {
            load_balance: flag("loadbalance"),
            landing: flag("landing"),
            ipv6_enabled: flag("ipv6"),
            full_config: flag("full"),
            keep_alive_enabled: flag("keepalive"),
            fake_ip_enabled: flag("fakeip"),
            quic_enabled: flag("quic"),
            country_threshold: parse_number(args.get("threshold"), 0),
        };
        debug!("Resolved feature flags: {:?}", flags);
        flags
    }

    /// Resolve flags from a `key=value&...` argument string
    pub fn from_query(query: &str) -> Self {
        Self::from_args(&parse_query_string(query))
    }
}
