//! Region classification
//!
//! Attributes each proxy node to at most one region by scanning the region
//! table in declaration order and stopping at the first match. Landing/ISP
//! nodes are never counted.

use log::debug;
use regex::Regex;

use crate::models::{CountryCount, ProxyNode, RegionSummary};
use crate::settings::{CompiledProfile, CompiledRegion};

/// First region whose pattern matches `name`, in table order
pub fn match_region<'a>(name: &str, regions: &'a [CompiledRegion]) -> Option<&'a CompiledRegion> {
    regions.iter().find(|r| r.regex.is_match(name))
}

/// Whether any node name matches the low-cost pattern.
///
/// Checked over every node, including landing/ISP nodes.
pub fn has_low_cost(nodes: &[ProxyNode], low_cost: &Regex) -> bool {
    nodes.iter().any(|node| low_cost.is_match(&node.name))
}

/// Count nodes per region.
///
/// Counts are kept in the order each region was first seen.
pub fn count_regions(nodes: &[ProxyNode], profile: &CompiledProfile) -> Vec<CountryCount> {
    let mut counts: Vec<CountryCount> = Vec::new();

    for node in nodes {
        if profile.isp.is_match(&node.name) {
            continue;
        }

        let Some(region) = match_region(&node.name, &profile.regions) else {
            continue;
        };
        match counts.iter_mut().find(|c| c.region_id == region.entry.id) {
            Some(existing) => existing.count += 1,
            None => counts.push(CountryCount {
                region_id: region.entry.id.clone(),
                count: 1,
            }),
        }
    }

    counts
}

/// Run the classifier over a subscription's nodes
pub fn classify_regions(nodes: &[ProxyNode], profile: &CompiledProfile) -> RegionSummary {
    let counts = count_regions(nodes, profile);
    let low_cost = has_low_cost(nodes, &profile.low_cost);
    for c in &counts {
        debug!("Region {}: {} node(s)", c.region_id, c.count);
    }
    RegionSummary { counts, low_cost }
}
