//! Per-service region ordering

use crate::settings::Profile;

use super::lists::ListBuilder;

/// Reorder active regions by a service's priority list.
///
/// Priority regions that are active come first, in priority order; the
/// remaining active regions follow in their original order. Inactive
/// priority entries are skipped and nothing appears twice.
pub fn order_regions(priority: &[String], active: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::with_capacity(active.len());
    let preferred = priority.iter().filter(|r| active.contains(r));
    for region in preferred.chain(active.iter()) {
        if !ordered.contains(region) {
            ordered.push(region.clone());
        }
    }
    ordered
}

/// Candidate list for a priority-ordered service group:
/// ordered region groups, then `Select`, `LowCost?`, `Manual`
pub fn order_service_proxies(
    priority: &[String],
    active: &[String],
    low_cost: bool,
    profile: &Profile,
) -> Vec<String> {
    let region_groups: Vec<String> = order_regions(priority, active)
        .iter()
        .map(|id| profile.region_group_name(id))
        .collect();

    ListBuilder::new()
        .extend(&region_groups)
        .push(&profile.names.select)
        .push_if(low_cost, &profile.names.low_cost)
        .push(&profile.names.manual)
        .build()
}
