use serde::{Deserialize, Serialize};

/// One row of the region table.
///
/// `pattern` is matched case-insensitively against node names. A leading
/// `(?i)` is allowed and kept verbatim when the pattern is emitted as a group
/// filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl RegionEntry {
    pub fn new(id: &str, pattern: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

/// Number of nodes attributed to a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub region_id: String,
    pub count: usize,
}

/// Classifier output for one subscription
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSummary {
    /// Regions with at least one node, in first-seen order
    pub counts: Vec<CountryCount>,
    /// Whether any node looks like a reduced-rate node
    pub low_cost: bool,
}

impl RegionSummary {
    /// Region ids whose count reaches `threshold`, in classifier order
    pub fn active_regions(&self, threshold: i64) -> Vec<String> {
        self.counts
            .iter()
            .filter(|c| c.count as i64 >= threshold)
            .map(|c| c.region_id.clone())
            .collect()
    }

    pub fn count_of(&self, region_id: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.region_id == region_id)
            .map_or(0, |c| c.count)
    }
}
