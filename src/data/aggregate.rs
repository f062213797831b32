use std::collections::BTreeMap;

use super::model::EarthquakeRecord;

/// Regions with fewer events than this are noise and never shown.
pub const MIN_REGION_EVENTS: usize = 10;

/// At most this many regions are kept, largest first.
pub const TOP_REGIONS: usize = 25;

/// Descriptive statistics for one region of a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub region: String,
    pub count: usize,
    pub mean_magnitude: f64,
    pub max_magnitude: f64,
    pub mean_depth: f64,
}

/// Which statistic colours a treemap tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreemapMetric {
    #[default]
    Count,
    AverageMagnitude,
    MaximumMagnitude,
}

impl TreemapMetric {
    pub const ALL: [TreemapMetric; 3] = [
        TreemapMetric::Count,
        TreemapMetric::AverageMagnitude,
        TreemapMetric::MaximumMagnitude,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TreemapMetric::Count => "Earthquake Count",
            TreemapMetric::AverageMagnitude => "Average Magnitude",
            TreemapMetric::MaximumMagnitude => "Maximum Magnitude",
        }
    }

    pub fn value(self, stats: &RegionStats) -> f64 {
        match self {
            TreemapMetric::Count => stats.count as f64,
            TreemapMetric::AverageMagnitude => stats.mean_magnitude,
            TreemapMetric::MaximumMagnitude => stats.max_magnitude,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    magnitude_sum: f64,
    magnitude_max: f64,
    depth_sum: f64,
}

/// Group a view by region, drop small regions and keep the busiest ones.
///
/// Equal counts keep alphabetical region order, so the output is stable for a
/// given input.
pub fn region_stats<'a>(records: impl IntoIterator<Item = &'a EarthquakeRecord>) -> Vec<RegionStats> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for r in records {
        let acc = groups.entry(r.region.as_str()).or_default();
        if acc.count == 0 || r.magnitude > acc.magnitude_max {
            acc.magnitude_max = r.magnitude;
        }
        acc.count += 1;
        acc.magnitude_sum += r.magnitude;
        acc.depth_sum += r.depth;
    }

    let mut stats: Vec<RegionStats> = groups
        .into_iter()
        .filter(|(_, acc)| acc.count >= MIN_REGION_EVENTS)
        .map(|(region, acc)| {
            let n = acc.count as f64;
            RegionStats {
                region: region.to_string(),
                count: acc.count,
                mean_magnitude: acc.magnitude_sum / n,
                max_magnitude: acc.magnitude_max,
                mean_depth: acc.depth_sum / n,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(TOP_REGIONS);
    stats
}
