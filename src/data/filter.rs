use crate::config::AppConfig;

use super::model::{Catalog, EarthquakeRecord};

/// Threshold applied by the "large events only" switch.
pub const LARGE_EVENT_MAGNITUDE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Slider limits
// ---------------------------------------------------------------------------

/// The ranges the sidebar sliders may span, derived from the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterLimits {
    pub years: (i32, i32),
    pub magnitude: (f64, f64),
    /// Upper end of the depth slider; the lower end is always 0.
    pub depth_max: f64,
}

impl FilterLimits {
    /// `depth_cap` keeps a few very deep events from stretching the slider.
    pub fn from_catalog(catalog: &Catalog, depth_cap: f64) -> Self {
        let years = catalog.year_bounds().unwrap_or((2000, 2000));
        let magnitude = catalog.magnitude_bounds().unwrap_or((0.0, 10.0));
        let depth_max = catalog.max_depth().unwrap_or(depth_cap).min(depth_cap);
        FilterLimits {
            years,
            magnitude,
            depth_max,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewFilter
// ---------------------------------------------------------------------------

/// User-chosen constraints. All ranges are inclusive and combined with AND.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFilter {
    pub years: (i32, i32),
    pub magnitude: (f64, f64),
    pub depth: (f64, f64),
    /// Additionally require `magnitude >= LARGE_EVENT_MAGNITUDE`.
    pub large_only: bool,
}

impl ViewFilter {
    /// Starting selection: recent years, felt magnitudes, shallow-to-mid depths.
    pub fn initial(limits: &FilterLimits, config: &AppConfig) -> Self {
        let (year_lo, year_hi) = limits.years;
        let (mag_lo, mag_hi) = limits.magnitude;
        ViewFilter {
            years: (config.default_year_start.clamp(year_lo, year_hi), year_hi),
            magnitude: (config.default_magnitude_min.clamp(mag_lo, mag_hi), mag_hi),
            depth: (0.0, config.default_depth_max.min(limits.depth_max)),
            large_only: false,
        }
    }

    /// Whether a single event passes. Undated events never match a year range.
    pub fn matches(&self, record: &EarthquakeRecord) -> bool {
        let Some(year) = record.year else {
            return false;
        };
        let (y_lo, y_hi) = self.years;
        let (m_lo, m_hi) = self.magnitude;
        let (d_lo, d_hi) = self.depth;

        (y_lo..=y_hi).contains(&year)
            && (m_lo..=m_hi).contains(&record.magnitude)
            && (d_lo..=d_hi).contains(&record.depth)
            && (!self.large_only || record.magnitude >= LARGE_EVENT_MAGNITUDE)
    }
}

/// Return indices of catalog events that pass `filter`, in catalog order.
pub fn filtered_indices(catalog: &Catalog, filter: &ViewFilter) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}
