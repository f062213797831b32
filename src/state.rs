use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::aggregate::{region_stats, RegionStats, TreemapMetric};
use crate::data::cache::CatalogCache;
use crate::data::filter::{filtered_indices, FilterLimits, ViewFilter};
use crate::data::model::{Catalog, EarthquakeRecord};
use crate::sample::{sample_indices, snap_percent};
use crate::ui::map::{MapKind, MapStyle};
use crate::ui::scatter::ScatterColor;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which chart fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Treemap,
    Scatter,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Map, Tab::Treemap, Tab::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Map => "Earthquake Map",
            Tab::Treemap => "Regional Treemap",
            Tab::Scatter => "Depth Scatter",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Shared load-and-clean cache.
    pub cache: Arc<CatalogCache>,

    /// Current cleaned catalog (shared, never mutated).
    pub catalog: Arc<Catalog>,

    /// Slider ranges for the current catalog.
    pub limits: FilterLimits,

    /// Sidebar selections.
    pub filter: ViewFilter,

    /// Indices of events passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Treemap groups for the visible events.
    pub region_stats: Vec<RegionStats>,

    /// Sampled subset of `visible_indices` for the scatter view.
    pub scatter_indices: Vec<usize>,

    pub tab: Tab,
    pub map_kind: MapKind,
    pub map_style: MapStyle,
    pub treemap_metric: TreemapMetric,
    pub scatter_color: ScatterColor,
    pub sample_percent: u8,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, cache: Arc<CatalogCache>, catalog: Arc<Catalog>) -> Self {
        let limits = FilterLimits::from_catalog(&catalog, config.depth_slider_cap);
        let filter = ViewFilter::initial(&limits, &config);
        let mut state = Self {
            sample_percent: snap_percent(config.sample_percent),
            config,
            cache,
            catalog,
            limits,
            filter,
            visible_indices: Vec::new(),
            region_stats: Vec::new(),
            scatter_indices: Vec::new(),
            tab: Tab::default(),
            map_kind: MapKind::default(),
            map_style: MapStyle::default(),
            treemap_metric: TreemapMetric::default(),
            scatter_color: ScatterColor::default(),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Swap in a newly loaded catalog and reset the filters to its ranges.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.limits = FilterLimits::from_catalog(&catalog, self.config.depth_slider_cap);
        self.filter = ViewFilter::initial(&self.limits, &self.config);
        self.catalog = catalog;
        self.status_message = None;
        self.refilter();
    }

    /// Visible events, in catalog order.
    pub fn visible_records(&self) -> impl Iterator<Item = &EarthquakeRecord> + '_ {
        self.visible_indices.iter().map(|&i| &self.catalog.records[i])
    }

    /// Recompute the filtered view and everything derived from it.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.catalog, &self.filter);
        self.region_stats = region_stats(self.visible_records());
        self.resample();
    }

    /// Redraw the scatter sample after the percentage changed.
    pub fn resample(&mut self) {
        self.sample_percent = snap_percent(self.sample_percent);
        self.scatter_indices = sample_indices(
            &self.visible_indices,
            self.sample_percent,
            self.config.sample_seed,
        );
    }

    /// Load a different catalog file; on failure the current one stays.
    pub fn open_file(&mut self, path: &Path) {
        match self.cache.replace_source(path) {
            Ok(catalog) => self.set_catalog(catalog),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop the cached catalog and load it again from its source.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        match self.cache.get() {
            Ok(catalog) => self.set_catalog(catalog),
            Err(e) => {
                log::error!("Failed to reload catalog: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
