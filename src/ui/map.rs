use std::collections::BTreeMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::color::{with_opacity, ColorScale, ValueRange};
use crate::data::model::EarthquakeRecord;
use crate::data::quality::{LATITUDE_BOUNDS, LONGITUDE_BOUNDS};
use crate::state::AppState;

/// Side of a density cell, in degrees.
pub const DENSITY_CELL_DEG: f64 = 0.25;

/// Pointer distance (px) within which an event is picked for the tooltip.
const HOVER_PICK_PX: f32 = 8.0;

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapKind {
    #[default]
    Density,
    Scatter,
}

impl MapKind {
    pub const ALL: [MapKind; 2] = [MapKind::Density, MapKind::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            MapKind::Density => "Density Map",
            MapKind::Scatter => "Scatter Map",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStyle {
    #[default]
    OpenStreetMap,
    CartoPositron,
    CartoDarkmatter,
}

/// Colours used to draw the map frame for one style.
#[derive(Debug, Clone, Copy)]
pub struct MapTheme {
    pub background: Color32,
    pub grid: Color32,
    pub text: Color32,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [
        MapStyle::OpenStreetMap,
        MapStyle::CartoPositron,
        MapStyle::CartoDarkmatter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "open-street-map",
            MapStyle::CartoPositron => "carto-positron",
            MapStyle::CartoDarkmatter => "carto-darkmatter",
        }
    }

    pub fn theme(self) -> MapTheme {
        match self {
            MapStyle::OpenStreetMap => MapTheme {
                background: Color32::from_rgb(242, 239, 233),
                grid: Color32::from_rgb(190, 200, 210),
                text: Color32::from_rgb(70, 70, 70),
            },
            MapStyle::CartoPositron => MapTheme {
                background: Color32::from_rgb(250, 250, 248),
                grid: Color32::from_rgb(222, 222, 222),
                text: Color32::from_rgb(120, 120, 120),
            },
            MapStyle::CartoDarkmatter => MapTheme {
                background: Color32::from_rgb(18, 18, 20),
                grid: Color32::from_rgb(58, 58, 62),
                text: Color32::from_rgb(170, 170, 170),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Equirectangular projection of the catalog bounding box onto `rect`.
pub fn project(lat: f64, lon: f64, rect: Rect) -> Pos2 {
    let (lon_lo, lon_hi) = (*LONGITUDE_BOUNDS.start(), *LONGITUDE_BOUNDS.end());
    let (lat_lo, lat_hi) = (*LATITUDE_BOUNDS.start(), *LATITUDE_BOUNDS.end());
    let x = ((lon - lon_lo) / (lon_hi - lon_lo)) as f32 * rect.width();
    let y = (1.0 - (lat - lat_lo) / (lat_hi - lat_lo)) as f32 * rect.height();
    Pos2::new(rect.left() + x, rect.top() + y)
}

/// Marker radius in px; area grows with `xM² · 2`.
pub fn marker_radius(magnitude: f64) -> f32 {
    ((2.0 * magnitude * magnitude).sqrt() * 0.7) as f32
}

/// One populated density cell: its south-west corner and summed magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityCell {
    pub lat: f64,
    pub lon: f64,
    pub weight: f64,
}

/// Bin events into `cell_deg` squares, weighting each event by its magnitude.
pub fn density_grid<'a>(
    records: impl IntoIterator<Item = &'a EarthquakeRecord>,
    cell_deg: f64,
) -> Vec<DensityCell> {
    let mut bins: BTreeMap<(i64, i64), f64> = BTreeMap::new();
    for r in records {
        let key = (
            (r.latitude / cell_deg).floor() as i64,
            (r.longitude / cell_deg).floor() as i64,
        );
        *bins.entry(key).or_default() += r.magnitude;
    }
    bins.into_iter()
        .map(|((lat, lon), weight)| DensityCell {
            lat: lat as f64 * cell_deg,
            lon: lon as f64 * cell_deg,
            weight,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Map view (central panel)
// ---------------------------------------------------------------------------

pub fn map_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Map Type:");
        egui::ComboBox::from_id_salt("map_kind")
            .selected_text(state.map_kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in MapKind::ALL {
                    ui.selectable_value(&mut state.map_kind, kind, kind.label());
                }
            });
        ui.add_space(16.0);
        ui.label("Map Style:");
        egui::ComboBox::from_id_salt("map_style")
            .selected_text(state.map_style.name())
            .show_ui(ui, |ui: &mut Ui| {
                for style in MapStyle::ALL {
                    ui.selectable_value(&mut state.map_style, style, style.name());
                }
            });
    });
    ui.add_space(4.0);

    let width = ui.available_width();
    let height = (width * 0.52).min(ui.available_height());
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let rect = response.rect;
    let theme = state.map_style.theme();

    painter.rect_filled(rect, 0.0, theme.background);
    draw_graticule(&painter, rect, theme);

    if state.visible_indices.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No events match the current filters",
            FontId::proportional(16.0),
            theme.text,
        );
        return;
    }

    match state.map_kind {
        MapKind::Density => draw_density(&painter, rect, state),
        MapKind::Scatter => draw_markers(&painter, rect, state),
    }

    if let Some(pointer) = response.hover_pos() {
        if let Some(record) = nearest_event(state, rect, pointer) {
            response.on_hover_ui_at_pointer(|ui: &mut Ui| event_tooltip(ui, record));
        }
    }
}

fn draw_graticule(painter: &egui::Painter, rect: Rect, theme: MapTheme) {
    let stroke = Stroke::new(1.0, theme.grid);
    let font = FontId::proportional(10.0);

    let mut lon = *LONGITUDE_BOUNDS.start();
    while lon <= *LONGITUDE_BOUNDS.end() {
        let top = project(*LATITUDE_BOUNDS.end(), lon, rect);
        let bottom = project(*LATITUDE_BOUNDS.start(), lon, rect);
        painter.line_segment([top, bottom], stroke);
        painter.text(bottom, Align2::CENTER_BOTTOM, format!("{lon:.0}°E"), font.clone(), theme.text);
        lon += 2.0;
    }

    let mut lat = *LATITUDE_BOUNDS.start();
    while lat <= *LATITUDE_BOUNDS.end() {
        let left = project(lat, *LONGITUDE_BOUNDS.start(), rect);
        let right = project(lat, *LONGITUDE_BOUNDS.end(), rect);
        painter.line_segment([left, right], stroke);
        painter.text(left, Align2::LEFT_BOTTOM, format!("{lat:.0}°N"), font.clone(), theme.text);
        lat += 1.0;
    }
}

fn draw_density(painter: &egui::Painter, rect: Rect, state: &AppState) {
    let cells = density_grid(state.visible_records(), DENSITY_CELL_DEG);
    let Some(range) = ValueRange::from_values(cells.iter().map(|c| c.weight)) else {
        return;
    };
    for cell in &cells {
        let sw = project(cell.lat, cell.lon, rect);
        let ne = project(cell.lat + DENSITY_CELL_DEG, cell.lon + DENSITY_CELL_DEG, rect);
        // Brighter than raw so single events stay visible against the dark end of the ramp.
        let t = range.normalize(cell.weight).sqrt();
        let color = with_opacity(ColorScale::Hot.sample(0.25 + 0.75 * t as f32), 0.8);
        painter.rect_filled(Rect::from_two_pos(sw, ne), 0.0, color);
    }
}

fn draw_markers(painter: &egui::Painter, rect: Rect, state: &AppState) {
    let Some(range) = ValueRange::from_values(state.visible_records().map(|r| r.magnitude)) else {
        return;
    };

    // Small events first so large ones stay on top.
    let mut records: Vec<&EarthquakeRecord> = state.visible_records().collect();
    records.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));

    for r in records {
        let color = with_opacity(ColorScale::Turbo.map(r.magnitude, range), 0.7);
        painter.circle_filled(project(r.latitude, r.longitude, rect), marker_radius(r.magnitude), color);
    }
}

fn nearest_event<'a>(state: &'a AppState, rect: Rect, pointer: Pos2) -> Option<&'a EarthquakeRecord> {
    state
        .visible_records()
        .map(|r| (r, project(r.latitude, r.longitude, rect).distance(pointer)))
        .filter(|(_, d)| *d <= HOVER_PICK_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(r, _)| r)
}

pub fn event_tooltip(ui: &mut Ui, record: &EarthquakeRecord) {
    ui.strong(&record.location);
    if let Some(date) = record.date {
        match record.time {
            Some(time) => ui.label(format!("{date} {}", time.format("%H:%M:%S"))),
            None => ui.label(date.to_string()),
        };
    }
    ui.label(format!("xM {:.1}   Depth {:.1} km", record.magnitude, record.depth));
    ui.label(format!("Region: {}", record.region));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn at(lat: f64, lon: f64, magnitude: f64) -> EarthquakeRecord {
        let mut r = record("Test", 2020, magnitude, 10.0);
        r.latitude = lat;
        r.longitude = lon;
        r
    }

    #[test]
    fn projection_maps_box_corners_to_rect_corners() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(200.0, 80.0));
        assert_eq!(project(43.0, 25.0, rect), rect.left_top());
        assert_eq!(project(35.0, 45.0, rect), rect.right_bottom());
        assert_eq!(project(39.0, 35.0, rect), rect.center());
    }

    #[test]
    fn density_sums_magnitude_per_cell() {
        let rows = vec![at(39.1, 35.1, 4.0), at(39.2, 35.2, 5.0), at(40.0, 35.1, 3.0)];
        let cells = density_grid(&rows, 0.25);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], DensityCell { lat: 39.0, lon: 35.0, weight: 9.0 });
        assert_eq!(cells[1].lat, 40.0);
        assert_eq!(cells[1].weight, 3.0);
    }

    #[test]
    fn density_of_empty_view_is_empty() {
        let rows: Vec<EarthquakeRecord> = Vec::new();
        assert!(density_grid(&rows, DENSITY_CELL_DEG).is_empty());
    }

    #[test]
    fn marker_grows_with_magnitude() {
        assert!(marker_radius(7.0) > marker_radius(4.0));
        assert!((marker_radius(5.0) - 4.9497476).abs() < 1e-4);
    }

    #[test]
    fn style_names_match_selector() {
        let names: Vec<&str> = MapStyle::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["open-street-map", "carto-positron", "carto-darkmatter"]);
    }
}
