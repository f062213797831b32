use std::collections::BTreeMap;

use eframe::egui::{self, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};

use crate::color::{with_opacity, ColorScale, ValueRange};
use crate::data::model::EarthquakeRecord;
use crate::state::AppState;

/// Number of discrete colour steps; each step becomes one plot series.
const COLOR_STEPS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterColor {
    #[default]
    Depth,
    Magnitude,
}

impl ScatterColor {
    pub const ALL: [ScatterColor; 2] = [ScatterColor::Depth, ScatterColor::Magnitude];

    pub fn label(self) -> &'static str {
        match self {
            ScatterColor::Depth => "Depth",
            ScatterColor::Magnitude => "Magnitude",
        }
    }

    pub fn value(self, record: &EarthquakeRecord) -> f64 {
        match self {
            ScatterColor::Depth => record.depth,
            ScatterColor::Magnitude => record.magnitude,
        }
    }

    pub fn scale(self) -> ColorScale {
        match self {
            ScatterColor::Depth => ColorScale::Viridis,
            ScatterColor::Magnitude => ColorScale::Turbo,
        }
    }
}

/// Key of one plot series: colour step and whole-magnitude size class.
type SeriesKey = (u8, i32);

/// Group events so each (colour, size) combination is drawn as one series.
pub fn bucket_points<'a>(
    records: impl IntoIterator<Item = &'a EarthquakeRecord>,
    color_by: ScatterColor,
    range: ValueRange,
) -> BTreeMap<SeriesKey, Vec<[f64; 2]>> {
    let mut buckets: BTreeMap<SeriesKey, Vec<[f64; 2]>> = BTreeMap::new();
    for r in records {
        let step = (range.normalize(color_by.value(r)) * (COLOR_STEPS - 1) as f64).round() as u8;
        let size = r.magnitude.floor() as i32;
        buckets
            .entry((step, size))
            .or_default()
            .push([r.longitude, r.latitude]);
    }
    buckets
}

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

pub fn scatter_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Color By:");
        egui::ComboBox::from_id_salt("scatter_color")
            .selected_text(state.scatter_color.label())
            .show_ui(ui, |ui: &mut Ui| {
                for c in ScatterColor::ALL {
                    ui.selectable_value(&mut state.scatter_color, c, c.label());
                }
            });
        ui.add_space(16.0);
        let slider = egui::Slider::new(&mut state.sample_percent, 10..=100)
            .step_by(10.0)
            .text("Data Sample %");
        if ui.add(slider).changed() {
            state.resample();
        }
    });

    let color_by = state.scatter_color;
    let records: Vec<&EarthquakeRecord> = state
        .scatter_indices
        .iter()
        .map(|&i| &state.catalog.records[i])
        .collect();

    let range = ValueRange::from_values(records.iter().map(|r| color_by.value(r)));
    match range {
        Some(range) => {
            ui.label(format!(
                "{} of {} events · {} {:.1} – {:.1}",
                records.len(),
                state.visible_indices.len(),
                color_by.label(),
                range.min,
                range.max
            ));
        }
        None => {
            ui.label("No events match the current filters");
        }
    }

    let buckets = range
        .map(|range| bucket_points(records.iter().copied(), color_by, range))
        .unwrap_or_default();
    let scale = color_by.scale();

    Plot::new("depth_scatter")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(25.0)
        .include_x(45.0)
        .include_y(35.0)
        .include_y(43.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|_name, value| format!("lon {:.2}\nlat {:.2}", value.x, value.y))
        .show(ui, |plot_ui| {
            for ((step, size), points) in buckets {
                let t = step as f32 / (COLOR_STEPS - 1) as f32;
                let series = Points::new(PlotPoints::from(points))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(1.0 + size.max(0) as f32 * 0.8)
                    .color(with_opacity(scale.sample(t), 0.6));
                plot_ui.points(series);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn buckets_split_by_colour_step_and_size() {
        let rows = vec![
            record("A", 2020, 4.2, 0.0),
            record("B", 2020, 4.8, 0.0),
            record("C", 2020, 6.1, 100.0),
        ];
        let range = ValueRange { min: 0.0, max: 100.0 };
        let buckets = bucket_points(&rows, ScatterColor::Depth, range);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&(0, 4)].len(), 2);
        assert_eq!(buckets[&(COLOR_STEPS - 1, 6)], vec![[35.0, 39.0]]);
    }

    #[test]
    fn colour_source_follows_selection() {
        let r = record("A", 2020, 5.5, 33.0);
        assert_eq!(ScatterColor::Depth.value(&r), 33.0);
        assert_eq!(ScatterColor::Magnitude.value(&r), 5.5);
        assert_eq!(ScatterColor::Magnitude.scale(), ColorScale::Turbo);
    }
}
