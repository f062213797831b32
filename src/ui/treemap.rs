use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::color::{ColorScale, ValueRange};
use crate::data::aggregate::{RegionStats, TreemapMetric};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Squarified layout
// ---------------------------------------------------------------------------

/// Lay out `values` as tiles filling `bounds`, areas proportional to value.
///
/// Squarified treemap (Bruls, Huizing, van Wijk). Input should be sorted
/// largest first for the best aspect ratios; the output is index-aligned
/// with `values`.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = values.iter().sum();
    let empty = Rect::from_min_size(bounds.min, Vec2::ZERO);
    if values.is_empty() || total <= 0.0 || bounds.area() <= 0.0 {
        return vec![empty; values.len()];
    }

    let scale = bounds.area() as f64 / total;
    let areas: Vec<f64> = values.iter().map(|v| v.max(0.0) * scale).collect();
    let mut out = vec![empty; values.len()];

    let (mut x, mut y) = (bounds.min.x as f64, bounds.min.y as f64);
    let (mut w, mut h) = (bounds.width() as f64, bounds.height() as f64);
    let mut start = 0;

    while start < areas.len() {
        let side = w.min(h);
        let mut end = start + 1;
        let mut best = worst_ratio(&areas[start..end], side);
        while end < areas.len() {
            let next = worst_ratio(&areas[start..=end], side);
            if next > best {
                break;
            }
            best = next;
            end += 1;
        }

        let row_sum: f64 = areas[start..end].iter().sum();
        if w >= h {
            // Column along the left edge.
            let col_w = if h > 0.0 { row_sum / h } else { 0.0 };
            let mut cy = y;
            for i in start..end {
                let th = if col_w > 0.0 { areas[i] / col_w } else { 0.0 };
                out[i] = tile(x, cy, col_w, th);
                cy += th;
            }
            x += col_w;
            w = (w - col_w).max(0.0);
        } else {
            // Row along the top edge.
            let row_h = if w > 0.0 { row_sum / w } else { 0.0 };
            let mut cx = x;
            for i in start..end {
                let tw = if row_h > 0.0 { areas[i] / row_h } else { 0.0 };
                out[i] = tile(cx, y, tw, row_h);
                cx += tw;
            }
            y += row_h;
            h = (h - row_h).max(0.0);
        }
        start = end;
    }
    out
}

/// Worst aspect ratio of a row laid against a side of length `side`.
fn worst_ratio(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    let max = row.iter().copied().fold(f64::MIN, f64::max);
    let min = row.iter().copied().fold(f64::MAX, f64::min);
    if sum <= 0.0 || min <= 0.0 {
        return f64::INFINITY;
    }
    let side2 = side * side;
    let sum2 = sum * sum;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}

fn tile(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::from_min_size(Pos2::new(x as f32, y as f32), Vec2::new(w as f32, h as f32))
}

// ---------------------------------------------------------------------------
// Treemap view (central panel)
// ---------------------------------------------------------------------------

pub fn treemap_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Color Metric:");
        egui::ComboBox::from_id_salt("treemap_metric")
            .selected_text(state.treemap_metric.label())
            .show_ui(ui, |ui: &mut Ui| {
                for metric in TreemapMetric::ALL {
                    ui.selectable_value(&mut state.treemap_metric, metric, metric.label());
                }
            });
    });
    ui.add_space(4.0);

    let stats = &state.region_stats;
    let metric = state.treemap_metric;

    let width = ui.available_width();
    let height = (ui.available_height() * 0.6).max(200.0);
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let bounds = response.rect;

    if stats.is_empty() {
        painter.text(
            bounds.center(),
            Align2::CENTER_CENTER,
            "No region has enough events for the current filters",
            FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let counts: Vec<f64> = stats.iter().map(|s| s.count as f64).collect();
    let tiles = squarify(&counts, bounds);
    let range = ValueRange::from_values(stats.iter().map(|s| metric.value(s)))
        .unwrap_or(ValueRange { min: 0.0, max: 1.0 });

    let mut hovered: Option<&RegionStats> = None;
    for (s, tile) in stats.iter().zip(&tiles) {
        let fill = ColorScale::RdYlBuR.map(metric.value(s), range);
        painter.rect_filled(tile.shrink(1.0), 0.0, fill);

        if tile.width() > 48.0 && tile.height() > 28.0 {
            painter.text(
                tile.center(),
                Align2::CENTER_CENTER,
                format!("{}\n{}", s.region, s.count),
                FontId::proportional(12.0),
                label_color(fill),
            );
        }
        if response.hover_pos().is_some_and(|p| tile.contains(p)) {
            hovered = Some(s);
        }
    }

    if let Some(s) = hovered {
        response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            ui.strong(&s.region);
            ui.label(format!("Count: {}", s.count));
            ui.label(format!("Avg xM: {:.2}", s.mean_magnitude));
            ui.label(format!("Max xM: {:.1}", s.max_magnitude));
            ui.label(format!("Avg depth: {:.1} km", s.mean_depth));
        });
    }

    ui.add_space(8.0);
    stats_table(ui, stats);
}

/// Dark text on light tiles, light text on dark ones.
fn label_color(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn stats_table(ui: &mut Ui, stats: &[RegionStats]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .columns(Column::remainder(), 4)
        .header(20.0, |mut header| {
            for title in ["Region", "Count", "Avg xM", "Max xM", "Avg depth (km)"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for s in stats {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&s.region);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(s.count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", s.mean_magnitude));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", s.max_magnitude));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", s.mean_depth));
                    });
                });
            }
        });
}
