use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::LARGE_EVENT_MAGNITUDE;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let limits = state.limits;
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Year Range");
            let (lo, hi) = &mut state.filter.years;
            changed |= range_sliders(ui, lo, hi, limits.years.0..=limits.years.1, None);
            ui.separator();

            ui.strong("Magnitude Range (xM)");
            let (lo, hi) = &mut state.filter.magnitude;
            changed |= range_sliders(ui, lo, hi, limits.magnitude.0..=limits.magnitude.1, Some(0.1));
            ui.separator();

            ui.strong("Depth Range (km)");
            let (lo, hi) = &mut state.filter.depth;
            changed |= range_sliders(ui, lo, hi, 0.0..=limits.depth_max, None);
            ui.separator();

            let label = format!("Large Earthquakes Only (xM >= {LARGE_EVENT_MAGNITUDE:.1})");
            changed |= ui.checkbox(&mut state.filter.large_only, label).changed();
        });

    // Recompute the view after any slider or checkbox change.
    if changed {
        state.refilter();
    }
}

/// A "from" and a "to" slider over the same range, kept ordered.
fn range_sliders<T: egui::emath::Numeric>(
    ui: &mut Ui,
    lo: &mut T,
    hi: &mut T,
    range: std::ops::RangeInclusive<T>,
    step: Option<f64>,
) -> bool {
    let mut from = egui::Slider::new(lo, range.clone()).text("from");
    let mut to = egui::Slider::new(hi, range).text("to");
    if let Some(step) = step {
        from = from.step_by(step);
        to = to.step_by(step);
    }
    let changed = ui.add(from).changed() | ui.add(to).changed();
    if lo.to_f64() > hi.to_f64() {
        std::mem::swap(lo, hi);
    }
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }

        ui.separator();

        ui.label(format!(
            "{} events loaded, {} visible",
            state.catalog.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open earthquake catalog")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
