use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{map, panels, scatter, treemap};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuakeAtlasApp {
    pub state: AppState,
}

impl QuakeAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for QuakeAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and view tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.tab.label());
            match self.state.tab {
                Tab::Map => map::map_view(ui, &mut self.state),
                Tab::Treemap => treemap::treemap_view(ui, &mut self.state),
                Tab::Scatter => scatter::scatter_view(ui, &mut self.state),
            }
        });
    }
}
