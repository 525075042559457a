use std::time::Duration;

use eframe::egui;

use crate::config::BrowserConfig;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SdgBrowserApp {
    pub state: AppState,
}

impl SdgBrowserApp {
    /// Build the app and start loading the configured data file, if any.
    pub fn new(config: &BrowserConfig) -> Self {
        let rows_per_page = config.rows_per_page().unwrap_or_else(|e| {
            log::warn!("{e}; using the default page size");
            Default::default()
        });
        let mut state = AppState::new(rows_per_page);
        if let Some(path) = &config.data_path {
            state.begin_load(path.clone(), false);
        }
        Self { state }
    }
}

impl eframe::App for SdgBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.loading {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Filter row ----
        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("SDG Initiatives");
            ui.label("A curated list of projects and publications.");
            ui.add_space(4.0);
            panels::filter_bar(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::records_table(ui, &mut self.state);
        });
    }
}
