mod app;
mod color;
mod config;
mod data;
mod pagination;
mod state;
mod ui;

use app::SdgBrowserApp;
use config::BrowserConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = BrowserConfig::from_env().unwrap_or_else(|e| {
        log::error!("{e}; falling back to the default configuration");
        BrowserConfig::default()
    });
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SDG Initiatives Browser",
        options,
        Box::new(move |_cc| Ok(Box::new(SdgBrowserApp::new(&config)))),
    )
}
