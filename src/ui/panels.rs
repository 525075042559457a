use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::{EXPORT_FILE_NAME, export_to_path};
use crate::data::facets::Facets;
use crate::data::filter::selection;
use crate::state::AppState;

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
        });

        ui.separator();

        let can_export = state.dataset.is_some();
        if ui
            .add_enabled(can_export, egui::Button::new("⬇ Download CSV"))
            .clicked()
        {
            save_file_dialog(state);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            if ds.is_empty() {
                ui.label("No initiatives in this file");
            } else {
                ui.label(format!(
                    "{} initiatives loaded, {} visible",
                    ds.len(),
                    state.visible_count()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

/// Render the search box and the Year / Region / SDG Target selectors.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    // The Arc keeps the option lists alive while `state` is mutated below.
    let dataset = state.dataset.clone();
    let no_facets = Facets::default();
    let facets = dataset.as_deref().map_or(&no_facets, |ds| &ds.facets);
    let filters = state.filters().clone();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        let mut search = filters.search.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search anything...")
                .desired_width(240.0),
        );
        if response.changed() {
            state.set_search(&search);
        }

        if let Some(year) = facet_combo(ui, "Year", &facets.years, filters.year.as_deref()) {
            state.set_year(year);
        }
        if let Some(region) =
            facet_combo(ui, "Region", &facets.regions, filters.region.as_deref())
        {
            state.set_region(region);
        }
        if let Some(target) =
            facet_combo(ui, "SDG Target", &facets.targets, filters.target.as_deref())
        {
            state.set_target(target);
        }

        if ui
            .add_enabled(!filters.is_empty(), egui::Button::new("Clear filters"))
            .clicked()
        {
            state.clear_filters();
        }
    });
}

/// A combo box with an empty "Filter by …" entry followed by `options`.
/// Returns the new selection when the user picked a different entry.
fn facet_combo(
    ui: &mut Ui,
    label: &str,
    options: &[String],
    current: Option<&str>,
) -> Option<Option<String>> {
    let placeholder = format!("Filter by {label}");
    let mut picked = current.unwrap_or("").to_string();

    egui::ComboBox::from_id_salt(label)
        .width(180.0)
        .selected_text(current.unwrap_or(placeholder.as_str()))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut picked, String::new(), placeholder.as_str());
            for opt in options {
                ui.selectable_value(&mut picked, opt.clone(), opt.as_str());
            }
        });

    let picked = selection(&picked);
    (picked.as_deref() != current).then_some(picked)
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open SDG initiatives")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(path, true);
    }
}

/// Save the filtered (not paginated) records as CSV.
pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    let (Some(path), Some(dataset)) = (file, state.dataset.clone()) else {
        return;
    };
    let records = state.filtered_records();
    let count = records.len();
    match export_to_path(&dataset.columns, records, &path) {
        Ok(()) => {
            log::info!("Exported {count} initiatives to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
