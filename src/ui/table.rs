use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Record;
use crate::pagination::RowsPerPage;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 28.0;
const DETAIL_HEIGHT: f32 = 120.0;
const FOOTER_HEIGHT: f32 = 32.0;

// ---------------------------------------------------------------------------
// Records table (central panel)
// ---------------------------------------------------------------------------

/// Render the current page of filtered records followed by the pager footer.
///
/// Before a dataset is loaded this is an empty table.
pub fn records_table(ui: &mut Ui, state: &mut AppState) {
    let rows = state.visible_page();
    let mut toggled: Option<String> = None;

    let table_height = (ui.available_height() - FOOTER_HEIGHT).max(ROW_HEIGHT);

    ui.push_id("records_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(TableColumn::exact(28.0)) // expand toggle
            .column(TableColumn::remainder().at_least(220.0).clip(true)) // Title
            .column(TableColumn::initial(160.0).clip(true)) // Author(s)
            .column(TableColumn::auto().at_least(48.0)) // Year
            .column(TableColumn::initial(140.0).clip(true)) // Type
            .column(TableColumn::initial(180.0).clip(true)) // Region
            .column(TableColumn::auto().at_least(90.0)) // Link
            .min_scrolled_height(0.0)
            .max_scroll_height(table_height)
            .header(22.0, |mut header| {
                header.col(|_| {});
                for title in ["Title", "Author(s)", "Year", "Type", "Region", "Link"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for &rec in &rows {
                    let expanded = state.expanded.is_expanded(&rec.serial_no);

                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            let chevron = if expanded { "⏷" } else { "⏵" };
                            if ui.small_button(chevron).clicked() {
                                toggled = Some(rec.serial_no.clone());
                            }
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&rec.title).strong());
                        });
                        row.col(|ui| {
                            ui.label(&rec.authors);
                        });
                        row.col(|ui| {
                            ui.label(&rec.year);
                        });
                        row.col(|ui| {
                            let color = state.type_palette.color_for(&rec.kind);
                            ui.label(RichText::new(&rec.kind).small().strong().color(color));
                        });
                        row.col(|ui| {
                            ui.label(&rec.region);
                        });
                        row.col(|ui| {
                            if !rec.link.is_empty() {
                                ui.hyperlink_to("View Source", &rec.link);
                            }
                        });
                    });

                    if expanded {
                        body.row(DETAIL_HEIGHT, |mut row| {
                            row.col(|_| {});
                            row.col(|ui| detail_summary(ui, rec));
                            row.col(|ui| detail_facts(ui, rec));
                            for _ in 0..4 {
                                row.col(|_| {});
                            }
                        });
                    }
                }
            });
    });

    if let Some(id) = toggled {
        state.toggle_expanded(&id);
    }

    ui.separator();
    pager_footer(ui, state);
}

fn detail_summary(ui: &mut Ui, rec: &Record) {
    ui.with_layout(Layout::top_down(Align::Min), |ui: &mut Ui| {
        ui.strong("Summary");
        egui::ScrollArea::vertical()
            .id_salt(("summary", &rec.serial_no))
            .max_height(DETAIL_HEIGHT - 24.0)
            .show(ui, |ui: &mut Ui| {
                ui.add(egui::Label::new(&rec.summary).wrap());
            });
    });
}

fn detail_facts(ui: &mut Ui, rec: &Record) {
    ui.with_layout(Layout::top_down(Align::Min), |ui: &mut Ui| {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong("Publisher:");
            ui.label(&rec.publisher);
        });
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong("SDG Target(s):");
            ui.label(&rec.sdg_targets);
        });
    });
}

// ---------------------------------------------------------------------------
// Footer: result range, page size, Prev / Next
// ---------------------------------------------------------------------------

fn pager_footer(ui: &mut Ui, state: &mut AppState) {
    let total = state.visible_count();
    let pager = *state.pager();
    let (first, last, _) = pager.showing(total);
    let pages = pager.total_pages(total);

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Showing {first} to {last} of {total} results"));
        if pages > 0 {
            ui.separator();
            ui.label(format!("Page {} of {pages}", pager.current_page()));
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            if ui
                .add_enabled(pager.can_next(total), egui::Button::new("Next"))
                .clicked()
            {
                state.next_page();
            }
            if ui
                .add_enabled(pager.can_prev(), egui::Button::new("Prev"))
                .clicked()
            {
                state.prev_page();
            }

            let mut rows = pager.rows_per_page();
            egui::ComboBox::from_id_salt("rows_per_page")
                .width(56.0)
                .selected_text(rows.get().to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in RowsPerPage::OPTIONS {
                        ui.selectable_value(&mut rows, option, option.get().to_string());
                    }
                });
            if rows != pager.rows_per_page() {
                state.set_rows_per_page(rows);
            }
            ui.label("Rows per page:");
        });
    });
}
