use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use brewery_dashboard::data::filter::Selection;
use brewery_dashboard::data::summary::SummaryStatistics;
use brewery_dashboard::state::Session;

use crate::app::UiAction;
use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every widget change goes straight into the
/// session, which recomputes before the central panel draws.
pub fn side_panel(ui: &mut Ui, session: &mut Session) {
    ui.heading("Filters");
    ui.separator();

    // ---- Name search ----
    ui.strong("Search");
    let mut text = session.criteria().search_text.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text("Search by name...")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        session.set_search_text(text);
    }
    ui.add_space(8.0);

    // ---- Type dropdown ----
    ui.strong("Type");
    let type_options = session.snapshot().type_options();
    let current_type = session.criteria().type_filter.clone();
    let type_text = match &current_type {
        Selection::All => "All Types".to_string(),
        Selection::Only(t) => t.label(),
    };
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(type_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current_type.is_all(), "All Types")
                .clicked()
            {
                session.set_type_filter(Selection::All);
            }
            for t in type_options {
                let selected = current_type == Selection::Only(t.clone());
                if ui.selectable_label(selected, t.label()).clicked() {
                    session.set_type_filter(Selection::Only(t));
                }
            }
        });
    ui.add_space(8.0);

    // ---- State dropdown ----
    ui.strong("State");
    let states: Vec<String> = session.snapshot().states.iter().cloned().collect();
    let current_state = session.criteria().state_filter.clone();
    let state_text = match &current_state {
        Selection::All => "All States".to_string(),
        Selection::Only(s) => s.clone(),
    };
    egui::ComboBox::from_id_salt("state_filter")
        .selected_text(state_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current_state.is_all(), "All States")
                .clicked()
            {
                session.set_state_filter(Selection::All);
            }
            for s in states {
                let selected = current_state == Selection::Only(s.clone());
                if ui.selectable_label(selected, &s).clicked() {
                    session.set_state_filter(Selection::Only(s));
                }
            }
        });
    ui.add_space(12.0);

    let can_reset = !session.criteria().is_default();
    if ui
        .add_enabled(can_reset, egui::Button::new("Reset filters"))
        .clicked()
    {
        session.reset_criteria();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &Session) -> Option<UiAction> {
    let mut action = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open snapshot…").clicked() {
                action = open_file_dialog().map(UiAction::OpenFile);
                ui.close_menu();
            }
        });

        ui.separator();

        if session.loading {
            ui.spinner();
            ui.label("Loading breweries…");
        } else {
            let snapshot = session.snapshot();
            ui.label(format!(
                "{} breweries loaded, {} matching",
                snapshot.len(),
                session.summary().total
            ));
            ui.label(RichText::new(snapshot.source.to_string()).weak());
        }

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    action
}

// ---------------------------------------------------------------------------
// Summary widgets
// ---------------------------------------------------------------------------

pub fn summary_cards(ui: &mut Ui, summary: &SummaryStatistics) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        card(ui, "Total Breweries", summary.total.to_string());
        card(
            ui,
            "Average Name Length",
            format!("{:.2}", summary.average_name_length),
        );
        card(ui, "Most Common City", summary.most_common_city.clone());
        card(ui, "Most Common Type", summary.most_common_type.clone());
        card(ui, "Most Common State", summary.most_common_state.clone());
    });
}

fn card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).small().weak());
            ui.label(RichText::new(value).heading());
        });
    });
}

// ---------------------------------------------------------------------------
// Results table
// ---------------------------------------------------------------------------

/// Table of the first `limit` matching breweries. The cap is display-only.
pub fn results_table(ui: &mut Ui, session: &Session, colors: &ColorMap, limit: usize) {
    let rows = session.display_rows(limit);
    let total = session.summary().total;

    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = if session.snapshot().is_empty() {
                "No breweries loaded  (File → Open snapshot…)"
            } else {
                "No breweries match the current filters"
            };
            ui.heading(msg);
        });
        return;
    }

    ui.label(format!("Showing {} of {total}", rows.len()));

    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(160.0).clip(true))
        .columns(Column::auto().at_least(90.0).clip(true), 3)
        .header(24.0, |mut header| {
            for title in ["Name", "Type", "City", "State"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(text_height + 8.0, rows.len(), |mut row| {
                let b = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&b.name);
                });
                row.col(|ui: &mut Ui| {
                    let color = colors.color_for(&b.brewery_type);
                    ui.label(RichText::new(b.brewery_type.as_str()).color(color));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&b.city);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&b.state);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open brewery snapshot")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file()
}
