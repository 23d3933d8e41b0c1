use crate::app::WeekCalendarApp;
use crate::model::ViewMode;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut WeekCalendarApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Calendar").clicked() {
                app.new_calendar();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_calendar();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_calendar();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_calendar_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Columns").small().weak());
            let mut mode = app.viewport.mode;
            let day = ui.radio_value(&mut mode, ViewMode::Day, "Day").clicked();
            let week = ui.radio_value(&mut mode, ViewMode::Week, "Week").clicked();
            if day || week {
                app.set_view_mode(mode);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.viewport.zoom_in();
                app.persist_settings();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.viewport.zoom_out();
                app.persist_settings();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button(icons::CARET_LEFT).on_hover_text("Previous").clicked() {
            app.viewport.page(false);
        }
        if ui.button("Today").clicked() {
            app.viewport.go_to(chrono::Local::now().date_naive());
        }
        if ui.button(icons::CARET_RIGHT).on_hover_text("Next").clicked() {
            app.viewport.page(true);
        }

        let columns = app.viewport.column_dates();
        if let (Some(first), Some(last)) = (columns.first(), columns.last()) {
            let range = if first == last {
                first.format("%A %d %B %Y").to_string()
            } else {
                format!("{} – {}", first.format("%d %b"), last.format("%d %b %Y"))
            };
            ui.label(RichText::new(range).font(theme::font_header()));
        }

        // Right-aligned calendar name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.calendar.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
