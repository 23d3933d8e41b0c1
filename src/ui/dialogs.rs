use crate::app::WeekCalendarApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Interval" dialog.
pub fn show_add_interval_dialog(app: &mut WeekCalendarApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Interval").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            let draft = &mut app.draft;

            egui::Grid::new("add_interval_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.title).hint_text("Title..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut draft.date).id_salt("dlg_dp_date"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("From").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [70.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.start_time).hint_text("HH:MM"),
                    );
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut draft.multi_day, "Ends on another day");
                    ui.end_row();

                    if draft.multi_day {
                        ui.label(RichText::new("End date").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut draft.end_date)
                                .id_salt("dlg_dp_end_date"),
                        );
                        ui.end_row();
                    }

                    ui.label(RichText::new("Until").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [70.0, 24.0],
                        egui::TextEdit::singleline(&mut draft.end_time).hint_text("HH:MM"),
                    );
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut draft.is_pause, "Pause (background band)");
                    ui.end_row();
                });

            if let Some(err) = &app.draft_error {
                ui.add_space(4.0);
                ui.label(RichText::new(err).color(theme::NOW_LINE).size(11.0));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked()
                    && app.create_interval_from_draft()
                {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_interval = false;
        app.draft_error = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut WeekCalendarApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Week Calendar").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A week calendar with pause bands,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
