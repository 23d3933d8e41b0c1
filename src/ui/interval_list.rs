use crate::model::{TimeInterval, WeekViewport};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

/// Actions the interval list can request.
pub enum ListAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the left-side list of intervals touching the visible range.
///
/// Pauses are marked with `pause_fill`, the colour their bands are painted in.
pub fn show_interval_list(
    intervals: &[TimeInterval],
    viewport: &WeekViewport,
    selected: Option<Uuid>,
    pause_fill: Color32,
    ui: &mut Ui,
) -> ListAction {
    let mut action = ListAction::None;
    let columns = viewport.column_dates();
    let visible: Vec<&TimeInterval> = intervals
        .iter()
        .filter(|iv| columns.iter().any(|d| iv.covers(*d)))
        .collect();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("This view")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", visible.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Interval", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = ListAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, iv) in visible.iter().enumerate() {
                let is_selected = selected == Some(iv.id);
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        let dot = if iv.is_pause() { pause_fill } else { iv.color };
                        ui.painter().circle_filled(dot_rect.center(), 3.0, dot);

                        let title = if iv.is_pause() {
                            format!("{} {}", egui_phosphor::regular::PAUSE, iv.title)
                        } else {
                            iv.title.clone()
                        };
                        ui.add(
                            egui::Label::new(RichText::new(title).size(12.0).color(if is_selected {
                                Color32::WHITE
                            } else {
                                theme::TEXT_PRIMARY
                            }))
                            .truncate(),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;

                            let del_btn = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::X)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del_btn.on_hover_text("Delete interval").clicked() {
                                action = ListAction::Delete(iv.id);
                            }

                            ui.label(
                                RichText::new(compact_span(iv))
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("interval-row", iv.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = ListAction::Select(iv.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}

fn compact_span(iv: &TimeInterval) -> String {
    match (iv.start, iv.end) {
        (Some(start), Some(end)) if iv.is_multi_day() => {
            format!("{} → {}", start.format("%d/%m"), end.format("%d/%m"))
        }
        (Some(start), Some(end)) => format!(
            "{} {}–{}",
            iv.date.format("%a"),
            start.format("%H:%M"),
            end.format("%H:%M")
        ),
        _ => format!("{} (no time)", iv.date.format("%a %d/%m")),
    }
}
