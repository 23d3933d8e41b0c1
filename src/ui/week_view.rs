use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::layout::{self, BandLayer, BandStyle};
use crate::model::{Calendar, TimeInterval, WeekViewport};
use crate::ui::{bands, theme};

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::HOUR_LABEL_WIDTH;
const MIN_COLUMN_WIDTH: f32 = 80.0;

/// Result details from interactions in the week view.
#[derive(Debug, Clone, Default)]
pub struct ViewInteraction {
    pub selection_changed: bool,
    /// Set when an empty slot was double-clicked.
    pub create_at: Option<NaiveDateTime>,
}

/// Render the week grid (central panel).
pub fn show_week_view(
    calendar: &Calendar,
    viewport: &mut WeekViewport,
    band_style: &BandStyle,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ViewInteraction {
    let mut interaction = ViewInteraction::default();
    let available = ui.available_size();
    let days = viewport.mode.days() as f32;
    viewport.column_width = ((available.x - LABEL_WIDTH) / days).max(MIN_COLUMN_WIDTH);

    // Zoom with Ctrl+scroll
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            viewport.zoom_in();
        } else if scroll_delta.y < 0.0 {
            viewport.zoom_out();
        }
    }

    let chart_width = LABEL_WIDTH + viewport.column_width * days;
    let chart_height = HEADER_HEIGHT + viewport.total_height();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let grid_top = origin.y + HEADER_HEIGHT;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            let columns = viewport.column_dates();
            for (i, date) in columns.iter().enumerate() {
                let col_x = column_x(origin, viewport, i);
                if date.weekday().num_days_from_monday() >= 5 {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(col_x, grid_top),
                            Vec2::new(viewport.column_width, viewport.total_height()),
                        ),
                        0.0,
                        theme::BG_WEEKEND,
                    );
                }

                let window = viewport.window_for(*date);
                if let Err(e) = window.validate() {
                    tracing::debug!(column = %date, error = %e, "not painting pause bands");
                    continue;
                }
                let layer = BandLayer::new(&calendar.intervals, window, *band_style);
                let rects = bands::cached_rects(ui.ctx(), *date, layer);
                bands::paint_bands(&painter, Pos2::new(col_x, grid_top), &rects, band_style);
            }

            draw_hour_grid(&painter, origin, viewport, chart_width);
            draw_day_header(&painter, origin, viewport, &columns, chart_width);

            for (i, date) in columns.iter().enumerate() {
                let col_x = column_x(origin, viewport, i);
                for event in calendar.events_on(*date) {
                    let Some(tile) = tile_rect(viewport, event, *date) else {
                        continue;
                    };
                    let tile = tile.translate(Vec2::new(col_x, grid_top));
                    let is_selected = *selected == Some(event.id);
                    draw_event_tile(&painter, event, tile, is_selected);

                    let tile_response = ui.interact(
                        tile,
                        ui.make_persistent_id(("event-tile", event.id, *date)),
                        Sense::click(),
                    );
                    if tile_response.clicked() {
                        *selected = Some(event.id);
                        interaction.selection_changed = true;
                        consumed_click = true;
                    }
                    if tile_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            egui::Id::new(("event-tip", event.id, *date)),
                            |ui| {
                                ui.strong(&event.title);
                                ui.label(describe_span(event));
                            },
                        );
                    }
                }
            }

            draw_now_line(&painter, origin, viewport);

            if response.double_clicked() && !consumed_click {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = pos - Pos2::new(origin.x + LABEL_WIDTH, grid_top);
                    interaction.create_at = slot_at(viewport, local);
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click && selected.is_some() {
                *selected = None;
                interaction.selection_changed = true;
            }
        });

    interaction
}

fn column_x(origin: Pos2, viewport: &WeekViewport, index: usize) -> f32 {
    origin.x + LABEL_WIDTH + index as f32 * viewport.column_width
}

/// Quarter-hour slot under `local`, measured from the top-left of the first column.
fn slot_at(viewport: &WeekViewport, local: Vec2) -> Option<NaiveDateTime> {
    if local.x < 0.0 || local.y < 0.0 || local.y > viewport.total_height() {
        return None;
    }
    let index = (local.x / viewport.column_width) as usize;
    let date = *viewport.column_dates().get(index)?;
    let minute = viewport.y_to_minute(local.y);
    let minute = minute - minute % 15;
    let time = NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0)?;
    Some(date.and_time(time))
}

/// Column-local rect for an event tile, clipped to the visible hours.
fn tile_rect(viewport: &WeekViewport, event: &TimeInterval, column: NaiveDate) -> Option<Rect> {
    let (start, end) = (event.start?, event.end?);
    let (from, to) = layout::day_minutes(event.date, start, end, column).ok()?;
    let top = viewport.minute_to_y(from).max(0.0);
    let bottom = viewport.minute_to_y(to).min(viewport.total_height());
    if bottom <= top {
        return None;
    }
    let height = (bottom - top).max(theme::MIN_TILE_HEIGHT);
    Some(Rect::from_min_size(
        Pos2::new(theme::TILE_INSET, top),
        Vec2::new(viewport.column_width - theme::TILE_INSET * 2.0, height),
    ))
}

fn describe_span(event: &TimeInterval) -> String {
    match (event.start, event.end) {
        (Some(start), Some(end)) if event.is_multi_day() => format!(
            "{} → {}",
            start.format("%a %d/%m %H:%M"),
            end.format("%a %d/%m %H:%M")
        ),
        (Some(start), Some(end)) => {
            format!("{} – {}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => "No time set".to_string(),
    }
}

fn draw_day_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &WeekViewport,
    columns: &[NaiveDate],
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let today = Local::now().date_naive();
    for (i, date) in columns.iter().enumerate() {
        let x = column_x(origin, viewport, i);
        let center = x + viewport.column_width / 2.0;
        let is_today = *date == today;

        painter.text(
            Pos2::new(center, origin.y + 13.0),
            egui::Align2::CENTER_CENTER,
            date.format("%a").to_string(),
            theme::font_sub(),
            if is_today { theme::ACCENT } else { theme::TEXT_SECONDARY },
        );

        let day_pos = Pos2::new(center, origin.y + 30.0);
        if is_today {
            painter.circle_filled(day_pos, 11.0, theme::ACCENT);
        }
        painter.text(
            day_pos,
            egui::Align2::CENTER_CENTER,
            date.format("%d").to_string(),
            theme::font_header(),
            if is_today { Color32::WHITE } else { theme::TEXT_PRIMARY },
        );
    }
}

fn draw_hour_grid(painter: &egui::Painter, origin: Pos2, viewport: &WeekViewport, width: f32) {
    let grid_top = origin.y + HEADER_HEIGHT;
    let grid_bottom = grid_top + viewport.total_height();

    for hour in viewport.start_hour..=viewport.end_hour {
        let y = grid_top + viewport.minute_to_y(hour as i32 * 60);
        painter.line_segment(
            [Pos2::new(origin.x + LABEL_WIDTH, y), Pos2::new(origin.x + width, y)],
            Stroke::new(0.5, theme::HOUR_LINE),
        );
        if hour < viewport.end_hour {
            painter.text(
                Pos2::new(origin.x + LABEL_WIDTH - 6.0, y + 2.0),
                egui::Align2::RIGHT_TOP,
                format!("{:02}:00", hour),
                theme::font_small(),
                theme::TEXT_DIM,
            );
            // Half-hour guides only when there is room for them
            if viewport.pixels_per_minute >= 0.8 {
                let half = y + 30.0 * viewport.pixels_per_minute;
                painter.line_segment(
                    [Pos2::new(origin.x + LABEL_WIDTH, half), Pos2::new(origin.x + width, half)],
                    Stroke::new(0.5, theme::HALF_HOUR_LINE),
                );
            }
        }
    }

    for i in 0..=viewport.mode.days() as usize {
        let x = column_x(origin, viewport, i);
        painter.line_segment(
            [Pos2::new(x, grid_top), Pos2::new(x, grid_bottom)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_now_line(painter: &egui::Painter, origin: Pos2, viewport: &WeekViewport) {
    let now = Local::now().naive_local();
    let Some(index) = viewport.column_dates().iter().position(|d| *d == now.date()) else {
        return;
    };
    let minute = layout::minute_of_day(now.time());
    let y = viewport.minute_to_y(minute);
    if y < 0.0 || y > viewport.total_height() {
        return;
    }
    let y = origin.y + HEADER_HEIGHT + y;
    let x = column_x(origin, viewport, index);

    painter.line_segment(
        [Pos2::new(x, y), Pos2::new(x + viewport.column_width, y)],
        Stroke::new(1.5, theme::NOW_LINE),
    );
    painter.circle_filled(Pos2::new(x, y), 4.0, theme::NOW_LINE);
}

fn draw_event_tile(painter: &egui::Painter, event: &TimeInterval, tile: Rect, is_selected: bool) {
    let rounding = Rounding::same(theme::TILE_ROUNDING);

    // Soft shadow
    painter.rect_filled(
        tile.translate(Vec2::new(1.0, 1.5)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(tile, rounding, event.color);

    // Left accent strip
    let strip = Rect::from_min_size(tile.min, Vec2::new(3.0, tile.height()));
    painter.rect_filled(
        strip,
        Rounding {
            nw: theme::TILE_ROUNDING,
            sw: theme::TILE_ROUNDING,
            ne: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(60),
    );

    if is_selected {
        painter.rect_stroke(
            tile.expand(1.5),
            Rounding::same(theme::TILE_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Title (single line, clipped to the tile)
    if tile.height() >= theme::MIN_TILE_HEIGHT && tile.width() > 24.0 {
        let galley =
            painter.layout_no_wrap(event.title.clone(), theme::font_tile(), theme::TEXT_ON_TILE);
        let clipped = painter.with_clip_rect(tile.shrink(1.0));
        clipped.galley(
            Pos2::new(tile.left() + 6.0, tile.top() + 2.0),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewMode;

    fn at(d: u32, h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, d)
            .and_then(|date| date.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn viewport() -> WeekViewport {
        let mut vp = WeekViewport::new(at(8, 0, 0).date());
        vp.set_mode(ViewMode::Week);
        vp.start_hour = 8;
        vp.end_hour = 18;
        vp.pixels_per_minute = 1.0;
        vp.column_width = 100.0;
        vp
    }

    #[test]
    fn tile_is_clipped_to_visible_hours() {
        let vp = viewport();
        let event = TimeInterval::new_event("Early", at(8, 7, 0), at(8, 9, 0));
        let tile = tile_rect(&vp, &event, at(8, 0, 0).date()).unwrap();
        assert_eq!(tile.top(), 0.0);
        assert_eq!(tile.bottom(), 60.0);
        assert_eq!(tile.width(), 100.0 - theme::TILE_INSET * 2.0);
    }

    #[test]
    fn tile_outside_hours_is_hidden() {
        let vp = viewport();
        let event = TimeInterval::new_event("Dinner", at(8, 19, 0), at(8, 20, 0));
        assert!(tile_rect(&vp, &event, at(8, 0, 0).date()).is_none());
    }

    #[test]
    fn double_click_slot_snaps_to_quarter_hours() {
        let vp = viewport();
        let slot = slot_at(&vp, Vec2::new(250.0, 100.0)).unwrap();
        assert_eq!(slot, at(10, 9, 30));
        assert_eq!(slot_at(&vp, Vec2::new(5.0, 0.0)), Some(at(8, 8, 0)));
    }

    #[test]
    fn slot_outside_the_grid_is_none() {
        let vp = viewport();
        assert!(slot_at(&vp, Vec2::new(-1.0, 10.0)).is_none());
        assert!(slot_at(&vp, Vec2::new(10.0, vp.total_height() + 1.0)).is_none());
        assert!(slot_at(&vp, Vec2::new(100.0 * 7.0 + 1.0, 10.0)).is_none());
    }

    #[test]
    fn short_tiles_get_a_minimum_height() {
        let vp = viewport();
        let event = TimeInterval::new_event("Ping", at(8, 10, 0), at(8, 10, 5));
        let tile = tile_rect(&vp, &event, at(8, 0, 0).date()).unwrap();
        assert_eq!(tile.height(), theme::MIN_TILE_HEIGHT);
    }
}
