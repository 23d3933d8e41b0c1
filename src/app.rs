use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::path::PathBuf;
use uuid::Uuid;

use crate::model::{Calendar, TimeInterval, ViewMode, WeekViewport};
use crate::settings::SettingsStore;
use crate::ui;

/// Field values of the "Add Interval" dialog.
#[derive(Debug, Clone)]
pub struct IntervalDraft {
    pub title: String,
    pub date: NaiveDate,
    pub multi_day: bool,
    pub end_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub is_pause: bool,
}

impl IntervalDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date,
            multi_day: false,
            end_date: date + Duration::days(1),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            is_pause: false,
        }
    }

    /// A one-hour draft starting at `at`, cut off at the end of its day.
    pub fn starting_at(at: NaiveDateTime) -> Self {
        let end = at + Duration::hours(1);
        let end_time = if end.date() == at.date() {
            end.format("%H:%M").to_string()
        } else {
            "23:59".to_string()
        };
        Self {
            start_time: format!("{:02}:{:02}", at.hour(), at.minute()),
            end_time,
            ..Self::new(at.date())
        }
    }

    /// Turn the draft into an interval, or explain what is wrong with it.
    pub fn build(&self, color_index: usize) -> Result<TimeInterval, String> {
        let parse = |label: &str, s: &str| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M")
                .map_err(|_| format!("{} time '{}' is not HH:MM", label, s.trim()))
        };
        let start = self.date.and_time(parse("Start", &self.start_time)?);
        let end_date = if self.multi_day { self.end_date } else { self.date };
        let end = end_date.and_time(parse("End", &self.end_time)?);
        if end <= start {
            return Err("End must be after start".to_string());
        }

        let title = if self.title.trim().is_empty() {
            let fallback = if self.is_pause { "Pause" } else { "New Event" };
            fallback.to_string()
        } else {
            self.title.trim().to_string()
        };

        Ok(if self.is_pause {
            TimeInterval::new_pause(title, start, end)
        } else {
            let mut iv = TimeInterval::new_event(title, start, end);
            iv.color = ui::theme::event_color(color_index);
            iv
        })
    }
}

/// Main application state.
pub struct WeekCalendarApp {
    pub calendar: Calendar,
    pub viewport: WeekViewport,
    pub file_path: Option<PathBuf>,
    pub selected: Option<Uuid>,
    pub settings: SettingsStore,

    // Dialog state
    pub show_add_interval: bool,
    pub show_about: bool,
    pub draft: IntervalDraft,
    pub draft_error: Option<String>,

    // Status message
    pub status_message: String,
}

impl WeekCalendarApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let today = chrono::Local::now().date_naive();
        let settings = SettingsStore::open_default();
        let mut viewport = WeekViewport::new(today);
        settings.settings.apply_to(&mut viewport);
        viewport.go_to(today);
        tracing::info!(path = %settings.path().display(), "settings loaded");

        Self {
            calendar: Self::sample_calendar(today),
            viewport,
            file_path: None,
            selected: None,
            settings,
            show_add_interval: false,
            show_about: false,
            draft: IntervalDraft::new(today),
            draft_error: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample calendar for demonstration.
    fn sample_calendar(today: NaiveDate) -> Calendar {
        let mut calendar = Calendar::new("Sample Calendar");
        let at = |day: i64, h: u32, m: u32| {
            (today + Duration::days(day))
                .and_hms_opt(h, m, 0)
                .unwrap_or_else(|| today.and_time(NaiveTime::MIN))
        };

        for day in -3..=3 {
            let lunch = TimeInterval::new_pause("Lunch break", at(day, 12, 0), at(day, 13, 0));
            calendar.intervals.push(lunch);
        }

        let leave = TimeInterval::new_pause("Out of office", at(1, 15, 0), at(3, 11, 0));
        calendar.intervals.push(leave);

        let events = [
            ("Standup", 0, (9, 0), (9, 15)),
            ("Design review", 0, (10, 0), (11, 30)),
            ("1:1", -1, (14, 0), (14, 30)),
            ("Planning", 2, (9, 30), (11, 0)),
            ("Focus time", -2, (13, 30), (16, 0)),
        ];
        for (i, (title, day, (sh, sm), (eh, em))) in events.into_iter().enumerate() {
            let mut iv = TimeInterval::new_event(title, at(day, sh, sm), at(day, eh, em));
            iv.color = ui::theme::event_color(i);
            calendar.intervals.push(iv);
        }

        calendar
    }

    // --- File operations ---

    pub fn new_calendar(&mut self) {
        self.calendar = Calendar::default();
        self.file_path = None;
        self.selected = None;
        self.status_message = "New calendar created".to_string();
    }

    pub fn open_calendar(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Calendar", &["calendar.json", "json"])
            .pick_file()
        {
            match crate::io::load_calendar(&path) {
                Ok(calendar) => {
                    self.calendar = calendar;
                    self.file_path = Some(path);
                    self.selected = None;
                    self.status_message = "Calendar loaded".to_string();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load calendar");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_calendar(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.calendar.touch();
            match crate::io::save_calendar(&self.calendar, &path) {
                Ok(()) => self.status_message = "Calendar saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_calendar_as();
        }
    }

    pub fn save_calendar_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Calendar", &["calendar.json", "json"])
            .set_file_name(format!("{}.calendar.json", self.calendar.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.calendar.touch();
            match crate::io::save_calendar(&self.calendar, &path) {
                Ok(()) => self.status_message = "Calendar saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if the current calendar has intervals, confirm before replacing
        if !self.calendar.intervals.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current calendar. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((intervals, skipped)) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Calendar")
                        .to_string();

                    let count = intervals.len();
                    let first = intervals.iter().map(|iv| iv.date).min();
                    self.calendar = Calendar::new(name);
                    self.calendar.intervals = intervals;
                    self.file_path = None;
                    self.selected = None;
                    if let Some(first) = first {
                        self.viewport.go_to(first);
                    }

                    self.status_message = if skipped > 0 {
                        format!("Imported {} intervals ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} intervals", count)
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "CSV import failed");
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.calendar.intervals.is_empty() {
            self.status_message = "Nothing to export: calendar has no intervals".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}.csv", self.calendar.name))
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.calendar.intervals, &path) {
                Ok(count) => self.status_message = format!("Exported {} intervals to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    // --- Interval operations ---

    /// Add the dialog's interval. Returns `false` (and sets an error) when the draft is invalid.
    pub fn create_interval_from_draft(&mut self) -> bool {
        match self.draft.build(self.calendar.intervals.len()) {
            Ok(interval) => {
                self.status_message = format!("Added '{}'", interval.title);
                self.selected = Some(interval.id);
                if !self.viewport.contains(interval.date) {
                    self.viewport.go_to(interval.date);
                }
                self.calendar.add(interval);
                self.draft = IntervalDraft::new(self.draft.date);
                self.draft_error = None;
                true
            }
            Err(e) => {
                self.draft_error = Some(e);
                false
            }
        }
    }

    pub fn delete_interval(&mut self, id: Uuid) {
        if self.calendar.remove(id) {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.status_message = "Interval deleted".to_string();
        }
    }

    // --- View / settings ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.viewport.set_mode(mode);
        self.persist_settings();
    }

    pub fn persist_settings(&mut self) {
        self.settings.settings.capture(&self.viewport);
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "failed to save settings");
            self.status_message = format!("Could not save settings: {}", e);
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = self.settings.config_dir().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }
}

impl eframe::App for WeekCalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let should_delete = !self.show_add_interval
            && ctx.input(|i| i.key_pressed(egui::Key::Delete));
        if should_save {
            self.save_calendar();
        }
        if should_delete {
            if let Some(id) = self.selected {
                self.delete_interval(id);
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Intervals: {} ({} pauses)",
                                self.calendar.intervals.len(),
                                self.calendar.pause_intervals().count()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.viewport.pixels_per_minute * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut list_action = ui::interval_list::ListAction::None;
        egui::SidePanel::left("interval_panel")
            .default_width(280.0)
            .min_width(200.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                list_action = ui::interval_list::show_interval_list(
                    &self.calendar.intervals,
                    &self.viewport,
                    self.selected,
                    self.settings.settings.pause_fill,
                    ui,
                );
            });

        match list_action {
            ui::interval_list::ListAction::Select(id) => self.selected = Some(id),
            ui::interval_list::ListAction::Delete(id) => self.delete_interval(id),
            ui::interval_list::ListAction::Add => {
                self.draft = IntervalDraft::new(self.viewport.first_day);
                self.show_add_interval = true;
            }
            ui::interval_list::ListAction::None => {}
        }

        let band_style = self.settings.settings.band_style();
        let pixels_per_minute = self.viewport.pixels_per_minute;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::week_view::show_week_view(
                &self.calendar,
                &mut self.viewport,
                &band_style,
                &mut self.selected,
                ui,
            );
            if let Some(at) = interaction.create_at {
                self.draft = IntervalDraft::starting_at(at);
                self.draft_error = None;
                self.show_add_interval = true;
            }
            if interaction.selection_changed {
                self.status_message = match self.selected.and_then(|id| self.calendar.find(id)) {
                    Some(iv) => format!("Selected '{}'", iv.title),
                    None => "Ready".to_string(),
                };
            }
        });
        if self.viewport.pixels_per_minute != pixels_per_minute {
            self.persist_settings();
        }

        if self.show_add_interval {
            ui::dialogs::show_add_interval_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn draft_builds_pause_interval() {
        let mut draft = IntervalDraft::new(day());
        draft.is_pause = true;
        draft.start_time = "12:00".into();
        draft.end_time = "12:45".into();
        let iv = draft.build(0).unwrap();
        assert!(iv.is_pause());
        assert_eq!(iv.title, "Pause");
        assert_eq!(iv.date, day());
        assert_eq!(iv.color, TimeInterval::PAUSE_COLOR);
        assert_eq!(draft.build(3).unwrap().color, TimeInterval::PAUSE_COLOR);
    }

    #[test]
    fn draft_rejects_reversed_times() {
        let mut draft = IntervalDraft::new(day());
        draft.start_time = "15:00".into();
        draft.end_time = "14:00".into();
        assert!(draft.build(0).is_err());
    }

    #[test]
    fn multi_day_draft_uses_end_date() {
        let mut draft = IntervalDraft::new(day());
        draft.multi_day = true;
        draft.start_time = "18:00".into();
        draft.end_time = "08:00".into();
        let iv = draft.build(1).unwrap();
        assert!(iv.is_multi_day());
        assert_eq!(iv.end_date(), day() + Duration::days(1));
    }

    #[test]
    fn draft_from_grid_slot_lasts_an_hour() {
        let draft = IntervalDraft::starting_at(day().and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(draft.date, day());
        assert_eq!((draft.start_time.as_str(), draft.end_time.as_str()), ("09:30", "10:30"));

        let late = IntervalDraft::starting_at(day().and_hms_opt(23, 15, 0).unwrap());
        assert_eq!(late.end_time, "23:59");
        assert!(late.build(0).is_ok());
    }

    #[test]
    fn draft_reports_bad_time_format() {
        let mut draft = IntervalDraft::new(day());
        draft.start_time = "9am".into();
        let err = draft.build(0).unwrap_err();
        assert!(err.contains("9am"));
    }
}
