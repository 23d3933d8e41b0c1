use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::layout::VisibleWindow;

/// How many day columns the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    Day,
    #[default]
    Week,
}

impl ViewMode {
    pub fn days(self) -> i64 {
        match self {
            ViewMode::Day => 1,
            ViewMode::Week => 7,
        }
    }
}

/// Manages the visible range and scale of the week grid.
#[derive(Debug, Clone)]
pub struct WeekViewport {
    /// Date of the leftmost column.
    pub first_day: NaiveDate,
    pub mode: ViewMode,
    pub start_hour: u32,
    pub end_hour: u32,
    /// Vertical pixels per minute (controls zoom level).
    pub pixels_per_minute: f32,
    pub column_width: f32,
    pub week_starts_monday: bool,
}

pub const MIN_PIXELS_PER_MINUTE: f32 = 0.4;
pub const MAX_PIXELS_PER_MINUTE: f32 = 4.0;

impl WeekViewport {
    pub fn new(today: NaiveDate) -> Self {
        let mut viewport = Self {
            first_day: today,
            mode: ViewMode::Week,
            start_hour: 0,
            end_hour: 24,
            pixels_per_minute: 1.0,
            column_width: 140.0,
            week_starts_monday: true,
        };
        viewport.go_to(today);
        viewport
    }

    /// Dates of the visible columns, left to right.
    pub fn column_dates(&self) -> Vec<NaiveDate> {
        (0..self.mode.days())
            .map(|i| self.first_day + Duration::days(i))
            .collect()
    }

    pub fn window_for(&self, date: NaiveDate) -> VisibleWindow {
        VisibleWindow::full_day(date, self.column_width, self.pixels_per_minute)
            .with_hours(self.start_hour, self.end_hour)
    }

    /// Convert minutes-since-midnight to a y offset from the top of the grid.
    pub fn minute_to_y(&self, minute: i32) -> f32 {
        (minute - self.start_hour as i32 * 60) as f32 * self.pixels_per_minute
    }

    /// Convert a y offset back to minutes-since-midnight, clamped to the visible hours.
    pub fn y_to_minute(&self, y: f32) -> i32 {
        let minute = (y / self.pixels_per_minute).round() as i32 + self.start_hour as i32 * 60;
        minute.clamp(self.start_hour as i32 * 60, self.end_hour as i32 * 60)
    }

    /// Total height in pixels for the visible hours.
    pub fn total_height(&self) -> f32 {
        self.minute_to_y(self.end_hour as i32 * 60)
    }

    pub fn zoom_in(&mut self) {
        self.pixels_per_minute = (self.pixels_per_minute * 1.2).min(MAX_PIXELS_PER_MINUTE);
    }

    pub fn zoom_out(&mut self) {
        self.pixels_per_minute = (self.pixels_per_minute / 1.2).max(MIN_PIXELS_PER_MINUTE);
    }

    /// Scroll the viewport by a number of days.
    pub fn scroll_days(&mut self, days: i64) {
        self.first_day += Duration::days(days);
    }

    /// Move one page (a day or a week) forward or back.
    pub fn page(&mut self, forward: bool) {
        let step = self.mode.days();
        self.scroll_days(if forward { step } else { -step });
    }

    /// Show `date`, snapping to the start of its week in week mode.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.first_day = match self.mode {
            ViewMode::Day => date,
            ViewMode::Week => {
                let offset = if self.week_starts_monday {
                    date.weekday().num_days_from_monday()
                } else {
                    date.weekday().num_days_from_sunday()
                };
                date - Duration::days(offset as i64)
            }
        };
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        let anchor = self.first_day;
        self.mode = mode;
        self.go_to(anchor);
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date < self.first_day + Duration::days(self.mode.days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    #[test]
    fn week_mode_snaps_to_monday() {
        // 2024-10-17 is a Thursday.
        let vp = WeekViewport::new(date(17));
        assert_eq!(vp.first_day, date(14));
        assert_eq!(vp.column_dates().len(), 7);
        assert!(vp.contains(date(20)));
        assert!(!vp.contains(date(21)));
    }

    #[test]
    fn sunday_start_snaps_to_sunday() {
        let mut vp = WeekViewport::new(date(17));
        vp.week_starts_monday = false;
        vp.go_to(date(17));
        assert_eq!(vp.first_day, date(13));
    }

    #[test]
    fn minute_and_y_conversions_respect_start_hour() {
        let mut vp = WeekViewport::new(date(17));
        vp.start_hour = 8;
        vp.end_hour = 18;
        vp.pixels_per_minute = 2.0;
        assert_eq!(vp.minute_to_y(9 * 60), 120.0);
        assert_eq!(vp.y_to_minute(120.0), 9 * 60);
        assert_eq!(vp.y_to_minute(-50.0), 8 * 60);
        assert_eq!(vp.total_height(), 1200.0);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut vp = WeekViewport::new(date(17));
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.pixels_per_minute, MAX_PIXELS_PER_MINUTE);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.pixels_per_minute, MIN_PIXELS_PER_MINUTE);
    }

    #[test]
    fn window_for_carries_viewport_geometry() {
        let mut vp = WeekViewport::new(date(17));
        vp.start_hour = 6;
        vp.end_hour = 20;
        let window = vp.window_for(date(15));
        assert_eq!(window.column_date, date(15));
        assert_eq!(window.pixel_height, vp.total_height());
        assert_eq!(window.pixel_width, vp.column_width);
    }
}
