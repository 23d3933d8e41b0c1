//! Projection of pause intervals into background bands for one day column.
//!
//! Everything here is pure: the same intervals and window always produce the
//! same rectangles, and nothing is cached between calls. Rectangles are in
//! column-local coordinates (`x = 0` is the column's left edge, `y = 0` the
//! top of the first visible hour); the painter translates them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use egui::{pos2, Color32, Rect};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::TimeInterval;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// The slice of a day being drawn into one column surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub pixels_per_minute: f32,
    pub pixel_width: f32,
    pub pixel_height: f32,
    pub column_date: NaiveDate,
}

impl VisibleWindow {
    /// A full 0–24h window whose height follows from the scale.
    pub fn full_day(column_date: NaiveDate, pixel_width: f32, pixels_per_minute: f32) -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
            pixels_per_minute,
            pixel_width,
            pixel_height: MINUTES_PER_DAY as f32 * pixels_per_minute,
            column_date,
        }
    }

    /// Restrict to `start_hour..end_hour`, resizing the surface height to match.
    pub fn with_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self.pixel_height = self.visible_minutes() as f32 * self.pixels_per_minute;
        self
    }

    pub fn visible_minutes(&self) -> i32 {
        (self.end_hour as i32 - self.start_hour as i32) * 60
    }

    /// Check the preconditions [`project`] relies on.
    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 24 {
            return Err(Error::InvalidWindow(format!(
                "end hour {} is past the end of the day",
                self.end_hour
            )));
        }
        if self.end_hour <= self.start_hour {
            return Err(Error::InvalidWindow(format!(
                "end hour {} must be after start hour {}",
                self.end_hour, self.start_hour
            )));
        }
        if !(self.pixels_per_minute.is_finite() && self.pixels_per_minute > 0.0) {
            return Err(Error::InvalidWindow(format!(
                "pixels per minute must be positive, got {}",
                self.pixels_per_minute
            )));
        }
        Ok(())
    }
}

/// Fill used when painting bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStyle {
    pub fill: Color32,
    pub rounding: f32,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            fill: Color32::from_rgba_unmultiplied(120, 120, 140, 60),
            rounding: 0.0,
        }
    }
}

/// The fields of an interval that affect its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalKey {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl From<&TimeInterval> for IntervalKey {
    fn from(iv: &TimeInterval) -> Self {
        Self {
            id: iv.id,
            date: iv.date,
            start: iv.start,
            end: iv.end,
        }
    }
}

/// Why an interval produced no band on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingInstant,
    OtherDay,
    Degenerate,
    OutsideWindow,
    ClippedAway,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Painted(Rect),
    Skipped(SkipReason),
}

/// One projection decision, reported to a [`DiagnosticSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEvent {
    pub column_date: NaiveDate,
    pub interval_id: Uuid,
    pub outcome: Outcome,
}

/// Receives a [`ProjectionEvent`] for every pause interval considered.
pub trait DiagnosticSink {
    fn record(&self, event: &ProjectionEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: &ProjectionEvent) {}
}

/// Emits each decision as a `trace`-level event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &ProjectionEvent) {
        match event.outcome {
            Outcome::Painted(rect) => tracing::trace!(
                column = %event.column_date,
                interval = %event.interval_id,
                top = rect.top(),
                bottom = rect.bottom(),
                "pause band painted"
            ),
            Outcome::Skipped(reason) => tracing::trace!(
                column = %event.column_date,
                interval = %event.interval_id,
                ?reason,
                "pause band skipped"
            ),
        }
    }
}

/// Project the pause intervals of `intervals` onto `window`.
pub fn project(intervals: &[TimeInterval], window: &VisibleWindow) -> Vec<Rect> {
    project_with(intervals, window, &NullSink)
}

/// [`project`], reporting every decision to `sink`.
pub fn project_with(
    intervals: &[TimeInterval],
    window: &VisibleWindow,
    sink: &dyn DiagnosticSink,
) -> Vec<Rect> {
    let keys: Vec<IntervalKey> = intervals
        .iter()
        .filter(|iv| iv.is_pause())
        .map(IntervalKey::from)
        .collect();
    project_keys(&keys, window, sink)
}

fn project_keys(
    keys: &[IntervalKey],
    window: &VisibleWindow,
    sink: &dyn DiagnosticSink,
) -> Vec<Rect> {
    if keys.is_empty() {
        return Vec::new();
    }
    keys.iter()
        .filter_map(|key| {
            let outcome = match project_one(key, window) {
                Ok(rect) => Outcome::Painted(rect),
                Err(reason) => Outcome::Skipped(reason),
            };
            sink.record(&ProjectionEvent {
                column_date: window.column_date,
                interval_id: key.id,
                outcome,
            });
            match outcome {
                Outcome::Painted(rect) => Some(rect),
                Outcome::Skipped(_) => None,
            }
        })
        .collect()
}

fn project_one(key: &IntervalKey, window: &VisibleWindow) -> std::result::Result<Rect, SkipReason> {
    let (start, end) = match (key.start, key.end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(SkipReason::MissingInstant),
    };
    let (from, to) = day_minutes(key.date, start, end, window.column_date)?;

    let offset = window.start_hour as i32 * 60;
    let span = window.visible_minutes();
    let shifted_start = from - offset;
    let shifted_end = to - offset;
    if shifted_end <= 0 || shifted_start >= span {
        return Err(SkipReason::OutsideWindow);
    }

    let ppm = window.pixels_per_minute;
    let top = (shifted_start as f32 * ppm).max(0.0);
    let bottom = (shifted_end as f32 * ppm).min(window.pixel_height);
    if bottom - top <= 0.0 {
        return Err(SkipReason::ClippedAway);
    }
    Ok(Rect::from_min_max(pos2(0.0, top), pos2(window.pixel_width, bottom)))
}

/// Minutes-since-midnight range an interval occupies on `column`.
///
/// Single-day intervals only match their anchor date exactly; multi-day
/// intervals cover the tail of their first day, every day in between, and
/// the head of their last day. Emptiness is judged on the normalized
/// minutes, so a 23:59–23:59 record still covers the last minute.
pub fn day_minutes(
    date: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
    column: NaiveDate,
) -> std::result::Result<(i32, i32), SkipReason> {
    let (from, to) = if start.date() == end.date() {
        if date != column {
            return Err(SkipReason::OtherDay);
        }
        (minute_of_day(start.time()), end_minute_of_day(end.time()))
    } else if end < start {
        return Err(SkipReason::Degenerate);
    } else if column == start.date() {
        (minute_of_day(start.time()), MINUTES_PER_DAY)
    } else if column == end.date() {
        (0, end_minute_of_day(end.time()))
    } else if start.date() < column && column < end.date() {
        (0, MINUTES_PER_DAY)
    } else {
        return Err(SkipReason::OtherDay);
    };

    let from = from.clamp(0, MINUTES_PER_DAY);
    let to = to.clamp(0, MINUTES_PER_DAY);
    if to <= from {
        return Err(SkipReason::Degenerate);
    }
    Ok((from, to))
}

pub fn minute_of_day(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

/// Like [`minute_of_day`], but 23:59 reaches the bottom of the day.
pub fn end_minute_of_day(time: NaiveTime) -> i32 {
    if time.hour() == 23 && time.minute() == 59 {
        MINUTES_PER_DAY
    } else {
        minute_of_day(time)
    }
}

/// Structural snapshot of everything that determines a column's bands.
///
/// Two layers compare equal exactly when projecting them would give the same
/// rectangles painted the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayer {
    pub window: VisibleWindow,
    pub style: BandStyle,
    pub keys: Vec<IntervalKey>,
}

impl BandLayer {
    pub fn new(intervals: &[TimeInterval], window: VisibleWindow, style: BandStyle) -> Self {
        Self {
            window,
            style,
            keys: intervals
                .iter()
                .filter(|iv| iv.is_pause())
                .map(IntervalKey::from)
                .collect(),
        }
    }

    pub fn needs_repaint(&self, previous: &BandLayer) -> bool {
        self != previous
    }

    pub fn rects(&self) -> Vec<Rect> {
        project_keys(&self.keys, &self.window, &TracingSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<ProjectionEvent>>);

    impl DiagnosticSink for Recorder {
        fn record(&self, event: &ProjectionEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    #[test]
    fn end_of_day_minute_normalizes_to_1440() {
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(minute_of_day(t), 1439);
        assert_eq!(end_minute_of_day(t), MINUTES_PER_DAY);
    }

    #[test]
    fn reversed_instants_are_degenerate() {
        assert_eq!(
            day_minutes(day(3), at(3, 10, 0), at(3, 9, 0), day(3)),
            Err(SkipReason::Degenerate)
        );
        assert_eq!(
            day_minutes(day(3), at(5, 10, 0), at(3, 9, 0), day(4)),
            Err(SkipReason::Degenerate)
        );
    }

    #[test]
    fn multi_day_ending_at_midnight_skips_the_last_day() {
        assert_eq!(
            day_minutes(day(3), at(3, 22, 0), at(4, 0, 0), day(4)),
            Err(SkipReason::Degenerate)
        );
    }

    #[test]
    fn sink_sees_every_pause_interval_but_no_events() {
        let window = VisibleWindow::full_day(day(3), 100.0, 1.0).with_hours(9, 17);
        let intervals = vec![
            TimeInterval::new_pause("inside", at(3, 10, 0), at(3, 11, 0)),
            TimeInterval::new_pause("early", at(3, 6, 0), at(3, 7, 0)),
            TimeInterval::new_event("meeting", at(3, 10, 0), at(3, 11, 0)),
        ];
        let sink = Recorder::default();
        let rects = project_with(&intervals, &window, &sink);

        assert_eq!(rects.len(), 1);
        let events = sink.0.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].interval_id, intervals[0].id);
        assert!(matches!(events[0].outcome, Outcome::Painted(_)));
        assert_eq!(events[1].outcome, Outcome::Skipped(SkipReason::OutsideWindow));
        assert!(events.iter().all(|e| e.column_date == day(3)));
    }

    #[test]
    fn end_of_day_record_covers_the_last_minute() {
        assert_eq!(
            day_minutes(day(3), at(3, 23, 59), at(3, 23, 59), day(3)),
            Ok((1439, MINUTES_PER_DAY))
        );
        let window = VisibleWindow::full_day(day(3), 40.0, 1.0);
        let iv = TimeInterval::new_pause("eod", at(3, 23, 59), at(3, 23, 59));
        let rects = project(&[iv], &window);
        assert_eq!(rects.len(), 1);
        assert_eq!((rects[0].top(), rects[0].bottom()), (1439.0, 1440.0));
    }

    #[test]
    fn taller_surface_lets_band_run_past_window_end() {
        let mut window = VisibleWindow::full_day(day(3), 50.0, 1.0).with_hours(9, 17);
        window.pixel_height = 2000.0;
        let iv = TimeInterval::new_pause("evening", at(3, 16, 0), at(3, 20, 0));
        let rects = project(&[iv], &window);
        assert_eq!(rects[0].top(), 420.0);
        assert_eq!(rects[0].bottom(), 660.0);
    }

    #[test]
    fn short_surface_clips_band_bottom() {
        let mut window = VisibleWindow::full_day(day(3), 50.0, 1.0).with_hours(9, 17);
        window.pixel_height = 300.0;
        let iv = TimeInterval::new_pause("afternoon", at(3, 13, 0), at(3, 16, 0));
        let rects = project(&[iv], &window);
        assert_eq!(rects[0].top(), 240.0);
        assert_eq!(rects[0].bottom(), 300.0);

        let below = TimeInterval::new_pause("late", at(3, 15, 0), at(3, 16, 0));
        let sink = Recorder::default();
        assert!(project_with(&[below], &window, &sink).is_empty());
        assert_eq!(
            sink.0.borrow()[0].outcome,
            Outcome::Skipped(SkipReason::ClippedAway)
        );
    }

    #[test]
    fn validate_rejects_bad_windows() {
        let ok = VisibleWindow::full_day(day(1), 10.0, 1.0);
        assert!(ok.validate().is_ok());
        assert!(ok.with_hours(10, 10).validate().is_err());
        assert!(ok.with_hours(0, 25).validate().is_err());
        let mut flat = ok;
        flat.pixels_per_minute = 0.0;
        assert!(flat.validate().is_err());
    }

    #[test]
    fn band_layer_ignores_non_band_fields() {
        let window = VisibleWindow::full_day(day(2), 80.0, 1.0);
        let mut pause = TimeInterval::new_pause("Break", at(2, 12, 0), at(2, 13, 0));
        let base = BandLayer::new(std::slice::from_ref(&pause), window, BandStyle::default());

        pause.title = "Renamed".into();
        let renamed = BandLayer::new(std::slice::from_ref(&pause), window, BandStyle::default());
        assert!(!renamed.needs_repaint(&base));

        pause.end = Some(at(2, 14, 0));
        let moved = BandLayer::new(std::slice::from_ref(&pause), window, BandStyle::default());
        assert!(moved.needs_repaint(&base));
    }

    #[test]
    fn band_layer_detects_style_and_scale_changes() {
        let window = VisibleWindow::full_day(day(2), 80.0, 1.0);
        let pauses = [TimeInterval::new_pause("Break", at(2, 12, 0), at(2, 13, 0))];
        let base = BandLayer::new(&pauses, window, BandStyle::default());

        let restyled = BandLayer::new(
            &pauses,
            window,
            BandStyle { fill: Color32::RED, rounding: 0.0 },
        );
        assert!(restyled.needs_repaint(&base));

        let zoomed = BandLayer::new(
            &pauses,
            VisibleWindow::full_day(day(2), 80.0, 2.0),
            BandStyle::default(),
        );
        assert!(zoomed.needs_repaint(&base));
    }
}
