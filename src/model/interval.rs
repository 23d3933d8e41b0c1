use chrono::{NaiveDate, NaiveDateTime};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a calendar interval represents on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    /// A normal event, rendered as a tile.
    #[default]
    Event,
    /// A blocked/paused range, rendered as a background band.
    Pause,
}

/// A single calendar interval: an event tile or a pause band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub id: Uuid,
    pub title: String,
    pub kind: IntervalKind,
    /// Anchor date for single-day intervals; start date for multi-day ones.
    pub date: NaiveDate,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Tile colour. Pauses are always painted with the calendar's band style
    /// and carry [`TimeInterval::PAUSE_COLOR`] here.
    #[serde(with = "super::hex_color")]
    pub color: Color32,
}

impl TimeInterval {
    pub const PAUSE_COLOR: Color32 = Color32::from_rgba_premultiplied(28, 28, 32, 50);

    /// Create a normal event spanning `start..end`, anchored on the start date.
    pub fn new_event(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind: IntervalKind::Event,
            date: start.date(),
            start: Some(start),
            end: Some(end),
            color: Color32::from_rgb(66, 133, 244),
        }
    }

    /// Create a pause interval spanning `start..end`.
    pub fn new_pause(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            kind: IntervalKind::Pause,
            color: Self::PAUSE_COLOR,
            ..Self::new_event(title, start, end)
        }
    }

    pub fn is_pause(&self) -> bool {
        self.kind == IntervalKind::Pause
    }

    /// Both instants are present.
    pub fn is_paintable(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// The interval ends on a different calendar day than it starts.
    pub fn is_multi_day(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start.date() != end.date(),
            _ => false,
        }
    }

    /// First calendar day covered: the start instant's date for multi-day
    /// intervals, the anchor date otherwise.
    pub fn start_date(&self) -> NaiveDate {
        match self.start {
            Some(start) if self.is_multi_day() => start.date(),
            _ => self.date,
        }
    }

    /// Last calendar day covered.
    pub fn end_date(&self) -> NaiveDate {
        match self.end {
            Some(end) if self.is_multi_day() => end.date(),
            _ => self.date,
        }
    }

    /// Whether any part of the interval falls on `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }
}
