use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::TimeInterval;

/// A calendar document: a named, ordered collection of intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub name: String,
    pub intervals: Vec<TimeInterval>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            name: "Untitled Calendar".to_string(),
            intervals: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Calendar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn add(&mut self, interval: TimeInterval) {
        self.intervals.push(interval);
        self.touch();
    }

    /// Remove an interval by id. Returns `true` if something was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|iv| iv.id != id);
        let removed = self.intervals.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn find(&self, id: Uuid) -> Option<&TimeInterval> {
        self.intervals.iter().find(|iv| iv.id == id)
    }

    /// Pause intervals in document order.
    pub fn pause_intervals(&self) -> impl Iterator<Item = &TimeInterval> + '_ {
        self.intervals.iter().filter(|iv| iv.is_pause())
    }

    /// Paintable non-pause intervals touching `date`, ordered by start.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&TimeInterval> {
        let mut events: Vec<&TimeInterval> = self
            .intervals
            .iter()
            .filter(|iv| !iv.is_pause() && iv.is_paintable() && iv.covers(date))
            .collect();
        events.sort_by_key(|iv| iv.start);
        events
    }
}
