use std::path::Path;

use crate::error::Result;
use crate::model::Calendar;

/// Save a calendar to a JSON file.
pub fn save_calendar(calendar: &Calendar, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(calendar)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), intervals = calendar.intervals.len(), "calendar saved");
    Ok(())
}

/// Load a calendar from a JSON file.
pub fn load_calendar(path: &Path) -> Result<Calendar> {
    let json = std::fs::read_to_string(path)?;
    let calendar: Calendar = serde_json::from_str(&json)?;
    tracing::info!(path = %path.display(), intervals = calendar.intervals.len(), "calendar loaded");
    Ok(calendar)
}
