use std::path::Path;

use crate::error::Result;
use crate::model::{IntervalKind, TimeInterval};

fn kind_label(kind: IntervalKind) -> &'static str {
    match kind {
        IntervalKind::Event => "event",
        IntervalKind::Pause => "pause",
    }
}

/// Export intervals to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Title ; Kind ; Date ; Start ; End
/// Dates are `YYYY-MM-DD`; start/end are `YYYY-MM-DD HH:MM` and left empty when absent.
/// Returns the number of intervals written.
pub fn export_csv(intervals: &[TimeInterval], path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;

    wtr.write_record(["Title", "Kind", "Date", "Start", "End"])?;

    let instant = |v: Option<chrono::NaiveDateTime>| {
        v.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    };

    for iv in intervals {
        let date = iv.date.format("%Y-%m-%d").to_string();
        let start = instant(iv.start);
        let end = instant(iv.end);
        wtr.write_record([
            iv.title.as_str(),
            kind_label(iv.kind),
            date.as_str(),
            start.as_str(),
            end.as_str(),
        ])?;
    }

    wtr.flush()?;
    tracing::info!(path = %path.display(), count = intervals.len(), "intervals exported to CSV");
    Ok(intervals.len())
}
