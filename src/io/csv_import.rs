use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::model::hex_color::parse_hex_color;
use crate::model::{IntervalKind, TimeInterval};
use crate::ui::theme;

/// Map a kind string to an interval kind. Anything unrecognised is a normal event.
fn parse_kind(s: &str) -> IntervalKind {
    match s.trim().to_lowercase().as_str() {
        "pause" | "break" | "blocked" | "busy" | "off" | "unavailable" => IntervalKind::Pause,
        _ => IntervalKind::Event,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Parse a start/end cell.
///
/// `Ok(None)` means the cell is empty (the instant is absent); `Err(())` means
/// it has content that is neither a date-time nor a bare time of day.
fn parse_instant(
    s: &str,
    date: Option<NaiveDate>,
) -> std::result::Result<Option<NaiveDateTime>, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    for fmt in &[
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Some(dt));
        }
    }
    let date = date.ok_or(())?;
    for fmt in &["%H:%M", "%H:%M:%S", "%H.%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok(Some(date.and_time(t)));
        }
    }
    Err(())
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Kind,
    Date,
    Start,
    End,
    Color,
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "title" | "name" | "event" | "label" | "summary" | "subject" => Some(Column::Title),
        "kind" | "type" | "category" => Some(Column::Kind),
        "date" | "day" | "calendardate" => Some(Column::Date),
        "start" | "starttime" | "from" | "begin" | "startdate" => Some(Column::Start),
        "end" | "endtime" | "to" | "until" | "finish" | "enddate" => Some(Column::End),
        "color" | "colour" => Some(Column::Color),
        _ => None,
    }
}

fn cell<'r>(record: &'r csv::StringRecord, col_map: &[Option<Column>], c: Column) -> &'r str {
    col_map
        .iter()
        .position(|m| *m == Some(c))
        .and_then(|idx| record.get(idx))
        .unwrap_or("")
}

/// Import intervals from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches headers loosely.
/// Start/end cells take either a full date-time (for multi-day intervals) or
/// a time of day combined with the row's date. Empty start/end cells are kept
/// as absent instants. Returns `(intervals, skipped_count)`.
pub fn import_csv(path: &Path) -> Result<(Vec<TimeInterval>, usize)> {
    let content = std::fs::read_to_string(path)?;
    import_csv_str(&content)
}

/// [`import_csv`] over in-memory CSV text.
pub fn import_csv_str(content: &str) -> Result<(Vec<TimeInterval>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |c: Column| col_map.contains(&Some(c));
    if !has(Column::Title) || !has(Column::Date) {
        return Err(Error::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut intervals = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let field = |c: Column| cell(&record, &col_map, c);

        let title = field(Column::Title);
        if title.is_empty() {
            skipped += 1;
            continue;
        }

        let date = parse_date(field(Column::Date));
        let (start, end) = match (
            parse_instant(field(Column::Start), date),
            parse_instant(field(Column::End), date),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                tracing::warn!(row, title, "skipping row: unparseable start or end");
                skipped += 1;
                continue;
            }
        };

        let Some(date) = date.or_else(|| start.map(|dt| dt.date())) else {
            tracing::warn!(row, value = field(Column::Date), "skipping row: invalid date");
            skipped += 1;
            continue;
        };

        let kind = parse_kind(field(Column::Kind));
        let color = if kind == IntervalKind::Pause {
            TimeInterval::PAUSE_COLOR
        } else {
            parse_hex_color(field(Column::Color))
                .unwrap_or(theme::EVENT_COLORS[intervals.len() % theme::EVENT_COLORS.len()])
        };

        intervals.push(TimeInterval {
            id: uuid::Uuid::new_v4(),
            title: title.to_string(),
            kind,
            date,
            start,
            end,
            color,
        });
    }

    if intervals.is_empty() {
        return Err(Error::EmptyImport { skipped });
    }

    tracing::info!(imported = intervals.len(), skipped, "CSV import finished");
    Ok((intervals, skipped))
}
