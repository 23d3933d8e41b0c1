use chrono::NaiveDate;
use tempfile::tempdir;
use week_calendar::io::{csv_export, csv_import, load_calendar, save_calendar};
use week_calendar::layout::{project, VisibleWindow};
use week_calendar::{Calendar, Error, IntervalKind, TimeInterval};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).expect("valid date")
}

#[test]
fn calendar_json_roundtrip_keeps_bands() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("work.calendar.json");

    let mut calendar = Calendar::new("Work");
    let start = date(2).and_hms_opt(12, 0, 0).expect("time");
    let end = date(2).and_hms_opt(13, 0, 0).expect("time");
    calendar.add(TimeInterval::new_pause("Lunch", start, end));
    let mut open_ended = TimeInterval::new_event("TBD", start, end);
    open_ended.end = None;
    calendar.add(open_ended);

    save_calendar(&calendar, &path).expect("save");
    let loaded = load_calendar(&path).expect("load");

    assert_eq!(loaded.name, "Work");
    let key = |iv: &TimeInterval| (iv.id, iv.kind, iv.date, iv.start, iv.end, iv.title.clone());
    assert_eq!(
        loaded.intervals.iter().map(key).collect::<Vec<_>>(),
        calendar.intervals.iter().map(key).collect::<Vec<_>>()
    );

    let window = VisibleWindow::full_day(date(2), 100.0, 1.0);
    assert_eq!(project(&loaded.intervals, &window), project(&calendar.intervals, &window));
}

#[test]
fn load_missing_file_is_io_error() {
    let temp = tempdir().expect("tempdir");
    let err = load_calendar(&temp.path().join("nope.json")).expect_err("should fail");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn csv_import_handles_mixed_rows() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("week.csv");
    std::fs::write(
        &path,
        "Title,Type,Date,Start,End\n\
         Lunch,pause,2024-09-02,12:00,13:00\n\
         Standup,,02/09/2024,09:00,09:15\n\
         Unscheduled,event,2024-09-03,,\n\
         Broken,pause,2024-09-03,noon,13:00\n\
         ,pause,2024-09-03,10:00,11:00\n",
    )
    .expect("write csv");

    let (intervals, skipped) = csv_import::import_csv(&path).expect("import");
    assert_eq!(skipped, 2);
    assert_eq!(intervals.len(), 3);
    assert_eq!(intervals[0].kind, IntervalKind::Pause);
    assert_eq!(intervals[1].date, date(2));
    assert!(!intervals[2].is_paintable());
}

#[test]
fn csv_import_with_no_valid_rows_fails() {
    let err = csv_import::import_csv_str("Title;Date\n;2024-09-02\n").expect_err("should fail");
    assert!(matches!(err, Error::EmptyImport { skipped: 1 }));
}

#[test]
fn csv_export_can_be_reimported() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("out.csv");

    let start = date(5).and_hms_opt(16, 0, 0).expect("time");
    let end = date(7).and_hms_opt(9, 0, 0).expect("time");
    let intervals = vec![
        TimeInterval::new_pause("Trip", start, end),
        TimeInterval::new_event("Review", start, date(5).and_hms_opt(17, 0, 0).expect("time")),
    ];

    let written = csv_export::export_csv(&intervals, &path).expect("export");
    assert_eq!(written, 2);

    let (back, skipped) = csv_import::import_csv(&path).expect("reimport");
    assert_eq!(skipped, 0);
    assert_eq!(back.len(), 2);
    assert!(back[0].is_multi_day());
    assert_eq!(back[0].start, Some(start));
    assert_eq!(back[0].end, Some(end));
    assert_eq!(back[1].kind, IntervalKind::Event);
}
