use chrono::{NaiveDate, NaiveDateTime};
use egui::Rect;
use week_calendar::layout::{project, VisibleWindow};
use week_calendar::TimeInterval;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).expect("valid date")
}

fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    date(d).and_hms_opt(h, m, 0).expect("valid time")
}

fn window(column: u32, start_hour: u32, end_hour: u32) -> VisibleWindow {
    VisibleWindow::full_day(date(column), 120.0, 1.0).with_hours(start_hour, end_hour)
}

fn span(rect: &Rect) -> (f32, f32) {
    (rect.top(), rect.bottom())
}

#[test]
fn empty_input_projects_nothing() {
    assert!(project(&[], &window(1, 0, 24)).is_empty());
}

#[test]
fn missing_instants_never_paint() {
    let mut no_start = TimeInterval::new_pause("a", at(1, 9, 0), at(1, 10, 0));
    no_start.start = None;
    let mut no_end = TimeInterval::new_pause("b", at(1, 9, 0), at(1, 10, 0));
    no_end.end = None;
    assert!(project(&[no_start, no_end], &window(1, 0, 24)).is_empty());
}

#[test]
fn single_day_interval_paints_only_on_its_date() {
    let pause = TimeInterval::new_pause("Lunch", at(2, 12, 0), at(2, 13, 0));
    let rects = project(std::slice::from_ref(&pause), &window(2, 0, 24));
    assert_eq!(rects.len(), 1);
    assert_eq!(span(&rects[0]), (720.0, 780.0));
    assert_eq!(rects[0].left(), 0.0);
    assert_eq!(rects[0].width(), 120.0);

    assert!(project(std::slice::from_ref(&pause), &window(1, 0, 24)).is_empty());
    assert!(project(std::slice::from_ref(&pause), &window(3, 0, 24)).is_empty());
}

#[test]
fn single_day_interval_uses_anchor_date_not_instant_date() {
    let mut pause = TimeInterval::new_pause("Slice", at(2, 12, 0), at(2, 13, 0));
    pause.date = date(5);
    assert!(project(std::slice::from_ref(&pause), &window(2, 0, 24)).is_empty());
    assert_eq!(project(std::slice::from_ref(&pause), &window(5, 0, 24)).len(), 1);
}

#[test]
fn multi_day_interval_covers_head_middle_and_tail() {
    let leave = TimeInterval::new_pause("Leave", at(10, 15, 0), at(12, 10, 30));
    let intervals = [leave];

    let first = project(&intervals, &window(10, 0, 24));
    assert_eq!(span(&first[0]), (900.0, 1440.0));

    let middle = project(&intervals, &window(11, 0, 24));
    assert_eq!(span(&middle[0]), (0.0, 1440.0));

    let last = project(&intervals, &window(12, 0, 24));
    assert_eq!(span(&last[0]), (0.0, 630.0));

    assert!(project(&intervals, &window(9, 0, 24)).is_empty());
    assert!(project(&intervals, &window(13, 0, 24)).is_empty());
}

#[test]
fn end_of_day_reaches_the_bottom() {
    let pause = TimeInterval::new_pause("Evening", at(4, 9, 0), at(4, 23, 59));
    let rects = project(&[pause], &window(4, 0, 24));
    assert_eq!(span(&rects[0]), (540.0, 1440.0));
}

#[test]
fn clipped_at_window_top() {
    let pause = TimeInterval::new_pause("Early", at(4, 8, 0), at(4, 10, 0));
    let rects = project(&[pause], &window(4, 9, 17));
    assert_eq!(span(&rects[0]), (0.0, 60.0));
}

#[test]
fn intervals_outside_the_window_are_skipped() {
    let before = TimeInterval::new_pause("Before", at(4, 6, 0), at(4, 9, 0));
    let after = TimeInterval::new_pause("After", at(4, 17, 0), at(4, 19, 0));
    assert!(project(&[before, after], &window(4, 9, 17)).is_empty());
}

#[test]
fn zero_length_interval_is_dropped() {
    let pause = TimeInterval::new_pause("Blip", at(4, 11, 0), at(4, 11, 0));
    assert!(project(&[pause], &window(4, 0, 24)).is_empty());
}

#[test]
fn events_are_not_projected() {
    let event = TimeInterval::new_event("Meeting", at(4, 11, 0), at(4, 12, 0));
    assert!(project(&[event], &window(4, 0, 24)).is_empty());
}

#[test]
fn overlapping_bands_stay_separate_and_ordered() {
    let a = TimeInterval::new_pause("a", at(4, 13, 0), at(4, 15, 0));
    let b = TimeInterval::new_pause("b", at(4, 10, 0), at(4, 14, 0));
    let rects = project(&[a, b], &window(4, 0, 24));
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].top(), 780.0);
    assert_eq!(rects[1].top(), 600.0);
}

#[test]
fn scale_applies_to_both_edges() {
    let pause = TimeInterval::new_pause("Break", at(4, 10, 0), at(4, 10, 30));
    let win = VisibleWindow::full_day(date(4), 80.0, 2.0).with_hours(9, 12);
    let rects = project(&[pause], &win);
    assert_eq!(span(&rects[0]), (120.0, 180.0));
}

#[test]
fn projection_is_idempotent() {
    let intervals = vec![
        TimeInterval::new_pause("a", at(4, 9, 0), at(4, 10, 0)),
        TimeInterval::new_pause("b", at(3, 20, 0), at(5, 8, 0)),
        TimeInterval::new_event("c", at(4, 9, 0), at(4, 10, 0)),
    ];
    let win = window(4, 7, 19);
    assert_eq!(project(&intervals, &win), project(&intervals, &win));
}
