#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use week_calendar::app::WeekCalendarApp;

fn main() -> eframe::Result<()> {
    if let Err(e) = week_calendar::logging::init_tracing(1) {
        eprintln!("{e}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Rust Week Calendar"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Week Calendar",
        options,
        Box::new(|cc| Ok(Box::new(WeekCalendarApp::new(cc)))),
    )
}
