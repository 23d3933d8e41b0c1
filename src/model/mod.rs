pub mod calendar;
pub mod hex_color;
pub mod interval;
pub mod viewport;

pub use calendar::Calendar;
pub use interval::{IntervalKind, TimeInterval};
pub use viewport::{ViewMode, WeekViewport};
