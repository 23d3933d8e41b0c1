//! Calendar week view with pause-band overlays.
//!
//! The core is [`layout::project`], which maps pause intervals onto the
//! rectangles a day column should shade. The rest is the egui front end
//! around it.

pub mod app;
pub mod error;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod settings;
pub mod ui;

pub use error::{Error, Result};
pub use layout::{project, project_with, BandLayer, BandStyle, VisibleWindow};
pub use model::{Calendar, IntervalKind, TimeInterval};
