//! The month window, day-section aggregation, and table rendering that turn
//! API data into what the user sees.

mod months;
pub mod render;
mod sections;

pub use months::{month_window, MonthItem};
pub use sections::{day_sections, DaySection};
