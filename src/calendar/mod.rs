//! Season and holiday calendars.
//!
//! Tables are plain values built once at startup and shared read-only, so
//! tests and alternate deployments can inject their own.

pub mod colombia;
pub mod holidays;
pub mod seasons;

use chrono::NaiveDate;

pub use holidays::{HolidayCalendar, HolidayEntry};
pub use seasons::{ClassificationSource, DayClassification, SeasonKind, SeasonRange, SeasonTable};

/// Errors raised while building a calendar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Season range ends ({end}) before it starts ({start})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Season table plus holiday calendar.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    pub seasons: SeasonTable,
    pub holidays: HolidayCalendar,
}

impl Calendar {
    pub fn new(seasons: SeasonTable, holidays: HolidayCalendar) -> Self {
        Self { seasons, holidays }
    }

    /// The built-in Colombian calendar.
    pub fn colombia() -> Result<Self, CalendarError> {
        Ok(Self {
            seasons: colombia::seasons()?,
            holidays: colombia::holidays()?,
        })
    }

    pub fn classify_day(&self, date: NaiveDate) -> DayClassification {
        self.seasons.classify_day(date)
    }
}
