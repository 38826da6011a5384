//! The instant a command runs at.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// A single reading of the clock, shared by everything one command computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now(DateTime<Local>);

impl Now {
    /// Reads the system clock.
    pub fn current() -> Self {
        Self(Local::now())
    }

    pub const fn at(moment: DateTime<Local>) -> Self {
        Self(moment)
    }

    /// Today's local date.
    pub fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Local wall-clock time.
    pub fn local(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    /// Whole epoch seconds, as stored in record bounds.
    pub fn secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole epoch seconds as a record timestamp.
    #[allow(clippy::cast_precision_loss)]
    pub fn timestamp(&self) -> f64 {
        self.0.timestamp() as f64
    }

    /// Epoch seconds with sub-second precision, for modification times.
    #[allow(clippy::cast_precision_loss)]
    pub fn precise(&self) -> f64 {
        self.0.timestamp_micros() as f64 / 1e6
    }
}
