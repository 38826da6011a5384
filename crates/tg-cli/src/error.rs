//! Failures that are reported to the user as a plain message.

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;
use tg_client::ClientError;
use tg_core::SelectionError;

use crate::config::ConfigError;

/// Invalid command input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// A time of day did not parse.
    #[error("invalid time {value:?}, expected HH:MM or HH:MM:SS")]
    InvalidTime { value: String },
    /// A record would end before it starts.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: NaiveTime, end: NaiveTime },
    /// A listing range that ends before it starts.
    #[error("start {start} is after end {end}")]
    InvertedRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Whether `err` is an expected failure (bad config, a refused request,
/// invalid input) rather than a bug.
pub fn is_expected(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<ConfigError>()
            || cause.is::<ClientError>()
            || cause.is::<SelectionError>()
            || cause.is::<InputError>()
    })
}
