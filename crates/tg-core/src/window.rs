//! Half-open time windows in local calendar terms.

use chrono::{Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// How far back the running-timer probe looks.
const RUNNING_PROBE_LOOKBACK_SECS: i64 = 35 * 60;
/// How far ahead the running-timer probe looks.
const RUNNING_PROBE_LOOKAHEAD_SECS: i64 = 60;
/// Days of history offered for resuming.
const RESUME_LOOKBACK_DAYS: i64 = 7;

/// A half-open interval `[start, end)` in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Renders the window as the server's `timerange` query value.
    pub fn as_timerange(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Converts a local wall-clock time to epoch seconds.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// DST gap are moved forward by an hour, which lands on a valid instant.
pub fn local_timestamp(local: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp(),
        LocalResult::None => {
            let shifted = local + Duration::hours(1);
            Local
                .from_local_datetime(&shifted)
                .earliest()
                .map_or_else(|| shifted.and_utc().timestamp(), |dt| dt.timestamp())
        }
    }
}

/// Epoch seconds of local midnight at the start of `date`.
pub fn local_midnight(date: NaiveDate) -> i64 {
    local_timestamp(date.and_time(NaiveTime::MIN))
}

/// Today 00:00 through tomorrow 00:00, local time.
pub fn day_window(today: NaiveDate) -> TimeWindow {
    let tomorrow = today + Duration::days(1);
    TimeWindow::new(local_midnight(today), local_midnight(tomorrow))
}

/// Monday 00:00 through the following Monday 00:00, local time.
pub fn week_window(today: NaiveDate) -> TimeWindow {
    let days_since_monday = today.weekday().num_days_from_monday();
    let monday = today - Duration::days(i64::from(days_since_monday));
    let next_monday = monday + Duration::days(7);
    TimeWindow::new(local_midnight(monday), local_midnight(next_monday))
}

/// The window used to find running timers around `now`.
pub const fn running_probe_window(now: i64) -> TimeWindow {
    TimeWindow::new(
        now - RUNNING_PROBE_LOOKBACK_SECS,
        now + RUNNING_PROBE_LOOKAHEAD_SECS,
    )
}

/// The last week of records through the end of today.
pub fn resume_window(today: NaiveDate) -> TimeWindow {
    let first = today - Duration::days(RESUME_LOOKBACK_DAYS);
    let tomorrow = today + Duration::days(1);
    TimeWindow::new(local_midnight(first), local_midnight(tomorrow))
}

/// Resolved bounds for listing records over a span of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShowRange {
    /// Resolves optional start/end dates and a day count against `now`.
    ///
    /// An explicit end covers that whole day. Without an end the range stops
    /// at `now`, or `days` after an explicit start. Without a start the range
    /// begins at midnight `days - 1` days before the end.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        days: Option<u32>,
        now: NaiveDateTime,
    ) -> Self {
        let span = i64::from(days.unwrap_or(1).max(1)) - 1;
        let mut range_end = end.map_or(now, end_of_day);

        let range_start = match start {
            Some(date) => {
                if end.is_none() && days.is_some() {
                    range_end = end_of_day(date + Duration::days(span));
                }
                date.and_time(NaiveTime::MIN)
            }
            None => (range_end - Duration::days(span)).date().and_time(NaiveTime::MIN),
        };

        Self {
            start: range_start,
            end: range_end,
        }
    }

    /// Number of calendar days the range touches.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The range as epoch seconds.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(local_timestamp(self.start), local_timestamp(self.end))
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
