//! Tracked-time totals over a window.

use crate::record::Record;
use crate::window::TimeWindow;

/// Sums the seconds each record overlaps `window`.
///
/// Running records accrue up to `now`. Records that do not intersect the
/// window contribute nothing, never a negative amount.
#[allow(clippy::cast_precision_loss)]
pub fn total_time(records: &[Record], window: TimeWindow, now: f64) -> f64 {
    let window_start = window.start as f64;
    let window_end = window.end as f64;

    records
        .iter()
        .map(|record| {
            let effective_end = if record.is_running() { now } else { record.t2 };
            (window_end.min(effective_end) - window_start.max(record.t1)).max(0.0)
        })
        .sum()
}
