//! Filtering and partitioning record snapshots.

use crate::record::Record;
use crate::window::TimeWindow;

/// Drops records whose description starts with the hidden marker.
pub fn filter_visible(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(|r| !r.is_hidden()).collect()
}

/// Drops records whose description contains the hidden marker anywhere.
///
/// Stricter than [`filter_visible`]; used where descriptions are offered
/// back to the user for reuse.
pub fn filter_unmarked(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(|r| !r.mentions_hidden()).collect()
}

/// Splits records into running timers and everything else.
pub fn partition_running(records: Vec<Record>) -> (Vec<Record>, Vec<Record>) {
    records.into_iter().partition(Record::is_running)
}

/// Keeps records that overlap `window`. Running records only need to start
/// before the window ends.
#[allow(clippy::cast_precision_loss)]
pub fn records_in_range(records: &[Record], window: TimeWindow) -> Vec<Record> {
    let start = window.start as f64;
    let end = window.end as f64;
    records
        .iter()
        .filter(|r| r.t1 < end && (r.is_running() || r.t2 > start))
        .cloned()
        .collect()
}
