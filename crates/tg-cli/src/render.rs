//! Terminal rendering of record tables.

use std::fmt::Write;

use tg_core::{Record, readable_duration, readable_time};

/// Formats records as a table sorted by start time.
///
/// Running records show `-` as their stop time and count up to `now`. The
/// stop column omits the date when it matches the start date.
pub fn format_records(records: &[Record], now: f64) -> String {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.t1.total_cmp(&b.t1));

    let mut output = String::new();
    writeln!(
        output,
        "{:>17} {:>17} {:>9}  Description",
        "Started", "Stopped", "Duration"
    )
    .unwrap();

    for record in &sorted {
        let started = readable_time(record.t1);
        let (stopped, duration) = if record.is_running() {
            ("-".to_string(), readable_duration(now - record.t1))
        } else {
            let stopped = readable_time(record.t2);
            let stopped = match (started.split_once(' '), stopped.split_once(' ')) {
                (Some((start_day, _)), Some((stop_day, stop_clock))) if start_day == stop_day => {
                    stop_clock.to_string()
                }
                _ => stopped,
            };
            (stopped, readable_duration(record.t2 - record.t1))
        };
        writeln!(
            output,
            "{started:>17} {stopped:>17} {duration:>9}  {}",
            record.ds
        )
        .unwrap();
    }

    output
}
