//! Status command: an overview of today and this week.

use std::io::Write;

use anyhow::Result;
use tg_core::window::{day_window, week_window};
use tg_core::{filter_visible, partition_running, readable_duration, records_in_range, total_time};

use crate::clock::Now;
use crate::render::format_records;
use crate::store::RecordStore;

/// Runs the status command.
pub fn run<W: Write>(writer: &mut W, store: &impl RecordStore, now: Now) -> Result<()> {
    let week = week_window(now.today());
    let day = day_window(now.today());

    let week_records = filter_visible(store.records_in(week)?);
    let day_records = records_in_range(&week_records, day);

    let total_week = total_time(&week_records, week, now.timestamp());
    let total_day = total_time(&day_records, day, now.timestamp());
    let (running, _) = partition_running(week_records);

    writeln!(writer)?;
    writeln!(writer, "Hours clocked this week: {}", readable_duration(total_week))?;
    writeln!(writer, "Hours clocked today: {}", readable_duration(total_day))?;
    match running.as_slice() {
        [] => writeln!(writer, "Running: N/A")?,
        [record] => writeln!(
            writer,
            "Running: {} - {}",
            readable_duration(now.timestamp() - record.t1),
            record.ds
        )?,
        records => writeln!(writer, "There are {} running timers.", records.len())?,
    }
    writeln!(writer)?;
    writeln!(writer, "Todays records:")?;
    write!(writer, "{}", format_records(&day_records, now.timestamp()))?;
    Ok(())
}
