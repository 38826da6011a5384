//! Show command: list records over a range of days.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use tg_core::{ShowRange, filter_visible, readable_duration, total_time};

use crate::clock::Now;
use crate::error::InputError;
use crate::render::format_records;
use crate::store::RecordStore;

const HEADER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs the show command.
pub fn run<W: Write>(
    writer: &mut W,
    store: &impl RecordStore,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    days: Option<u32>,
    now: Now,
) -> Result<()> {
    let range = ShowRange::resolve(start, end, days, now.local());
    if range.start > range.end {
        return Err(InputError::InvertedRange {
            start: range.start,
            end: range.end,
        }
        .into());
    }

    let window = range.window();
    let records = filter_visible(store.records_in(window)?);
    let total = total_time(&records, window, now.timestamp());

    writeln!(writer, "Start:       {}", range.start.format(HEADER_FORMAT))?;
    writeln!(writer, "End:         {}", range.end.format(HEADER_FORMAT))?;
    writeln!(writer, "Time Period: {} days", range.days())?;
    writeln!(writer, "Total Hours: {}", readable_duration(total))?;
    writeln!(writer)?;
    writeln!(writer, "Records:")?;
    write!(writer, "{}", format_records(&records, now.timestamp()))?;
    Ok(())
}
