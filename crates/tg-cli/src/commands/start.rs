//! Start command: begin a new timer, stopping any others.

use std::io::Write;

use anyhow::Result;
use tg_core::Record;

use super::running_records;
use crate::clock::Now;
use crate::render::format_records;
use crate::store::RecordStore;

/// Runs the start command.
pub fn run<W: Write>(
    writer: &mut W,
    store: &impl RecordStore,
    description: &str,
    now: Now,
) -> Result<()> {
    start_timer(writer, store, description, now)
}

/// Stops running timers and starts one for `description`.
///
/// Nothing is submitted when a timer with the same description is already
/// running.
pub(crate) fn start_timer<W: Write>(
    writer: &mut W,
    store: &impl RecordStore,
    description: &str,
    now: Now,
) -> Result<()> {
    let mut records = running_records(store, now)?;

    if let Some(existing) = records.iter().find(|r| r.ds == description) {
        writeln!(writer, "Timer with this description is already running.")?;
        writeln!(writer)?;
        write!(writer, "{}", format_records(std::slice::from_ref(existing), now.timestamp()))?;
        return Ok(());
    }

    let stopped = records.len();
    for record in &mut records {
        record.stop(now.timestamp(), now.precise());
    }
    records.push(Record::start(description, now.timestamp(), now.precise()));
    store.put(&records)?;

    if stopped == 0 {
        writeln!(writer, "Timer started ...")?;
    } else {
        writeln!(writer, "Timer started ... and stopped {stopped} running records.")?;
    }
    writeln!(writer)?;
    write!(writer, "{}", format_records(&records, now.timestamp()))?;
    Ok(())
}
