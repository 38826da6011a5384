//! Stop command: end every running timer.

use std::io::Write;

use anyhow::Result;

use super::running_records;
use crate::clock::Now;
use crate::render::format_records;
use crate::store::RecordStore;

/// Runs the stop command.
pub fn run<W: Write>(writer: &mut W, store: &impl RecordStore, now: Now) -> Result<()> {
    let mut records = running_records(store, now)?;
    if records.is_empty() {
        writeln!(writer, "No running records.")?;
        return Ok(());
    }

    for record in &mut records {
        record.stop(now.timestamp(), now.precise());
    }
    writeln!(writer, "Stopping running records.")?;
    store.put(&records)?;
    writeln!(writer)?;
    write!(writer, "{}", format_records(&records, now.timestamp()))?;
    Ok(())
}
