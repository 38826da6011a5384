//! CLI subcommand implementations.

pub mod add;
pub mod app;
pub mod diagnose;
pub mod resume;
pub mod setup;
pub mod show;
pub mod start;
pub mod status;
pub mod stop;

use anyhow::Result;
use tg_core::window::running_probe_window;
use tg_core::{Record, partition_running};

use crate::clock::Now;
use crate::store::RecordStore;

/// Fetches the timers that are running right now.
fn running_records(store: &impl RecordStore, now: Now) -> Result<Vec<Record>> {
    let records = store.records_in(running_probe_window(now.secs()))?;
    let (running, _) = partition_running(records);
    tracing::debug!(count = running.len(), "found running records");
    Ok(running)
}
