//! Access to the remote record store.
//!
//! Commands talk to a [`RecordStore`] so they can be exercised without a
//! server. [`RemoteStore`] is the real implementation over HTTP.

use anyhow::{Context, Result};
use tg_client::Client;
use tg_core::{Record, TimeWindow};
use tokio::runtime::Runtime;

use crate::Config;

/// Snapshot reads and upserts against the system of record.
pub trait RecordStore {
    /// Records overlapping `window`.
    fn records_in(&self, window: TimeWindow) -> Result<Vec<Record>>;

    /// Every record, regardless of time.
    fn all_records(&self) -> Result<Vec<Record>>;

    /// Creates or updates `records` by key.
    fn put(&self, records: &[Record]) -> Result<()>;
}

/// The TimeTagger server, driven one request at a time.
#[derive(Debug)]
pub struct RemoteStore {
    client: Client,
    runtime: Runtime,
}

impl RemoteStore {
    /// Builds the HTTP client from `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        let client = Client::new(&config.api_url, &config.api_token, &config.ssl_verify)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to initialize tokio runtime")?;
        Ok(Self { client, runtime })
    }
}

impl RecordStore for RemoteStore {
    fn records_in(&self, window: TimeWindow) -> Result<Vec<Record>> {
        let records = self
            .runtime
            .block_on(self.client.get_records(window))
            .context("failed to fetch records")?;
        Ok(records)
    }

    fn all_records(&self) -> Result<Vec<Record>> {
        let records = self
            .runtime
            .block_on(self.client.get_updates(0))
            .context("failed to fetch all records")?;
        Ok(records)
    }

    fn put(&self, records: &[Record]) -> Result<()> {
        let outcome = self
            .runtime
            .block_on(self.client.put_records(records))
            .context("failed to submit records")?;
        tracing::debug!(accepted = outcome.accepted.len(), "records submitted");
        Ok(())
    }
}
