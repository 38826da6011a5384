//! Core time accounting for the TimeTagger CLI.
//!
//! This crate contains the record model and the pure computations over
//! record snapshots:
//! - Formatting: readable clock times and `H:MM` durations
//! - Windows: local day/week boundaries and listing ranges
//! - Overlap: tracked seconds of records within a window
//! - Classification: hidden, running and in-range records
//! - Diagnostics: detecting and repairing malformed records
//! - Resume: ranking recent descriptions for re-selection

pub mod classify;
pub mod diagnose;
pub mod format;
pub mod overlap;
pub mod record;
pub mod resume;
pub mod window;

pub use classify::{filter_unmarked, filter_visible, partition_running, records_in_range};
pub use diagnose::{Diagnosis, Diagnostics, Finding, FindingKind, Severity};
pub use format::{readable_datetime, readable_duration, readable_time};
pub use overlap::total_time;
pub use record::{HIDDEN_MARKER, Record, RecordError, RecordKey};
pub use resume::{ResumeCandidates, SelectionError};
pub use window::{ShowRange, TimeWindow};
