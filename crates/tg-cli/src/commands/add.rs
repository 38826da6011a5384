//! Add command: record an already finished activity.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use tg_core::Record;
use tg_core::window::local_timestamp;

use crate::clock::Now;
use crate::error::InputError;
use crate::render::format_records;
use crate::store::RecordStore;

/// Runs the add command.
#[allow(clippy::cast_precision_loss)]
pub fn run<W: Write>(
    writer: &mut W,
    store: &impl RecordStore,
    date: Option<NaiveDate>,
    start: &str,
    end: &str,
    description: &str,
    now: Now,
) -> Result<()> {
    let date = date.unwrap_or_else(|| now.today());
    let start = parse_clock_time(start)?;
    let end = parse_clock_time(end)?;
    if end < start {
        return Err(InputError::EndBeforeStart { start, end }.into());
    }

    let t1 = local_timestamp(date.and_time(start)) as f64;
    let t2 = local_timestamp(date.and_time(end)) as f64;
    let record = Record::finished(t1, t2, description, now.precise());
    store.put(std::slice::from_ref(&record))?;

    writeln!(writer, "Record added.")?;
    writeln!(writer)?;
    write!(writer, "{}", format_records(&[record], now.timestamp()))?;
    Ok(())
}

/// Parses `HH:MM` or `HH:MM:SS`.
fn parse_clock_time(value: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| InputError::InvalidTime {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::commands::testing::{output, wednesday_afternoon};
    use crate::error::is_expected;
    use crate::store::memory::MemoryStore;

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_clock_time("09:30"), Ok(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert_eq!(
            parse_clock_time("23:05:59"),
            Ok(NaiveTime::from_hms_opt(23, 5, 59).unwrap())
        );
        assert!(parse_clock_time("9am").is_err());
        assert!(parse_clock_time("25:00").is_err());
    }

    #[test]
    fn adds_record_on_given_date() {
        let store = MemoryStore::default();
        let mut buf = Vec::new();
        run(
            &mut buf,
            &store,
            NaiveDate::from_ymd_opt(2025, 3, 10),
            "09:00",
            "10:30",
            "#meeting",
            wednesday_afternoon(),
        )
        .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert!((records[0].t2 - records[0].t1 - 5400.0).abs() < f64::EPSILON);
        assert!(!records[0].is_running());

        let text = output(buf);
        assert!(text.contains("2025-03-10 09:00"), "{text}");
        assert!(text.contains("1:30"), "{text}");
        assert!(text.contains("#meeting"));
    }

    #[test]
    fn defaults_to_today() {
        let store = MemoryStore::default();
        let mut buf = Vec::new();
        run(&mut buf, &store, None, "08:00", "08:45", "email", wednesday_afternoon()).unwrap();
        assert!(output(buf).contains("2025-03-12 08:00"));
    }

    #[test]
    fn rejects_end_before_start() {
        let store = MemoryStore::default();
        let mut buf = Vec::new();
        let err = run(&mut buf, &store, None, "10:00", "09:00", "x", wednesday_afternoon())
            .unwrap_err();
        assert!(is_expected(&err));
        assert!(store.puts().is_empty());
    }

    #[test]
    fn rejects_malformed_time() {
        let store = MemoryStore::default();
        let mut buf = Vec::new();
        let err = run(&mut buf, &store, None, "noon", "13:00", "x", wednesday_afternoon())
            .unwrap_err();
        assert!(err.to_string().contains("noon"));
        assert!(store.puts().is_empty());
    }
}
