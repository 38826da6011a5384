//! Diagnose command: detect, and optionally repair, malformed records.

use std::io::Write;

use anyhow::Result;
use tg_core::{Diagnostics, Finding, readable_datetime};

use crate::clock::Now;
use crate::store::RecordStore;

/// Runs the diagnose command.
///
/// With `fix`, each errored record is repaired and submitted on its own.
pub fn run<W: Write>(writer: &mut W, store: &impl RecordStore, fix: bool, now: Now) -> Result<()> {
    let diagnosis = Diagnostics::new(now.timestamp()).run(store.all_records()?);

    writeln!(writer, "Checked {} records", diagnosis.checked)?;
    if !diagnosis.wrong.is_empty() {
        writeln!(writer, "Errored records:")?;
        for finding in &diagnosis.wrong {
            write_finding(writer, finding)?;
        }
    }
    if !diagnosis.suspicious.is_empty() {
        writeln!(writer, "Suspicious records:")?;
        for finding in &diagnosis.suspicious {
            write_finding(writer, finding)?;
        }
    }
    if diagnosis.is_clean() {
        writeln!(writer, "All looks good")?;
    }

    if fix {
        for finding in &diagnosis.wrong {
            let repaired = finding.repair(now.timestamp(), now.precise());
            store.put(std::slice::from_ref(&repaired))?;
            writeln!(writer, "Updated {}", repaired.key)?;
        }
        writeln!(writer, "Fixed {} records", diagnosis.wrong.len())?;
    }
    Ok(())
}

fn write_finding<W: Write>(writer: &mut W, finding: &Finding) -> Result<()> {
    writeln!(
        writer,
        "{}: {}, from {} to {}",
        finding.kind,
        finding.record.key,
        readable_datetime(finding.record.t1),
        readable_datetime(finding.record.t2)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tg_core::{Record, RecordKey};

    use crate::commands::testing::{output, wednesday_afternoon};
    use crate::store::memory::MemoryStore;

    fn keyed(key: &str, t1: f64, t2: f64) -> Record {
        Record {
            key: RecordKey::new(key).unwrap(),
            ..Record::finished(t1, t2, "", 0.0)
        }
    }

    #[test]
    fn clean_records_look_good() {
        let now = wednesday_afternoon().timestamp();
        let store = MemoryStore::with_records(vec![
            keyed("a", now - 3600.0, now - 1800.0),
            keyed("b", now - 60.0, now - 60.0),
        ]);
        let mut buf = Vec::new();
        run(&mut buf, &store, false, wednesday_afternoon()).unwrap();
        assert_snapshot!(output(buf), @r"
Checked 2 records
All looks good
");
    }

    #[test]
    fn findings_are_grouped_by_bucket() {
        let now = wednesday_afternoon().timestamp();
        let store = MemoryStore::with_records(vec![
            keyed("swapped", now - 100.0, now - 200.0),
            keyed("long", now - 3.0 * 86_400.0, now),
            keyed("fine", now - 100.0, now),
        ]);
        let mut buf = Vec::new();
        run(&mut buf, &store, false, wednesday_afternoon()).unwrap();

        let text = output(buf);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Checked 3 records");
        assert_eq!(lines[1], "Errored records:");
        assert!(lines[2].starts_with("t1 larger than t2: swapped, from "), "{text}");
        assert_eq!(lines[3], "Suspicious records:");
        assert!(lines[4].starts_with("duration over two days: long, from "), "{text}");
        assert_eq!(lines.len(), 5);
        assert!(store.puts().is_empty());
    }

    #[test]
    fn fix_repairs_each_errored_record_separately() {
        let now = wednesday_afternoon().timestamp();
        let store = MemoryStore::with_records(vec![
            keyed("swapped", now - 100.0, now - 200.0),
            keyed("negative", -50.0, 100.0),
            keyed("long", now - 3.0 * 86_400.0, now),
        ]);
        let mut buf = Vec::new();
        run(&mut buf, &store, true, wednesday_afternoon()).unwrap();

        let text = output(buf);
        assert!(text.contains("Updated swapped"));
        assert!(text.contains("Updated negative"));
        assert!(!text.contains("Updated long"));
        assert!(text.contains("Fixed 2 records"));

        let puts = store.puts();
        assert_eq!(puts.len(), 2);
        assert!(puts.iter().all(|batch| batch.len() == 1));

        let records = store.records();
        let swapped = records.iter().find(|r| r.key.as_str() == "swapped").unwrap();
        assert!((swapped.t1 - (now - 200.0)).abs() < f64::EPSILON);
        assert!((swapped.t2 - (now - 100.0)).abs() < f64::EPSILON);
        let negative = records.iter().find(|r| r.key.as_str() == "negative").unwrap();
        assert!((negative.t1 - now).abs() < f64::EPSILON);
        assert!((negative.t2 - (now + 150.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rejected_fix_stops_before_reporting_updates() {
        let now = wednesday_afternoon().timestamp();
        let store = MemoryStore::rejecting(vec![keyed("swapped", now - 100.0, now - 200.0)]);
        let mut buf = Vec::new();
        assert!(run(&mut buf, &store, true, wednesday_afternoon()).is_err());

        let text = output(buf);
        assert!(text.contains("t1 larger than t2: swapped"));
        assert!(!text.contains("Updated"));
        assert!(!text.contains("Fixed"));
    }
}
