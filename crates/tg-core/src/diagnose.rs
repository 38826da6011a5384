//! Consistency checks over the full record set.
//!
//! Each record is tested against a fixed, ordered list of rules and lands in
//! at most one bucket: `wrong` findings can be repaired automatically,
//! `suspicious` findings are only reported.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::record::Record;
use crate::window::local_midnight;

const DAY_SECS: f64 = 86_400.0;
const FAR_FUTURE_SECS: f64 = 2.0 * 365.0 * DAY_SECS;
const FUTURE_SECS: f64 = DAY_SECS;
const LONG_DURATION_SECS: f64 = 2.0 * DAY_SECS;
const LONG_RUNNING_SECS: f64 = 2.0 * DAY_SECS;
/// Repaired records keep their duration only up to this length.
const MAX_KEPT_DURATION_SECS: f64 = 1.2 * DAY_SECS;
const REPAIR_FALLBACK_DURATION_SECS: f64 = 3600.0;

/// Whether a finding is an error or merely worth a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Wrong,
    Suspicious,
}

/// The rule a record tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    NegativeTimestamp,
    StartAfterEnd,
    FarFuture,
    Early,
    Future,
    LongDuration,
    /// A running timer started about `days` days away from now.
    LongRunning { days: i64 },
}

impl FindingKind {
    pub const fn severity(self) -> Severity {
        match self {
            Self::NegativeTimestamp | Self::StartAfterEnd | Self::FarFuture => Severity::Wrong,
            Self::Early | Self::Future | Self::LongDuration | Self::LongRunning { .. } => {
                Severity::Suspicious
            }
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTimestamp => f.write_str("negative timestamp"),
            Self::StartAfterEnd => f.write_str("t1 larger than t2"),
            Self::FarFuture => f.write_str("far future"),
            Self::Early => f.write_str("early"),
            Self::Future => f.write_str("future"),
            Self::LongDuration => f.write_str("duration over two days"),
            Self::LongRunning { days } => write!(f, "running for about {days} days"),
        }
    }
}

/// A record together with the rule it tripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub kind: FindingKind,
    pub record: Record,
}

impl Finding {
    /// Report order: label text first, then the record.
    fn report_order(a: &Self, b: &Self) -> Ordering {
        a.kind
            .to_string()
            .cmp(&b.kind.to_string())
            .then_with(|| Record::chronological(&a.record, &b.record))
    }

    /// Returns the repaired record.
    ///
    /// Swapped bounds are swapped back. Anything else is moved to start at
    /// `now`, keeping its duration unless that exceeds 1.2 days, in which
    /// case it becomes one hour.
    pub fn repair(&self, now: f64, modified: f64) -> Record {
        let mut record = self.record.clone();
        if self.kind == FindingKind::StartAfterEnd {
            std::mem::swap(&mut record.t1, &mut record.t2);
        } else {
            let mut duration = (record.t1 - record.t2).abs();
            if duration > MAX_KEPT_DURATION_SECS {
                duration = REPAIR_FALLBACK_DURATION_SECS;
            }
            record.t1 = now;
            record.t2 = now + duration;
        }
        record.mt = modified;
        record
    }
}

/// Result of checking a record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnosis {
    pub checked: usize,
    pub wrong: Vec<Finding>,
    pub suspicious: Vec<Finding>,
}

impl Diagnosis {
    pub fn is_clean(&self) -> bool {
        self.wrong.is_empty() && self.suspicious.is_empty()
    }
}

/// Rule evaluation anchored at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    now: f64,
    early_cutoff: f64,
}

impl Diagnostics {
    /// Anchors the rules at `now`, with the early cutoff at local 2000-01-01.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(now: f64) -> Self {
        let early_cutoff = NaiveDate::from_ymd_opt(2000, 1, 1).map_or(946_684_800, local_midnight);
        Self::with_early_cutoff(now, early_cutoff as f64)
    }

    pub const fn with_early_cutoff(now: f64, early_cutoff: f64) -> Self {
        Self { now, early_cutoff }
    }

    /// Returns the first rule `record` trips, if any.
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    pub fn classify(&self, record: &Record) -> Option<FindingKind> {
        let (t1, t2) = (record.t1, record.t2);
        let running_for = (self.now - t1).abs();

        if t1 < 0.0 || t2 < 0.0 {
            Some(FindingKind::NegativeTimestamp)
        } else if t1 > t2 {
            Some(FindingKind::StartAfterEnd)
        } else if t2 > self.now + FAR_FUTURE_SECS {
            Some(FindingKind::FarFuture)
        } else if t1 < self.early_cutoff {
            Some(FindingKind::Early)
        } else if t2 > self.now + FUTURE_SECS {
            Some(FindingKind::Future)
        } else if t2 - t1 > LONG_DURATION_SECS {
            Some(FindingKind::LongDuration)
        } else if t1 == t2 && running_for > LONG_RUNNING_SECS {
            let days = (running_for / DAY_SECS).round_ties_even() as i64;
            Some(FindingKind::LongRunning { days })
        } else {
            None
        }
    }

    /// Checks every record and sorts both buckets into report order.
    pub fn run(&self, mut records: Vec<Record>) -> Diagnosis {
        records.sort_by(Record::chronological);

        let mut diagnosis = Diagnosis {
            checked: records.len(),
            ..Diagnosis::default()
        };
        for record in records {
            let Some(kind) = self.classify(&record) else {
                continue;
            };
            let finding = Finding { kind, record };
            match kind.severity() {
                Severity::Wrong => diagnosis.wrong.push(finding),
                Severity::Suspicious => diagnosis.suspicious.push(finding),
            }
        }

        diagnosis.wrong.sort_by(Finding::report_order);
        diagnosis.suspicious.sort_by(Finding::report_order);
        tracing::debug!(
            checked = diagnosis.checked,
            wrong = diagnosis.wrong.len(),
            suspicious = diagnosis.suspicious.len(),
            "diagnosed records"
        );
        diagnosis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;
    const EARLY: f64 = 946_684_800.0;

    fn check(t1: f64, t2: f64) -> Option<FindingKind> {
        Diagnostics::with_early_cutoff(NOW, EARLY).classify(&Record::finished(t1, t2, "x", 0.0))
    }

    #[test]
    fn clean_record_has_no_finding() {
        assert_eq!(check(NOW - 3600.0, NOW), None);
        assert_eq!(check(NOW - 60.0, NOW - 60.0), None);
    }

    #[test]
    fn each_rule_fires() {
        assert_eq!(check(-5.0, NOW), Some(FindingKind::NegativeTimestamp));
        assert_eq!(check(NOW, NOW - 10.0), Some(FindingKind::StartAfterEnd));
        assert_eq!(check(NOW, NOW + 800.0 * DAY_SECS), Some(FindingKind::FarFuture));
        assert_eq!(check(EARLY - 10.0, EARLY - 5.0), Some(FindingKind::Early));
        assert_eq!(check(NOW, NOW + 1.5 * DAY_SECS), Some(FindingKind::Future));
        assert_eq!(check(NOW - 3.0 * DAY_SECS, NOW), Some(FindingKind::LongDuration));
        assert_eq!(
            check(NOW - 5.0 * DAY_SECS, NOW - 5.0 * DAY_SECS),
            Some(FindingKind::LongRunning { days: 5 })
        );
    }

    #[test]
    fn start_after_end_wins_over_far_future() {
        let t1 = NOW + 900.0 * DAY_SECS;
        let t2 = NOW + 800.0 * DAY_SECS;
        assert_eq!(check(t1, t2), Some(FindingKind::StartAfterEnd));
    }

    #[test]
    fn negative_wins_over_start_after_end() {
        assert_eq!(check(10.0, -10.0), Some(FindingKind::NegativeTimestamp));
    }

    #[test]
    fn labels_match_report_text() {
        assert_eq!(FindingKind::StartAfterEnd.to_string(), "t1 larger than t2");
        assert_eq!(FindingKind::LongDuration.to_string(), "duration over two days");
        assert_eq!(
            FindingKind::LongRunning { days: 3 }.to_string(),
            "running for about 3 days"
        );
    }

    #[test]
    fn run_buckets_and_sorts_findings() {
        let diagnostics = Diagnostics::with_early_cutoff(NOW, EARLY);
        let records = vec![
            Record::finished(NOW, NOW - 10.0, "swapped", 0.0),
            Record::finished(NOW - 3600.0, NOW, "fine", 0.0),
            Record::finished(-1.0, NOW, "negative", 0.0),
            Record::finished(NOW - 3.0 * DAY_SECS, NOW, "long", 0.0),
            Record::finished(NOW - 50.0, NOW - 100.0, "swapped earlier", 0.0),
        ];

        let diagnosis = diagnostics.run(records);
        assert_eq!(diagnosis.checked, 5);
        let wrong: Vec<_> = diagnosis.wrong.iter().map(|f| f.record.ds.as_str()).collect();
        assert_eq!(wrong, vec!["negative", "swapped earlier", "swapped"]);
        let suspicious: Vec<_> = diagnosis.suspicious.iter().map(|f| f.record.ds.as_str()).collect();
        assert_eq!(suspicious, vec!["long"]);
        assert!(!diagnosis.is_clean());
    }

    #[test]
    fn run_on_clean_records_is_clean() {
        let diagnosis = Diagnostics::with_early_cutoff(NOW, EARLY)
            .run(vec![Record::finished(NOW - 60.0, NOW, "ok", 0.0)]);
        assert!(diagnosis.is_clean());
        assert_eq!(diagnosis.checked, 1);
    }

    #[test]
    fn repair_swaps_reversed_bounds() {
        let record = Record::finished(200.0, 100.0, "x", 0.0);
        let finding = Finding {
            kind: FindingKind::StartAfterEnd,
            record: record.clone(),
        };
        let repaired = finding.repair(NOW, NOW + 0.5);
        assert!((repaired.t1 - record.t2).abs() < f64::EPSILON);
        assert!((repaired.t2 - record.t1).abs() < f64::EPSILON);
        assert_eq!(repaired.key, record.key);
    }

    #[test]
    fn repair_moves_short_record_to_now() {
        let finding = Finding {
            kind: FindingKind::NegativeTimestamp,
            record: Record::finished(-100.0, 500.0, "x", 0.0),
        };
        let repaired = finding.repair(NOW, NOW);
        assert!((repaired.t1 - NOW).abs() < f64::EPSILON);
        assert!((repaired.t2 - (NOW + 600.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn repair_clamps_long_record_to_an_hour() {
        let finding = Finding {
            kind: FindingKind::FarFuture,
            record: Record::finished(NOW, NOW + 900.0 * DAY_SECS, "x", 0.0),
        };
        let repaired = finding.repair(NOW, NOW);
        assert!((repaired.t2 - repaired.t1 - 3600.0).abs() < f64::EPSILON);
        assert!((repaired.t1 - NOW).abs() < f64::EPSILON);
    }
}
