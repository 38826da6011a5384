//! Choosing a recent record to resume.

use thiserror::Error;

use crate::classify::filter_unmarked;
use crate::record::Record;

/// How many recent records are offered.
pub const MAX_CANDIDATES: usize = 10;

/// Errors from interpreting a selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The input was not a number at all.
    #[error("invalid index {input:?}, expected a number")]
    NotANumber { input: String },
    /// The number does not name an offered record.
    #[error("index {index} is out of range, choose 1 to {available}")]
    OutOfRange { index: usize, available: usize },
}

/// The most recent records, in ascending end-time order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeCandidates {
    records: Vec<Record>,
}

impl ResumeCandidates {
    /// Keeps the latest unmarked records by end time.
    pub fn new(records: Vec<Record>) -> Self {
        let mut records = filter_unmarked(records);
        records.sort_by(|a, b| a.t2.total_cmp(&b.t2));
        let excess = records.len().saturating_sub(MAX_CANDIDATES);
        records.drain(..excess);
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Candidates oldest first, each with the number that selects it.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Record)> {
        let len = self.records.len();
        self.records
            .iter()
            .enumerate()
            .map(move |(i, record)| (len - i, record))
    }

    /// Returns the record numbered `index`, where 1 is the most recent.
    pub fn select(&self, index: usize) -> Result<&Record, SelectionError> {
        let len = self.records.len();
        if index == 0 || index > len {
            return Err(SelectionError::OutOfRange {
                index,
                available: len,
            });
        }
        Ok(&self.records[len - index])
    }

    /// Parses typed input and selects. Blank input picks the most recent.
    pub fn select_input(&self, input: &str) -> Result<&Record, SelectionError> {
        let input = input.trim();
        if input.is_empty() {
            return self.select(1);
        }
        let index = input
            .parse::<usize>()
            .map_err(|_| SelectionError::NotANumber {
                input: input.to_string(),
            })?;
        self.select(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn candidates(count: usize) -> ResumeCandidates {
        // Deliberately out of order to exercise sorting.
        let records = (0..count)
            .rev()
            .map(|i| {
                let t = 1000.0 + i as f64 * 100.0;
                Record::finished(t, t + 50.0, format!("task {i}"), t)
            })
            .collect();
        ResumeCandidates::new(records)
    }

    #[test]
    fn keeps_only_latest_ten() {
        let candidates = candidates(11);
        assert_eq!(candidates.len(), 10);
        assert!(candidates.numbered().all(|(_, r)| r.ds != "task 0"));
    }

    #[test]
    fn index_one_is_most_recent() {
        let candidates = candidates(11);
        assert_eq!(candidates.select(1).unwrap().ds, "task 10");
    }

    #[test]
    fn index_ten_is_oldest_offered() {
        let candidates = candidates(11);
        assert_eq!(candidates.select(10).unwrap().ds, "task 1");
    }

    #[test]
    fn zero_and_eleven_are_out_of_range() {
        let candidates = candidates(11);
        assert_eq!(
            candidates.select(0),
            Err(SelectionError::OutOfRange {
                index: 0,
                available: 10
            })
        );
        assert!(matches!(
            candidates.select(11),
            Err(SelectionError::OutOfRange { index: 11, .. })
        ));
    }

    #[test]
    fn non_numeric_input_is_distinct_error() {
        let candidates = candidates(3);
        assert_eq!(
            candidates.select_input("abc"),
            Err(SelectionError::NotANumber {
                input: "abc".to_string()
            })
        );
        assert!(matches!(
            candidates.select_input("-1"),
            Err(SelectionError::NotANumber { .. })
        ));
    }

    #[test]
    fn blank_input_selects_most_recent() {
        let candidates = candidates(3);
        assert_eq!(candidates.select_input("  \n").unwrap().ds, "task 2");
        assert_eq!(candidates.select_input("3\n").unwrap().ds, "task 0");
    }

    #[test]
    fn numbering_counts_down_to_most_recent() {
        let candidates = candidates(3);
        let numbered: Vec<_> = candidates
            .numbered()
            .map(|(n, r)| (n, r.ds.as_str()))
            .collect();
        assert_eq!(numbered, vec![(3, "task 0"), (2, "task 1"), (1, "task 2")]);
    }

    #[test]
    fn marked_records_are_never_offered() {
        let records = vec![
            Record::finished(0.0, 10.0, "meeting", 0.0),
            Record::finished(0.0, 20.0, "lunch HIDDEN", 0.0),
        ];
        let candidates = ResumeCandidates::new(records);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.select(1).unwrap().ds, "meeting");
    }

    #[test]
    fn no_records_gives_empty_candidates() {
        assert!(ResumeCandidates::new(Vec::new()).is_empty());
    }
}
