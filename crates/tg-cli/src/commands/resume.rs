//! Resume command: restart a timer with a recent description.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::Result;
use tg_core::ResumeCandidates;
use tg_core::window::resume_window;

use super::start::start_timer;
use crate::clock::Now;
use crate::store::RecordStore;

/// Runs the resume command.
///
/// Without an index the candidates are listed and one is read from
/// `input`. End of input aborts without submitting.
pub fn run<W: Write, R: BufRead>(
    writer: &mut W,
    input: &mut R,
    store: &impl RecordStore,
    index: Option<usize>,
    now: Now,
) -> Result<()> {
    let candidates = ResumeCandidates::new(store.records_in(resume_window(now.today()))?);
    if candidates.is_empty() {
        writeln!(writer, "No records within the last week.")?;
        return Ok(());
    }

    let description = if let Some(index) = index {
        candidates.select(index)?.ds.clone()
    } else {
        write!(writer, "{}> ", format_candidates(&candidates))?;
        writer.flush()?;
        let Some(line) = read_answer(input)? else {
            writeln!(writer)?;
            writeln!(writer, "Aborted.")?;
            return Ok(());
        };
        candidates.select_input(&line)?.ds.clone()
    };

    start_timer(writer, store, &description, now)
}

/// Lists candidates oldest first, numbered so that 1 is the most recent.
fn format_candidates(candidates: &ResumeCandidates) -> String {
    let mut output = String::new();
    writeln!(output, "Which record would you like to resume? [1]").unwrap();
    for (number, record) in candidates.numbered() {
        writeln!(output, "{:>4} {}", format!("[{number}]"), record.ds).unwrap();
    }
    output
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
