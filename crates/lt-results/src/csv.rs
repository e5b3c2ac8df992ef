//! Delimited text sink for reported records.
//!
//! One row per record: `lunation,phase_deg,t00,...,tNN,tb`. Temperatures
//! are truncated toward zero to one decimal.

use lt_sim::{OutputSink, ReportedRecord, SimResult};
use std::fmt::Write as _;
use std::io::Write;

/// Truncate toward zero to one decimal place.
#[inline]
pub fn truncate_tenths(v: f64) -> f64 {
    (v * 10.0).trunc() / 10.0
}

/// Phase printed without accumulated float noise.
fn clean_phase(phase_deg: f64) -> f64 {
    (phase_deg * 1e9).round() / 1e9
}

pub fn header_row(layer_count: usize) -> String {
    let mut row = String::from("lunation,phase_deg");
    for i in 0..layer_count {
        let _ = write!(row, ",t{:02}", i);
    }
    row.push_str(",tb");
    row
}

pub fn format_row(record: &ReportedRecord<'_>) -> String {
    let mut row = format!("{},{}", record.lunation, clean_phase(record.phase_deg));
    for t in record.temperatures_k() {
        let _ = write!(row, ",{:.1}", truncate_tenths(t));
    }
    row
}

/// Streams rows to any writer.
pub struct CsvSink<W: Write> {
    out: W,
    header: bool,
    header_written: bool,
    rows: usize,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header: true,
            header_written: false,
            rows: 0,
        }
    }

    /// Skip the column header line.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for CsvSink<W> {
    fn accept(&mut self, record: &ReportedRecord<'_>) -> SimResult<()> {
        if self.header && !self.header_written {
            writeln!(self.out, "{}", header_row(record.profile.len()))?;
            self.header_written = true;
        }
        writeln!(self.out, "{}", format_row(record))?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> SimResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
