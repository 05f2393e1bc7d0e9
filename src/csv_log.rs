//! Two-column `Time, Temperature` trajectory log.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use num_traits::Float;

use crate::error::Result;
use crate::simulation::StepRecord;

/// First line of every log.
pub const CSV_HEADER: &str = "Time, Temperature";

/// Writes one `time, temperature` line per [`StepRecord`] after a header line.
///
/// Values are printed with Rust's shortest round-trip float formatting.
pub struct CsvLog<W: Write> {
    writer: W,
    rows: usize,
}

impl CsvLog<BufWriter<File>> {
    /// Create (or truncate) a log file at `path` and write the header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        log::info!("writing trajectory log to {}", path.display());
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvLog<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn record<T: Float + Display>(&mut self, record: &StepRecord<T>) -> Result<()> {
        writeln!(self.writer, "{}, {}", record.time, record.temperature)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data lines written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        log::debug!("trajectory log closed after {} rows", self.rows);
        Ok(self.writer)
    }
}
