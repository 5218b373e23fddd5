use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::domain::Row;
use crate::error::{MsError, Result};

/// Comma-delimited output: quoted header, then symbol plus cells per row.
pub struct TextWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl TextWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> TextWriter<W> {
    pub fn new(w: W) -> Self {
        let inner = WriterBuilder::new()
            .quote_style(QuoteStyle::NonNumeric)
            .from_writer(w);
        Self { inner }
    }

    pub fn write_header(&mut self, header: &[&str]) -> Result<()> {
        self.inner.write_record(header).map_err(csv_err)
    }

    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.inner.write_record(row.fields()).map_err(csv_err)
    }

    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        self.inner
            .into_inner()
            .map_err(|e| MsError::Io(std::io::Error::other(e.to_string())))
    }
}

fn csv_err(e: csv::Error) -> MsError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => MsError::Io(io),
            other => MsError::Format(format!("csv: {other:?}")),
        }
    } else {
        MsError::Format(format!("csv: {e}"))
    }
}
