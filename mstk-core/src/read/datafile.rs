//! Per-symbol data files (`F<n>.DAT` / `F<n>.MWD`).
//!
//! A 28-byte header (record counts plus reserved space) is followed by
//! fixed-width records whose layout comes from the symbol's `ColumnSchema`.
//! Rows are decoded lazily; the first short or undecodable record ends the
//! stream with an error and whatever was yielded before it stands as a
//! partial result.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::domain::{Row, SymbolRecord};
use crate::error::{MsError, Result};
use crate::schema::{Column, ColumnSchema};
use crate::util::bytes::{read_exact_field, read_u16, skip};

pub const HEADER_LEN: u64 = 28;
const HEADER_RESERVED: u64 = 24;
/// A file of exactly this size has a header and nothing else; treated as
/// corrupt. Only checked for files opened from disk.
pub const EMPTY_FILE_LEN: u64 = 28;

pub struct DataFile<R: Read = BufReader<File>> {
    // dropped as soon as decoding stops, so an aborted symbol releases its handle
    reader: Option<R>,
    symbol: String,
    columns: Vec<Column>,
    max_recs: u16,
    last_rec: u16,
    remaining: u32,
    buf: Vec<u8>,
}

impl DataFile {
    pub fn open(dir: &Path, rec: &SymbolRecord, schema: &ColumnSchema) -> Result<Self> {
        let f = File::open(dir.join(rec.data_file_name()))?;
        if f.metadata()?.len() == EMPTY_FILE_LEN {
            return Err(MsError::EmptyDataFile {
                file_num: rec.file_num,
            });
        }
        Self::from_reader(BufReader::new(f), &rec.symbol, schema)
    }
}

impl<R: Read> DataFile<R> {
    pub fn from_reader(mut reader: R, symbol: &str, schema: &ColumnSchema) -> Result<Self> {
        let max_recs = read_u16(&mut reader, "data file max_recs")?;
        let last_rec = read_u16(&mut reader, "data file last_rec")?;
        skip(&mut reader, HEADER_RESERVED, "data file header")?;
        let widest = schema.columns().iter().map(Column::width).max().unwrap_or(0);
        Ok(Self {
            reader: Some(reader),
            symbol: symbol.to_string(),
            columns: schema.columns().to_vec(),
            max_recs,
            last_rec,
            // the header slot counts as record #1
            remaining: u32::from(last_rec).saturating_sub(1),
            buf: vec![0u8; widest],
        })
    }

    pub fn max_recs(&self) -> u16 {
        self.max_recs
    }

    pub fn last_rec(&self) -> u16 {
        self.last_rec
    }

    /// Records still expected according to the header.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn read_row(&mut self) -> Result<Row> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| MsError::Format("data file already closed".into()))?;
        let mut values = Vec::with_capacity(self.columns.len());
        let mut cells = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            let bytes = &mut self.buf[..col.width()];
            read_exact_field(reader, bytes, "data record")?;
            if let Column::Known { decoder, .. } = col {
                let value = decoder.decode(bytes)?;
                cells.push(decoder.format(&value)?);
                values.push(value);
            }
        }
        Ok(Row {
            symbol: self.symbol.clone(),
            values,
            cells,
        })
    }
}

impl<R: Read> Iterator for DataFile<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.reader = None;
            return None;
        }
        match self.read_row() {
            Ok(row) => {
                self.remaining -= 1;
                Some(Ok(row))
            }
            Err(e) => {
                self.remaining = 0;
                self.reader = None;
                Some(Err(e))
            }
        }
    }
}

/// Everything decoded for one symbol. `error` is set when decoding stopped
/// early; `rows` then holds the records read before the failure.
#[derive(Debug)]
pub struct SymbolOutcome {
    pub rows: Vec<Row>,
    pub error: Option<MsError>,
}

impl SymbolOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode a whole symbol, keeping partial output on corruption.
pub fn decode_symbol(dir: &Path, rec: &SymbolRecord, schema: &ColumnSchema) -> SymbolOutcome {
    let data = match DataFile::open(dir, rec, schema) {
        Ok(d) => d,
        Err(e) => {
            return SymbolOutcome {
                rows: Vec::new(),
                error: Some(e),
            };
        }
    };
    let mut rows = Vec::new();
    for row in data {
        match row {
            Ok(r) => rows.push(r),
            Err(e) => return SymbolOutcome { rows, error: Some(e) },
        }
    }
    SymbolOutcome { rows, error: None }
}
