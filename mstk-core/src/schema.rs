//! Per-symbol column layout. A symbol's data file has no self-description;
//! the optional `F<n>.DOP` file lists its columns, one quoted name per token,
//! and symbols without one use the classic OHLCV+OI layout.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::codec::datetime::{decode_date_from_float, decode_time, format_date, format_time};
use crate::codec::mbf::mbf_slice_to_ieee;
use crate::domain::{Value, schema_file_name};
use crate::error::{MsError, Result};
use crate::options::DecodeOptions;

/// Every column type seen so far is a 4-byte MBF value.
pub const COLUMN_WIDTH: usize = 4;
/// Assumed width of columns we cannot name.
pub const UNKNOWN_COLUMN_WIDTH: usize = 4;

pub const DEFAULT_COLUMNS: [&str; 7] = ["DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOL", "OI"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Date,
    Time,
    Open,
    High,
    Low,
    Close,
    Volume,
    OpenInterest,
}

impl ColumnKind {
    pub fn from_ms_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "OPEN" => ColumnKind::Open,
            "HIGH" => ColumnKind::High,
            "LOW" => ColumnKind::Low,
            "CLOSE" => ColumnKind::Close,
            "VOL" => ColumnKind::Volume,
            "OI" => ColumnKind::OpenInterest,
            _ => return None,
        };
        Some(kind)
    }

    /// Header label in text output.
    pub fn display_name(self) -> &'static str {
        match self {
            ColumnKind::Date => "Date",
            ColumnKind::Time => "Time",
            ColumnKind::Open => "Open",
            ColumnKind::High => "High",
            ColumnKind::Low => "Low",
            ColumnKind::Close => "Close",
            ColumnKind::Volume => "Volume",
            ColumnKind::OpenInterest => "OI",
        }
    }

    pub fn decoder(self, opts: &DecodeOptions) -> Decoder {
        match self {
            ColumnKind::Date => Decoder::Date,
            ColumnKind::Time => Decoder::Time,
            ColumnKind::Open | ColumnKind::High | ColumnKind::Low | ColumnKind::Close => {
                Decoder::Float {
                    precision: opts.precision,
                }
            }
            ColumnKind::Volume | ColumnKind::OpenInterest => Decoder::Int,
        }
    }
}

/// How a known column turns its bytes into a value and the value into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoder {
    Date,
    Time,
    Float { precision: usize },
    Int,
}

impl Decoder {
    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        let v = mbf_slice_to_ieee(bytes)?;
        Ok(match self {
            Decoder::Date => Value::Date(decode_date_from_float(f64::from(v))?),
            Decoder::Time => Value::Time(decode_time(f64::from(v))?),
            Decoder::Float { .. } => Value::Float(v),
            Decoder::Int => Value::Int(v as i64),
        })
    }

    pub fn format(&self, value: &Value) -> Result<String> {
        match (self, value) {
            (Decoder::Date, Value::Date(d)) => format_date(*d),
            (Decoder::Time, Value::Time(t)) => format_time(*t),
            (Decoder::Float { precision }, Value::Float(_)) => value.format(*precision),
            (Decoder::Int, Value::Int(_)) => value.format(0),
            (decoder, value) => Err(MsError::Format(format!(
                "{decoder:?} column cannot format {value:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Known {
        kind: ColumnKind,
        decoder: Decoder,
        width: usize,
    },
    /// Bytes are consumed to keep alignment, nothing is emitted.
    Unknown { name: String, width: usize },
}

impl Column {
    pub fn width(&self) -> usize {
        match self {
            Column::Known { width, .. } | Column::Unknown { width, .. } => *width,
        }
    }

    /// Display name for known columns, the DOP name otherwise.
    pub fn label(&self) -> &str {
        match self {
            Column::Known { kind, .. } => kind.display_name(),
            Column::Unknown { name, .. } => name,
        }
    }

    fn from_name(name: &str, opts: &DecodeOptions) -> Self {
        match ColumnKind::from_ms_name(name) {
            Some(kind) => Column::Known {
                kind,
                decoder: kind.decoder(opts),
                width: COLUMN_WIDTH,
            },
            None => {
                debug!(column = name, "unknown column, skipping its bytes");
                Column::Unknown {
                    name: name.to_string(),
                    width: UNKNOWN_COLUMN_WIDTH,
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    pub fn from_names<S: AsRef<str>>(names: &[S], opts: &DecodeOptions) -> Self {
        Self {
            columns: names
                .iter()
                .map(|n| Column::from_name(n.as_ref(), opts))
                .collect(),
        }
    }

    pub fn default_layout(opts: &DecodeOptions) -> Self {
        Self::from_names(&DEFAULT_COLUMNS, opts)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Bytes per record, unknown columns included.
    pub fn record_width(&self) -> usize {
        self.columns.iter().map(Column::width).sum()
    }

    /// `Name` then the label of every known column, in order.
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once("Name")
            .chain(self.columns.iter().filter_map(|c| match c {
                Column::Known { kind, .. } => Some(kind.display_name()),
                Column::Unknown { .. } => None,
            }))
            .collect()
    }
}

/// Pull the column name out of a DOP token: `"DATE"` or `"DATE",8,0`.
fn column_name(token: &str) -> Result<&str> {
    match token.strip_prefix('"') {
        Some(rest) => rest
            .split_once('"')
            .map(|(name, _)| name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| MsError::Format(format!("malformed DOP token {token:?}"))),
        None => Ok(token.split(',').next().unwrap_or(token)),
    }
}

/// Parse DOP text. When the index recorded a column count the token count
/// must match it exactly.
pub fn parse_schema(
    text: &str,
    file_num: u16,
    num_fields: Option<u8>,
    opts: &DecodeOptions,
) -> Result<ColumnSchema> {
    let names = text
        .split_whitespace()
        .map(column_name)
        .collect::<Result<Vec<_>>>()?;
    if let Some(declared) = num_fields {
        if names.len() != usize::from(declared) {
            return Err(MsError::FieldCount {
                file_num,
                declared,
                found: names.len(),
            });
        }
    }
    Ok(ColumnSchema::from_names(&names, opts))
}

/// Resolve the layout for `file_num` in archive directory `dir`.
pub fn resolve_schema(
    dir: &Path,
    file_num: u16,
    num_fields: Option<u8>,
    opts: &DecodeOptions,
) -> Result<ColumnSchema> {
    let path = dir.join(schema_file_name(file_num));
    match fs::read(&path) {
        Ok(bytes) => parse_schema(&String::from_utf8_lossy(&bytes), file_num, num_fields, opts),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file_num, "no DOP file, using default layout");
            Ok(ColumnSchema::default_layout(opts))
        }
        Err(e) => Err(e.into()),
    }
}
