// mstk_core/src/domain.rs
use std::fmt;

use time::{Date, Time};

use crate::codec::datetime::{format_date, format_time};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// `EMASTER`, file numbers 1..=255
    EMaster,
    /// `XMASTER`, extended numbering
    XMaster,
}

impl IndexKind {
    pub const ALL: [IndexKind; 2] = [IndexKind::EMaster, IndexKind::XMaster];

    pub fn file_name(self) -> &'static str {
        match self {
            IndexKind::EMaster => "EMASTER",
            IndexKind::XMaster => "XMASTER",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// One symbol entry from an index file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolRecord {
    pub file_num: u16,
    /// Only EMASTER records the column count.
    pub num_fields: Option<u8>,
    pub symbol: String,
    pub name: String,
    pub time_frame: char,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
    pub generation: IndexKind,
}

impl SymbolRecord {
    pub fn data_file_name(&self) -> String {
        let ext = if self.file_num <= 255 { "DAT" } else { "MWD" };
        format!("F{}.{}", self.file_num, ext)
    }

    pub fn schema_file_name(&self) -> String {
        schema_file_name(self.file_num)
    }

    /// Output file stem; `/` is not allowed in file names.
    pub fn output_stem(&self) -> String {
        self.symbol.replace('/', "_")
    }
}

pub fn schema_file_name(file_num: u16) -> String {
    format!("F{file_num}.DOP")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Date(Date),
    Time(Time),
    Float(f32),
    Int(i64),
}

impl Value {
    pub fn format(&self, precision: usize) -> Result<String> {
        match *self {
            Value::Date(d) => format_date(d),
            Value::Time(t) => format_time(t),
            Value::Float(v) => Ok(format!("{v:.precision$}")),
            Value::Int(v) => Ok(v.to_string()),
        }
    }
}

/// One decoded record. `cells` holds `values` rendered as text at the
/// precision the reader was opened with.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub symbol: String,
    pub values: Vec<Value>,
    pub cells: Vec<String>,
}

impl Row {
    /// Symbol followed by the cells, ready for a delimited writer.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.symbol.as_str()).chain(self.cells.iter().map(String::as_str))
    }
}
