use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("truncated {what}: expected {expected} bytes, got {got}")]
    Truncated {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("F{file_num}.DOP declares {found} columns, index says {declared}")]
    FieldCount {
        file_num: u16,
        declared: u8,
        found: usize,
    },

    #[error("invalid date value {raw}")]
    InvalidDate { raw: i64 },

    #[error("invalid time value {raw}")]
    InvalidTime { raw: i64 },

    #[error("invalid file number {raw}")]
    InvalidFileNumber { raw: u16 },

    #[error("data file for F{file_num} is header-only (28 bytes), treating as corrupt")]
    EmptyDataFile { file_num: u16 },

    #[error("no EMASTER or XMASTER found under {}", dir.display())]
    MissingIndex { dir: PathBuf },
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, MsError>;
