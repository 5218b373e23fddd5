#![forbid(unsafe_code)]

pub mod error;
pub mod options;

pub mod util {
    pub mod bytes;
}

pub mod codec;
pub mod domain;
pub mod schema;

pub mod container;

pub mod read {
    pub mod datafile;
    pub mod extract;
}

pub mod list;
pub mod repo;
pub mod repo_factory;
pub mod text;

// Re-exports: stable API surface
pub use container::RejectedRecord;
pub use domain::{IndexKind, Row, SymbolRecord, Value};
pub use error::{MsError, Result};
pub use list::{Listed, list, locate};
pub use options::DecodeOptions;
pub use read::datafile::{DataFile, SymbolOutcome, decode_symbol};
pub use read::extract::{ExtractOptions, ExtractReport, SymbolStatus, extract};
pub use repo::{SymbolFilter, SymbolIndex};
pub use schema::{ColumnSchema, resolve_schema};
