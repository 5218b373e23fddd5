//! Master index files. EMASTER and XMASTER describe the same thing with
//! unrelated layouts, so each gets its own parser producing `SymbolRecord`s.

pub mod emaster;
pub mod xmaster;

use std::io::Read;

use time::Date;
use tracing::warn;

use crate::domain::{IndexKind, SymbolRecord};
use crate::error::{MsError, Result};

/// An index record that was read in full but whose fields do not decode.
/// Only that symbol is lost; the rest of the index stays usable.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Zero-based slot in the index.
    pub position: usize,
    pub symbol: String,
    /// As stored, possibly zero.
    pub file_num: u16,
    pub error: MsError,
}

type Decoded = std::result::Result<SymbolRecord, RejectedRecord>;

/// Index fields that must decode before a record is admitted.
struct Checked {
    file_num: u16,
    first_date: Option<Date>,
    last_date: Option<Date>,
}

fn check_fields(
    file_num: u16,
    first_date: Result<Option<Date>>,
    last_date: Result<Option<Date>>,
) -> Result<Checked> {
    if file_num == 0 {
        return Err(MsError::InvalidFileNumber { raw: file_num });
    }
    Ok(Checked {
        file_num,
        first_date: first_date?,
        last_date: last_date?,
    })
}

/// Read exactly `count` records. Short reads fail the whole index, decode
/// failures reject one record.
fn read_entries<R: Read>(
    r: &mut R,
    count: u16,
    kind: IndexKind,
    read_record: fn(&mut R, usize) -> Result<Decoded>,
) -> Result<(Vec<SymbolRecord>, Vec<RejectedRecord>)> {
    let mut records = Vec::with_capacity(usize::from(count));
    let mut rejected = Vec::new();
    for position in 0..usize::from(count) {
        match read_record(r, position)? {
            Ok(rec) => records.push(rec),
            Err(rej) => {
                warn!(
                    index = %kind,
                    position = rej.position,
                    symbol = %rej.symbol,
                    error = %rej.error,
                    "rejected index record"
                );
                rejected.push(rej);
            }
        }
    }
    Ok((records, rejected))
}
