use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Decoded, RejectedRecord, check_fields, read_entries};
use crate::codec::datetime::decode_date_from_float;
use crate::domain::{IndexKind, SymbolRecord};
use crate::error::Result;
use crate::repo::SymbolIndex;
use crate::util::bytes::{read_char, read_f32, read_str, read_u8, read_u16, skip};

pub const HEADER_LEN: usize = 192;
pub const RECORD_LEN: usize = 192;
pub const SYMBOL_LEN: usize = 14;
pub const NAME_LEN: usize = 16;

/// EMASTER index: file numbers 1..=255, one 192-byte record per symbol.
#[derive(Debug)]
pub struct EMaster {
    pub files_no: u16,
    pub last_file: u16,
    records: Vec<SymbolRecord>,
    rejected: Vec<RejectedRecord>,
}

impl EMaster {
    pub fn open(dir: &Path) -> Result<Self> {
        let f = File::open(dir.join(IndexKind::EMaster.file_name()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(mut r: impl Read) -> Result<Self> {
        let files_no = read_u16(&mut r, "EMASTER files_no")?;
        let last_file = read_u16(&mut r, "EMASTER last_file")?;
        skip(&mut r, (HEADER_LEN - 4) as u64, "EMASTER header")?;

        let (records, rejected) = read_entries(&mut r, files_no, IndexKind::EMaster, read_record)?;
        Ok(Self {
            files_no,
            last_file,
            records,
            rejected,
        })
    }
}

// Layout: [0..2]=pad [2]=file_num [3..6]=pad [6]=num_fields [7..11]=pad
// [11..25]=symbol [25..32]=pad [32..48]=name [48..60]=pad [60]=time_frame
// [61..64]=pad [64..68]=first_date (f32) [68..72]=pad [72..76]=last_date (f32)
// [76..192]=pad
fn read_record<R: Read>(r: &mut R, position: usize) -> Result<Decoded> {
    skip(r, 2, "EMASTER record")?;
    let file_num = read_u8(r, "EMASTER file_num")?;
    skip(r, 3, "EMASTER record")?;
    let num_fields = read_u8(r, "EMASTER num_fields")?;
    skip(r, 4, "EMASTER record")?;
    let symbol = read_str(r, SYMBOL_LEN, "EMASTER symbol")?;
    skip(r, 7, "EMASTER record")?;
    let name = read_str(r, NAME_LEN, "EMASTER name")?;
    skip(r, 12, "EMASTER record")?;
    let time_frame = read_char(r, "EMASTER time_frame")?;
    skip(r, 3, "EMASTER record")?;
    let first_raw = read_f32(r, "EMASTER first_date")?;
    skip(r, 4, "EMASTER record")?;
    let last_raw = read_f32(r, "EMASTER last_date")?;
    skip(r, 116, "EMASTER record")?;

    let checked = match check_fields(
        u16::from(file_num),
        float_date(first_raw),
        float_date(last_raw),
    ) {
        Ok(c) => c,
        Err(error) => {
            return Ok(Err(RejectedRecord {
                position,
                symbol,
                file_num: u16::from(file_num),
                error,
            }));
        }
    };
    Ok(Ok(SymbolRecord {
        file_num: checked.file_num,
        num_fields: Some(num_fields),
        symbol,
        name,
        time_frame,
        first_date: checked.first_date,
        last_date: checked.last_date,
        generation: IndexKind::EMaster,
    }))
}

fn float_date(raw: f32) -> Result<Option<time::Date>> {
    if raw <= 0.0 {
        return Ok(None);
    }
    decode_date_from_float(f64::from(raw)).map(Some)
}

impl SymbolIndex for EMaster {
    fn kind(&self) -> IndexKind {
        IndexKind::EMaster
    }

    fn symbols(&self) -> &[SymbolRecord] {
        &self.records
    }

    fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    fn take_rejected(&mut self) -> Vec<RejectedRecord> {
        std::mem::take(&mut self.rejected)
    }
}
