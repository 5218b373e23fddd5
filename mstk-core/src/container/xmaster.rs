use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Decoded, RejectedRecord, check_fields, read_entries};
use crate::codec::datetime::decode_date_from_int;
use crate::domain::{IndexKind, SymbolRecord};
use crate::error::Result;
use crate::repo::SymbolIndex;
use crate::util::bytes::{read_char, read_str, read_u16, read_u32, skip};

pub const HEADER_LEN: usize = 150;
pub const RECORD_LEN: usize = 150;
pub const SYMBOL_LEN: usize = 15;
pub const NAME_LEN: usize = 46;

/// XMASTER index: extended file numbering (> 255), one 150-byte record per
/// symbol. Dates are plain `YYYYMMDD` integers.
#[derive(Debug)]
pub struct XMaster {
    pub files_no: u16,
    pub last_file: u16,
    pub next_file: u16,
    records: Vec<SymbolRecord>,
    rejected: Vec<RejectedRecord>,
}

impl XMaster {
    pub fn open(dir: &Path) -> Result<Self> {
        let f = File::open(dir.join(IndexKind::XMaster.file_name()))?;
        Self::from_reader(BufReader::new(f))
    }

    // Header: [0..10]=pad [10..12]=files_no [12..14]=pad [14..16]=last_file
    // [16..18]=pad [18..20]=next_file [20..150]=pad
    pub fn from_reader(mut r: impl Read) -> Result<Self> {
        skip(&mut r, 10, "XMASTER header")?;
        let files_no = read_u16(&mut r, "XMASTER files_no")?;
        skip(&mut r, 2, "XMASTER header")?;
        let last_file = read_u16(&mut r, "XMASTER last_file")?;
        skip(&mut r, 2, "XMASTER header")?;
        let next_file = read_u16(&mut r, "XMASTER next_file")?;
        skip(&mut r, (HEADER_LEN - 20) as u64, "XMASTER header")?;

        let (records, rejected) = read_entries(&mut r, files_no, IndexKind::XMaster, read_record)?;
        Ok(Self {
            files_no,
            last_file,
            next_file,
            records,
            rejected,
        })
    }
}

// Layout: [0]=pad [1..16]=symbol [16..62]=name [62]=time_frame [63..65]=pad
// [65..67]=file_num [67..104]=pad [104..108]=first_date [108..116]=pad
// [116..120]=last_date [120..150]=pad
fn read_record<R: Read>(r: &mut R, position: usize) -> Result<Decoded> {
    skip(r, 1, "XMASTER record")?;
    let symbol = read_str(r, SYMBOL_LEN, "XMASTER symbol")?;
    let name = read_str(r, NAME_LEN, "XMASTER name")?;
    let time_frame = read_char(r, "XMASTER time_frame")?;
    skip(r, 2, "XMASTER record")?;
    let file_num = read_u16(r, "XMASTER file_num")?;
    skip(r, 37, "XMASTER record")?;
    let first_raw = read_u32(r, "XMASTER first_date")?;
    skip(r, 8, "XMASTER record")?;
    let last_raw = read_u32(r, "XMASTER last_date")?;
    skip(r, 30, "XMASTER record")?;

    let checked = match check_fields(
        file_num,
        decode_date_from_int(i64::from(first_raw)),
        decode_date_from_int(i64::from(last_raw)),
    ) {
        Ok(c) => c,
        Err(error) => {
            return Ok(Err(RejectedRecord {
                position,
                symbol,
                file_num,
                error,
            }));
        }
    };
    Ok(Ok(SymbolRecord {
        file_num: checked.file_num,
        num_fields: None,
        symbol,
        name,
        time_frame,
        first_date: checked.first_date,
        last_date: checked.last_date,
        generation: IndexKind::XMaster,
    }))
}

impl SymbolIndex for XMaster {
    fn kind(&self) -> IndexKind {
        IndexKind::XMaster
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsError;
    use time::macros::date;

    fn record(file_num: u16, symbol: &str, name: &str, first: u32, last: u32) -> Vec<u8> {
        let mut rec = vec![0u8; RECORD_LEN];
        rec[1..1 + symbol.len()].copy_from_slice(symbol.as_bytes());
        rec[16..16 + name.len()].copy_from_slice(name.as_bytes());
        rec[62] = b'D';
        rec[65..67].copy_from_slice(&file_num.to_le_bytes());
        rec[104..108].copy_from_slice(&first.to_le_bytes());
        rec[116..120].copy_from_slice(&last.to_le_bytes());
        rec
    }

    fn file(records: &[Vec<u8>]) -> Vec<u8> {
        let n = records.len() as u16;
        let mut buf = vec![0u8; HEADER_LEN];
        buf[10..12].copy_from_slice(&n.to_le_bytes());
        buf[14..16].copy_from_slice(&(n + 255).to_le_bytes());
        buf[18..20].copy_from_slice(&(n + 256).to_le_bytes());
        for r in records {
            buf.extend_from_slice(r);
        }
        buf
    }

    #[test]
    fn parses_fields_at_documented_offsets() {
        let long_name = "A company name that is longer than sixteen bytes";
        let bytes = file(&[
            record(256, "LONGSYMBOL12345", &long_name[..46], 20230115, 0),
            record(1024, "EUR/USD", "Euro", 19991231, 20240229),
        ]);
        let xm = XMaster::from_reader(&bytes[..]).unwrap();
        assert_eq!(xm.files_no, 2);
        assert_eq!(xm.last_file, 257);
        assert_eq!(xm.next_file, 258);

        let s = xm.symbols();
        assert_eq!(s[0].symbol, "LONGSYMBOL12345");
        assert_eq!(s[0].name, &long_name[..46]);
        assert_eq!(s[0].file_num, 256);
        assert_eq!(s[0].num_fields, None);
        assert_eq!(s[0].first_date, Some(date!(2023 - 01 - 15)));
        assert_eq!(s[0].last_date, None);
        assert_eq!(s[1].symbol, "EUR/USD");
        assert_eq!(s[1].file_num, 1024);
        assert_eq!(s[1].time_frame, 'D');
        assert_eq!(s[1].first_date, Some(date!(1999 - 12 - 31)));
        assert_eq!(s[1].last_date, Some(date!(2024 - 02 - 29)));
        assert_eq!(s[1].generation, IndexKind::XMaster);
    }

    #[test]
    fn zero_date_is_none_but_bad_date_rejects() {
        let bytes = file(&[
            record(300, "ZERO", "", 0, 20231231),
            record(301, "BAD", "", 20231399, 0),
            record(0, "NOFILE", "", 0, 0),
        ]);
        let xm = XMaster::from_reader(&bytes[..]).unwrap();
        assert_eq!(xm.symbols().len(), 1);
        assert_eq!(xm.symbols()[0].symbol, "ZERO");
        assert_eq!(xm.symbols()[0].first_date, None);

        let rej = xm.rejected();
        assert_eq!(rej.len(), 2);
        assert_eq!((rej[0].position, rej[0].symbol.as_str()), (1, "BAD"));
        assert!(matches!(rej[0].error, MsError::InvalidDate { raw: 20231399 }));
        assert_eq!((rej[1].position, rej[1].symbol.as_str()), (2, "NOFILE"));
        assert!(matches!(rej[1].error, MsError::InvalidFileNumber { raw: 0 }));
    }

    #[test]
    fn truncated_header_fails() {
        let bytes = vec![0u8; 100];
        assert!(matches!(
            XMaster::from_reader(&bytes[..]),
            Err(MsError::Truncated { .. })
        ));
    }

    #[test]
    fn missing_records_fail() {
        let mut bytes = file(&[record(300, "A", "", 0, 0)]);
        bytes[10..12].copy_from_slice(&2u16.to_le_bytes());
        assert!(XMaster::from_reader(&bytes[..]).is_err());
    }
}
