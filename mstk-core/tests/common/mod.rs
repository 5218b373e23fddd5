#![allow(dead_code)]

use std::path::Path;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// IEEE `f32` to MBF bytes; only fixtures need the encoding direction.
pub fn mbf(v: f32) -> [u8; 4] {
    if v == 0.0 {
        return [0; 4];
    }
    let bits = v.to_bits();
    let sign = (bits >> 31) as u8;
    let exp = ((bits >> 23) & 0xff) as u8;
    let mant = bits & 0x7f_ffff;
    [
        (mant & 0xff) as u8,
        ((mant >> 8) & 0xff) as u8,
        (sign << 7) | ((mant >> 16) & 0x7f) as u8,
        exp + 2,
    ]
}

pub struct EMasterEntry<'a> {
    pub file_num: u8,
    pub num_fields: u8,
    pub symbol: &'a str,
    pub name: &'a str,
    pub first_date: f32,
    pub last_date: f32,
}

pub fn write_emaster(dir: &Path, entries: &[EMasterEntry<'_>]) -> TestResult {
    let mut buf = vec![0u8; 192];
    buf[0..2].copy_from_slice(&(entries.len() as u16).to_le_bytes());
    buf[2..4].copy_from_slice(&(entries.len() as u16).to_le_bytes());
    for e in entries {
        let mut rec = [0u8; 192];
        rec[2] = e.file_num;
        rec[6] = e.num_fields;
        rec[11..11 + e.symbol.len()].copy_from_slice(e.symbol.as_bytes());
        rec[32..32 + e.name.len()].copy_from_slice(e.name.as_bytes());
        rec[60] = b'D';
        rec[64..68].copy_from_slice(&e.first_date.to_le_bytes());
        rec[72..76].copy_from_slice(&e.last_date.to_le_bytes());
        buf.extend_from_slice(&rec);
    }
    std::fs::write(dir.join("EMASTER"), buf)?;
    Ok(())
}

pub fn write_xmaster(dir: &Path, entries: &[(u16, &str, &str, u32, u32)]) -> TestResult {
    let mut buf = vec![0u8; 150];
    buf[10..12].copy_from_slice(&(entries.len() as u16).to_le_bytes());
    for &(file_num, symbol, name, first, last) in entries {
        let mut rec = [0u8; 150];
        rec[1..1 + symbol.len()].copy_from_slice(symbol.as_bytes());
        rec[16..16 + name.len()].copy_from_slice(name.as_bytes());
        rec[62] = b'D';
        rec[65..67].copy_from_slice(&file_num.to_le_bytes());
        rec[104..108].copy_from_slice(&first.to_le_bytes());
        rec[116..120].copy_from_slice(&last.to_le_bytes());
        buf.extend_from_slice(&rec);
    }
    std::fs::write(dir.join("XMASTER"), buf)?;
    Ok(())
}

/// Data file with `records` of MBF-encoded columns. The header's record
/// counts are `records.len() + 1`, as Metastock writes them.
pub fn data_file_bytes(records: &[Vec<f32>]) -> Vec<u8> {
    let last = (records.len() + 1) as u16;
    let mut buf = vec![0u8; 28];
    buf[0..2].copy_from_slice(&last.to_le_bytes());
    buf[2..4].copy_from_slice(&last.to_le_bytes());
    for rec in records {
        for v in rec {
            buf.extend_from_slice(&mbf(*v));
        }
    }
    buf
}

pub fn write_data_file(dir: &Path, name: &str, records: &[Vec<f32>]) -> TestResult {
    std::fs::write(dir.join(name), data_file_bytes(records))?;
    Ok(())
}

pub fn ohlcv(date: f32, o: f32, h: f32, l: f32, c: f32, vol: f32) -> Vec<f32> {
    vec![date, o, h, l, c, vol, 0.0]
}
