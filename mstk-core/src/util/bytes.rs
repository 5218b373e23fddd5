//! Fixed-width little-endian field readers shared by the index and data file
//! parsers. Every reader names the field it was after so a short file reports
//! something more useful than "failed to fill whole buffer".

use std::io::{self, Read};

use crate::error::{MsError, Result};

/// Read until `buf` is full or the stream ends; returns the byte count.
pub fn read_full(r: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub fn read_exact_field(r: &mut impl Read, buf: &mut [u8], what: &'static str) -> Result<()> {
    let got = read_full(r, buf)?;
    if got != buf.len() {
        return Err(MsError::Truncated {
            what,
            expected: buf.len(),
            got,
        });
    }
    Ok(())
}

pub fn read_array<const N: usize>(r: &mut impl Read, what: &'static str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    read_exact_field(r, &mut buf, what)?;
    Ok(buf)
}

/// Discard `len` reserved bytes.
pub fn skip(r: &mut impl Read, len: u64, what: &'static str) -> Result<()> {
    let got = io::copy(&mut r.by_ref().take(len), &mut io::sink())?;
    if got != len {
        return Err(MsError::Truncated {
            what,
            expected: len as usize,
            got: got as usize,
        });
    }
    Ok(())
}

pub fn read_u8(r: &mut impl Read, what: &'static str) -> Result<u8> {
    Ok(read_array::<1>(r, what)?[0])
}

pub fn read_u16(r: &mut impl Read, what: &'static str) -> Result<u16> {
    Ok(u16::from_le_bytes(read_array(r, what)?))
}

pub fn read_u32(r: &mut impl Read, what: &'static str) -> Result<u32> {
    Ok(u32::from_le_bytes(read_array(r, what)?))
}

/// Plain IEEE-754 single, as stored in EMASTER date fields.
pub fn read_f32(r: &mut impl Read, what: &'static str) -> Result<f32> {
    Ok(f32::from_le_bytes(read_array(r, what)?))
}

pub fn read_char(r: &mut impl Read, what: &'static str) -> Result<char> {
    Ok(char::from(read_u8(r, what)?))
}

/// Read a `len`-byte NUL-terminated text field.
pub fn read_str(r: &mut impl Read, len: usize, what: &'static str) -> Result<String> {
    let mut buf = vec![0u8; len];
    read_exact_field(r, &mut buf, what)?;
    Ok(cstr(&buf))
}

/// Text up to the first NUL (or the whole span), trimmed. Bytes map 1:1 to
/// chars so stray high-bit bytes survive instead of failing the record.
pub fn cstr(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let s: String = bytes[..end].iter().map(|&b| char::from(b)).collect();
    s.trim().to_string()
}
