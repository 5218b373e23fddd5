//! Microsoft Binary Format (MBF) single precision floats.
//!
//! MBF keeps the exponent in the most significant byte (bias 129, mantissa
//! form `0.1mmm`) and the sign in the top bit of the byte below it. IEEE-754
//! wants sign, then an 8-bit exponent with bias 127, then the mantissa, so the
//! conversion only has to rewrite the upper 16 bits; the low two mantissa bytes
//! carry over untouched.

use crate::error::{MsError, Result};

pub const MBF_LEN: usize = 4;

/// Convert 4 little-endian MBF bytes to an IEEE-754 `f32`.
///
/// An all-zero exponent/high-mantissa half decodes to exactly `0.0`.
#[inline]
pub fn mbf_to_ieee(b: [u8; MBF_LEN]) -> f32 {
    let hi = u16::from_le_bytes([b[2], b[3]]);
    if hi == 0 {
        return 0.0;
    }
    let hi = i32::from(hi);
    let exp = (hi & 0xff00) - 0x0200;
    let mut m = (hi & 0x7f) | ((hi << 8) & 0x8000);
    m |= exp >> 1;
    f32::from_le_bytes([b[0], b[1], (m & 0xff) as u8, ((m >> 8) & 0xff) as u8])
}

pub fn mbf_slice_to_ieee(b: &[u8]) -> Result<f32> {
    let arr: [u8; MBF_LEN] = b.try_into().map_err(|_| MsError::Truncated {
        what: "mbf value",
        expected: MBF_LEN,
        got: b.len(),
    })?;
    Ok(mbf_to_ieee(arr))
}
