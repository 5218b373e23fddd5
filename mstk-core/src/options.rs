pub const DEFAULT_PRECISION: usize = 2;

/// Decoding knobs threaded through the schema resolver and data-file reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Digits after the decimal point for float columns.
    pub precision: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl DecodeOptions {
    pub fn with_precision(precision: Option<usize>) -> Self {
        Self {
            precision: precision.unwrap_or(DEFAULT_PRECISION),
        }
    }
}
