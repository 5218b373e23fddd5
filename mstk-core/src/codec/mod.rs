//! Numeric encodings found in Metastock files.

pub mod datetime;
pub mod mbf;

pub use datetime::{decode_date_from_float, decode_date_from_int, decode_time};
pub use mbf::mbf_to_ieee;
