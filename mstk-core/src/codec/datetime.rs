//! Dates and times are stored as plain numbers: `YYYMMDD` (year minus 1900)
//! in data files and EMASTER, full `YYYYMMDD` in XMASTER, and `HHMM` /
//! `HHMMSS` for intraday times.

use time::macros::format_description;
use time::{Date, Month, Time};

use crate::error::{MsError, Result};

/// Decode a `YYYMMDD`/`YYYYMMDD` number. The fraction is truncated.
pub fn decode_date_from_float(raw: f64) -> Result<Date> {
    let n = raw.trunc() as i64;
    let invalid = || MsError::InvalidDate { raw: n };

    let y = n / 10_000;
    let year = if y >= 1900 { y } else { 1900 + y };
    let month = u8::try_from((n % 10_000) / 100)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(invalid)?;
    let day = u8::try_from(n % 100).map_err(|_| invalid())?;
    let year = i32::try_from(year).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

/// Integer variant used by XMASTER; zero means "no date recorded".
pub fn decode_date_from_int(raw: i64) -> Result<Option<Date>> {
    if raw <= 0 {
        return Ok(None);
    }
    decode_date_from_float(raw as f64).map(Some)
}

/// Values below 10000 are read as `HHMM`, larger ones as `HHMMSS` with the
/// seconds dropped. The two forms overlap: an `HHMMSS` time before 01:00,
/// such as 00:05:00 stored as `500`, decodes as 05:00.
pub fn decode_time(raw: f64) -> Result<Time> {
    let n = raw.trunc() as i64;
    let invalid = || MsError::InvalidTime { raw: n };
    if n < 0 {
        return Err(invalid());
    }
    let (hour, minute) = if n < 10_000 {
        (n / 100, n % 100)
    } else {
        (n / 10_000, (n % 10_000) / 100)
    };
    let hour = u8::try_from(hour).map_err(|_| invalid())?;
    let minute = u8::try_from(minute).map_err(|_| invalid())?;
    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}

pub fn format_date(d: Date) -> Result<String> {
    d.format(format_description!("[year][month][day]"))
        .map_err(|e| MsError::Format(format!("date format: {e}")))
}

pub fn format_time(t: Time) -> Result<String> {
    t.format(format_description!("[hour][minute]"))
        .map_err(|e| MsError::Format(format!("time format: {e}")))
}
