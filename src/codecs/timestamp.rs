// Positional codec for the `yyyy-MM-dd HH:mm:ss.SSS` timestamps written by the sensor.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
pub const TIMESTAMP_LEN: usize = 23;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp '{text}' is shorter than 23 characters")]
    TooShort { text: String },
    #[error("timestamp '{text}' has a non-numeric {field}")]
    NotNumeric { text: String, field: &'static str },
    #[error("timestamp '{text}' is not a valid calendar instant")]
    OutOfRange { text: String },
}

// (name, start, end) character offsets of each component
const FIELDS: [(&str, usize, usize); 7] = [
    ("year", 0, 4),
    ("month", 5, 7),
    ("day", 8, 10),
    ("hour", 11, 13),
    ("minute", 14, 16),
    ("second", 17, 19),
    ("millisecond", 20, 23),
];

/// Decodes a timestamp by slicing fixed character offsets.
///
/// Separator characters are not inspected and anything past the
/// millisecond digits is ignored. Calendar fields are validated, so
/// `2020-02-30` is rejected instead of rolling over into March.
pub fn decode(text: &str) -> Result<NaiveDateTime, TimestampError> {
    if text.len() < TIMESTAMP_LEN {
        return Err(TimestampError::TooShort {
            text: text.to_string(),
        });
    }

    let mut parts = [0u32; 7];
    for (slot, (field, start, end)) in parts.iter_mut().zip(FIELDS) {
        let digits = text
            .get(start..end)
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| TimestampError::NotNumeric {
                text: text.to_string(),
                field,
            })?;
        // All ASCII digits and at most four of them, so this cannot overflow.
        *slot = digits
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'));
    }

    let [year, month, day, hour, minute, second, milli] = parts;
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
        .ok_or_else(|| TimestampError::OutOfRange {
            text: text.to_string(),
        })
}

pub fn encode(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
