// src/codecs/mod.rs

pub mod movement;
pub mod sensor;
pub mod timestamp;

use crate::error::{FormatError, PlmError};
use csv::StringRecord;
use std::path::Path;

/// Result of a best-effort scan.
///
/// `records` holds everything decoded before the first failing line;
/// `error` describes that line. The scan never continues past a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub error: Option<FormatError>,
}

impl<T> Parsed<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Records only if the whole input decoded, for copy-and-swap publishing.
    pub fn into_complete(self) -> Result<Vec<T>, FormatError> {
        match self.error {
            None => Ok(self.records),
            Some(err) => Err(err),
        }
    }

    /// `EmptyInput` when the input was readable but had no data rows.
    pub fn warning(&self, source: &Path) -> Option<PlmError> {
        if self.records.is_empty() && self.error.is_none() {
            Some(PlmError::EmptyInput {
                path: source.to_path_buf(),
            })
        } else {
            None
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Parsed<U> {
        Parsed {
            records: self.records.into_iter().map(f).collect(),
            error: self.error,
        }
    }
}

/// Header/title rows are recognised by their first character alone.
pub(crate) fn is_data_line(first_field: &str) -> bool {
    first_field
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit())
}

/// Splits `text` into comma-separated records and decodes each data line.
///
/// No quoting is honoured: a `"` is an ordinary character. CR, LF and CRLF
/// all end a record.
pub(crate) fn scan<T>(
    text: &str,
    mut decode: impl FnMut(&StringRecord) -> Result<T, String>,
) -> Parsed<T> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    let mut line = 0;

    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                line = record.position().map_or(line + 1, |pos| pos.line() as usize);
                if !is_data_line(record.get(0).unwrap_or("")) {
                    continue;
                }
                match decode(&record) {
                    Ok(item) => records.push(item),
                    Err(message) => {
                        return Parsed {
                            records,
                            error: Some(FormatError::new(line, message)),
                        };
                    }
                }
            }
            Err(err) => {
                let at = err
                    .position()
                    .map_or(line + 1, |pos| pos.line() as usize);
                return Parsed {
                    records,
                    error: Some(FormatError::new(at, err.to_string())),
                };
            }
        }
    }

    Parsed {
        records,
        error: None,
    }
}

/// Parses a trimmed decimal field, naming it in the error.
pub(crate) fn parse_f64(field: &str, name: &str) -> Result<f64, String> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{} '{}' is not a number", name, field))
}
