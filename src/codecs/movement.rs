use super::timestamp;
use super::{parse_f64, scan, Parsed};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::fmt;

pub const MOVEMENT_HEADER: &str =
    "StartTimestamp,EventType,Str(g),Duration(s),Interval(s),IsLegDown,RejectionReason";

/// Written in place of an interval when there is no previous event.
///
/// The trailing space keeps legacy logs byte-identical.
pub const INFINITE_INTERVAL: &str = "inf ";

const MIN_FIELDS: usize = 6;
const RECORD_TERMINATOR: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Plm,
    Rejected,
    Isolated,
    UserAdded,
}

impl EventKind {
    pub fn code(self) -> char {
        match self {
            EventKind::Plm => 'P',
            EventKind::Rejected => 'R',
            EventKind::Isolated => 'I',
            EventKind::UserAdded => 'U',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(EventKind::Plm),
            "R" => Some(EventKind::Rejected),
            "I" => Some(EventKind::Isolated),
            "U" => Some(EventKind::UserAdded),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Plm => "PLM",
            EventKind::Rejected => "Rejected",
            EventKind::Isolated => "Isolated",
            EventKind::UserAdded => "User added",
        };
        f.write_str(name)
    }
}

/// A classified limb movement.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementEvent {
    pub start_time: NaiveDateTime,
    pub kind: EventKind,
    /// Peak force in g.
    pub peak_force: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds since the end of the previous event, `f64::INFINITY` if none.
    pub interval: f64,
    /// Leg below 65 degrees from horizontal.
    pub leg_down: bool,
    pub rejection_reason: String,
}

impl MovementEvent {
    /// One log line, without the record terminator.
    pub fn to_record(&self) -> String {
        let interval = if self.interval == f64::INFINITY {
            INFINITE_INTERVAL.to_string()
        } else {
            format_half_up(self.interval, 3)
        };
        format!(
            "{},{},{},{},{},{},{}",
            timestamp::encode(&self.start_time),
            self.kind.code(),
            format_half_up(self.peak_force, 2),
            format_half_up(self.duration, 3),
            interval,
            if self.leg_down { 't' } else { 'f' },
            self.rejection_reason,
        )
    }
}

/// Fixed-point text with ties rounded away from zero, applied to the
/// shortest decimal form of `value`, so `1.005` gives `1.01` at two places.
fn format_half_up(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", precision, value);
    }
    let text = value.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..precision).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(precision).map_or(false, |d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| *d as char));
    if precision > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| *d as char));
    }
    out
}

// MOVEMENT LOG CODEC ----------------------------------------------------------

pub fn parse(text: &str) -> Parsed<MovementEvent> {
    scan(text, decode_event)
}

fn decode_event(record: &StringRecord) -> Result<MovementEvent, String> {
    if record.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            record.len()
        ));
    }

    let start_time = timestamp::decode(&record[0]).map_err(|e| e.to_string())?;
    let kind = EventKind::from_code(&record[1])
        .ok_or_else(|| format!("unknown event type '{}'", &record[1]))?;
    let peak_force = parse_f64(&record[2], "peak force")?;
    let duration = parse_f64(&record[3], "duration")?;
    // An unparseable interval marks the first event of a series.
    let interval = record[4].trim().parse::<f64>().unwrap_or(f64::INFINITY);
    let leg_down = !record[5].trim().eq_ignore_ascii_case("f");
    let rejection_reason = record.get(6).unwrap_or_default().to_string();

    Ok(MovementEvent {
        start_time,
        kind,
        peak_force,
        duration,
        interval,
        leg_down,
        rejection_reason,
    })
}

/// Writes the log with CRLF after every record, header included.
pub fn serialize(events: &[MovementEvent]) -> String {
    let mut out = String::with_capacity((events.len() + 1) * 64);
    out.push_str(MOVEMENT_HEADER);
    out.push_str(RECORD_TERMINATOR);
    for event in events {
        out.push_str(&event.to_record());
        out.push_str(RECORD_TERMINATOR);
    }
    out
}
