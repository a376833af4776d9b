use super::viewport::Viewport;
use crate::codecs::movement::{EventKind, MovementEvent};
use crate::codecs::sensor::SensorSample;
use chrono::NaiveDateTime;

pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours between two instants, regardless of their order.
pub fn window_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds().unsigned_abs() as f64 / MILLIS_PER_HOUR
}

/// PLM events strictly inside the window. The bounds may come in either order.
pub fn count_plm(events: &[MovementEvent], start: NaiveDateTime, end: NaiveDateTime) -> usize {
    let (from, to) = if start <= end { (start, end) } else { (end, start) };
    events
        .iter()
        .filter(|event| event.kind == EventKind::Plm)
        .filter(|event| event.start_time > from && event.start_time < to)
        .count()
}

/// PLM events per hour within `start..end`, both bounds exclusive.
///
/// A zero-length window yields `0.0`.
pub fn compute_rate(events: &[MovementEvent], start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let hours = window_hours(start, end);
    if hours == 0.0 {
        return 0.0;
    }
    count_plm(events, start, end) as f64 / hours
}

/// Rate over the time span currently on screen.
pub fn live_rate(events: &[MovementEvent], series: &[SensorSample], viewport: &Viewport) -> f64 {
    match viewport.bounds(series) {
        Some((lower, upper)) => compute_rate(events, lower, upper),
        None => 0.0,
    }
}
