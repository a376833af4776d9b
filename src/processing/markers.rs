// Hover annotation: cross-references plotted samples with the movement log.

use crate::codecs::movement::MovementEvent;
use crate::codecs::sensor::SensorSample;
use crate::codecs::timestamp;
use chrono::NaiveDateTime;

/// First event whose start time is exactly `at`.
pub fn event_at(events: &[MovementEvent], at: NaiveDateTime) -> Option<&MovementEvent> {
    events.iter().find(|event| event.start_time == at)
}

/// Status line shown above the chart for the sample under the cursor.
pub fn hover_label(sample: &SensorSample) -> String {
    format!(
        "Force: {:.2}; Time: {}",
        sample.magnitude,
        timestamp::encode(&sample.timestamp)
    )
}

/// Hover text, extended with the event that starts on this sample if any.
pub fn annotate(sample: &SensorSample, events: &[MovementEvent]) -> String {
    let label = hover_label(sample);
    match event_at(events, sample.timestamp) {
        Some(event) if event.rejection_reason.is_empty() => {
            format!("{}; Event: {}", label, event.kind)
        }
        Some(event) => format!(
            "{}; Event: {} ({})",
            label, event.kind, event.rejection_reason
        ),
        None => label,
    }
}

/// Events whose start time matches a sample in `visible`, in log order.
pub fn markers_in<'a>(
    events: &'a [MovementEvent],
    visible: &[SensorSample],
) -> Vec<&'a MovementEvent> {
    let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
        return Vec::new();
    };
    events
        .iter()
        .filter(|event| event.start_time >= first.timestamp && event.start_time <= last.timestamp)
        .filter(|event| visible.iter().any(|s| s.timestamp == event.start_time))
        .collect()
}
