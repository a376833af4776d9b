use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::codecs::sensor::{SensorReading, SensorSample};

// -----------------------------------------------------------------------------
// PLACEHOLDER DATA
// -----------------------------------------------------------------------------

pub const DEMO_STEP_MS: i64 = 5000;
const MAX_FORCE_G: u32 = 7;

/// Readings `step_ms` apart with a whole-g force drawn from `0..7`.
///
/// The force sits on the vertical axis, so each reading's magnitude equals
/// the drawn value. Gyroscope axes carry small noise.
pub fn demo_readings<R: Rng>(
    rng: &mut R,
    count: usize,
    start: NaiveDateTime,
    step_ms: i64,
) -> Vec<SensorReading> {
    let mut time = start;
    let mut readings = Vec::with_capacity(count);

    for _ in 0..count {
        let force = rng.gen_range(0..MAX_FORCE_G) as f64;
        let gyro = [
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ];
        readings.push(SensorReading {
            timestamp: time,
            accel: [0.0, 0.0, force],
            gyro,
        });
        time += Duration::milliseconds(step_ms);
    }

    readings
}

pub fn demo_series<R: Rng>(
    rng: &mut R,
    count: usize,
    start: NaiveDateTime,
    step_ms: i64,
) -> Vec<SensorSample> {
    demo_readings(rng, count, start, step_ms)
        .iter()
        .map(SensorReading::to_sample)
        .collect()
}
