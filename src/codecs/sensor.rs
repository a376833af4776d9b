use super::timestamp;
use super::{parse_f64, scan, Parsed};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::fmt::Write as _;

pub const SENSOR_HEADER: &str = "Timestamp,ax,ay,az,gx,gy,gz";
const SENSOR_FIELDS: usize = 7;
const AXIS_NAMES: [&str; 6] = ["ax", "ay", "az", "gx", "gy", "gz"];

/// One plotted point of the force series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub timestamp: NaiveDateTime,
    /// Euclidean norm of the accelerometer axes, in g.
    pub magnitude: f64,
}

/// A full raw row, gyroscope included.
///
/// Only the accelerometer contributes to the plotted series; the gyroscope
/// axes are kept for diagnostics and for writing the raw data back out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    pub accel: [f64; 3],
    pub gyro: [f64; 3],
}

impl SensorReading {
    pub fn magnitude(&self) -> f64 {
        norm(&self.accel)
    }

    pub fn gyro_magnitude(&self) -> f64 {
        norm(&self.gyro)
    }

    pub fn to_sample(&self) -> SensorSample {
        SensorSample {
            timestamp: self.timestamp,
            magnitude: self.magnitude(),
        }
    }
}

fn norm(axes: &[f64; 3]) -> f64 {
    axes.iter().map(|v| v * v).sum::<f64>().sqrt()
}

// SENSOR SERIES PARSER --------------------------------------------------------

/// Parses raw sensor CSV into the plotted force series.
pub fn parse(text: &str) -> Parsed<SensorSample> {
    parse_readings(text).map(|reading| reading.to_sample())
}

/// Parses raw sensor CSV keeping every axis.
pub fn parse_readings(text: &str) -> Parsed<SensorReading> {
    scan(text, decode_reading)
}

fn decode_reading(record: &StringRecord) -> Result<SensorReading, String> {
    if record.len() != SENSOR_FIELDS {
        return Err(format!(
            "expected {} fields, found {}",
            SENSOR_FIELDS,
            record.len()
        ));
    }

    let timestamp = timestamp::decode(&record[0]).map_err(|e| e.to_string())?;

    let mut axes = [0.0; 6];
    for (i, (value, name)) in axes.iter_mut().zip(AXIS_NAMES).enumerate() {
        *value = parse_f64(&record[i + 1], name)?;
    }

    Ok(SensorReading {
        timestamp,
        accel: [axes[0], axes[1], axes[2]],
        gyro: [axes[3], axes[4], axes[5]],
    })
}

// RAW DATA EXPORT -------------------------------------------------------------

/// Writes readings back in the raw sensor layout, header first.
pub fn serialize_readings(readings: &[SensorReading]) -> String {
    let mut out = String::with_capacity((readings.len() + 1) * 64);
    out.push_str(SENSOR_HEADER);
    out.push('\n');
    for reading in readings {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            timestamp::encode(&reading.timestamp),
            reading.accel[0],
            reading.accel[1],
            reading.accel[2],
            reading.gyro[0],
            reading.gyro[1],
            reading.gyro[2],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_is_the_accelerometer_norm() {
        let text = "2020-01-01 00:00:00.000,3,4,0,0,0,0\n\
                    2020-01-01 00:00:05.000,0,0,5,0,0,0\n";
        let parsed = parse(text);
        assert!(parsed.is_complete());
        let magnitudes: Vec<f64> = parsed.records.iter().map(|s| s.magnitude).collect();
        assert_eq!(magnitudes, vec![5.0, 5.0]);
        assert!(parsed.records[0].timestamp < parsed.records[1].timestamp);
    }

    #[test]
    fn gyroscope_does_not_affect_magnitude() {
        let parsed = parse_readings("2020-01-01 00:00:00.000,0,0,1,6,8,0\n");
        let reading = parsed.records[0];
        assert_eq!(reading.magnitude(), 1.0);
        assert_eq!(reading.gyro_magnitude(), 10.0);
    }

    #[test]
    fn header_line_is_skipped() {
        let parsed = parse("Timestamp,ax,ay,az,gx,gy,gz\n2020-01-01 00:00:00.000,1,0,0,0,0,0\n");
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.error.is_none());
    }

    #[test]
    fn empty_and_header_only_inputs_yield_nothing() {
        for text in ["", "Timestamp,ax,ay,az,gx,gy,gz\n"] {
            let parsed = parse(text);
            assert!(parsed.records.is_empty());
            assert!(parsed.error.is_none());
        }
    }

    #[test]
    fn bad_third_row_keeps_the_first_two() {
        let text = "Timestamp,ax,ay,az,gx,gy,gz\n\
                    2020-01-01 00:00:00.000,3,4,0,0,0,0\n\
                    2020-01-01 00:00:05.000,0,0,5,0,0,0\n\
                    2020-01-01 00:0x:10.000,1,1,1,0,0,0\n\
                    2020-01-01 00:00:15.000,1,1,1,0,0,0\n";
        let parsed = parse(text);
        assert_eq!(parsed.records.len(), 2);
        let err = parsed.error.expect("third data row should fail");
        assert_eq!(err.line, 4);
        assert!(err.message.contains("minute"));
    }

    #[test]
    fn wrong_column_count_and_bad_numbers_fail() {
        let parsed = parse("2020-01-01 00:00:00.000,1,2,3\n");
        assert!(parsed.error.unwrap().message.contains("expected 7 fields"));

        let parsed = parse("2020-01-01 00:00:00.000,1,2,three,0,0,0\n");
        assert!(parsed.error.unwrap().message.contains("az"));
    }

    #[test]
    fn raw_export_parses_back() {
        let text = "2020-01-01 00:00:00.250,0.5,-1.25,9.81,0.1,0.2,0.3\n";
        let readings = parse_readings(text).records;
        let exported = serialize_readings(&readings);
        assert!(exported.starts_with(SENSOR_HEADER));
        assert_eq!(parse_readings(&exported).records, readings);
    }
}
