use std::fs;
use std::path::Path;

use crate::codecs::movement::{self, MovementEvent};
use crate::codecs::sensor::{self, SensorReading, SensorSample};
use crate::codecs::Parsed;
use crate::config::LoggingConfig;
use crate::error::PlmError;
use crate::utils::log::{log_with_header, LOG_DIR};

fn read_text(path: &Path) -> Result<String, PlmError> {
    if !path.exists() {
        log::error!("File not found at path: {}", path.display());
        return Err(PlmError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|e| PlmError::from_io(path, e))?;
    // Invalid UTF-8 surfaces as a FormatError on the offending line.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn report_outcome<T>(path: &Path, what: &str, parsed: &Parsed<T>) {
    match &parsed.error {
        Some(err) => log::warn!(
            "{}: stopped after {} {} ({})",
            path.display(),
            parsed.records.len(),
            what,
            err
        ),
        None if parsed.records.is_empty() => {
            log::warn!("{}: no {} found", path.display(), what)
        }
        None => log::debug!("{}: parsed {} {}", path.display(), parsed.records.len(), what),
    }
}

/// Opens a raw sensor export and parses the force series.
///
/// Missing or unreadable files are errors with no data. A misformatted
/// line is reported inside the returned [`Parsed`] alongside the samples
/// decoded before it.
pub fn parse_sensor_file<P: AsRef<Path>>(path: P) -> Result<Parsed<SensorSample>, PlmError> {
    let path = path.as_ref();
    let parsed = sensor::parse(&read_text(path)?);
    report_outcome(path, "samples", &parsed);
    Ok(parsed)
}

/// Like [`parse_sensor_file`], keeping the raw accelerometer and gyroscope axes.
pub fn parse_sensor_readings_file<P: AsRef<Path>>(
    path: P,
) -> Result<Parsed<SensorReading>, PlmError> {
    let path = path.as_ref();
    let parsed = sensor::parse_readings(&read_text(path)?);
    report_outcome(path, "readings", &parsed);
    Ok(parsed)
}

/// Opens a movement log and parses its events, same policy as sensor files.
pub fn parse_movement_file<P: AsRef<Path>>(path: P) -> Result<Parsed<MovementEvent>, PlmError> {
    let path = path.as_ref();
    let parsed = movement::parse(&read_text(path)?);
    report_outcome(path, "events", &parsed);
    Ok(parsed)
}

pub fn write_movement_file<P: AsRef<Path>>(
    path: P,
    events: &[MovementEvent],
) -> Result<(), PlmError> {
    let path = path.as_ref();
    fs::write(path, movement::serialize(events)).map_err(|e| PlmError::from_io(path, e))?;
    log::debug!("{}: wrote {} events", path.display(), events.len());
    Ok(())
}

pub fn write_sensor_file<P: AsRef<Path>>(
    path: P,
    readings: &[SensorReading],
) -> Result<(), PlmError> {
    let path = path.as_ref();
    fs::write(path, sensor::serialize_readings(readings))
        .map_err(|e| PlmError::from_io(path, e))?;
    log::debug!("{}: wrote {} readings", path.display(), readings.len());
    Ok(())
}

/// Appends a load summary to the debug trail when enabled.
pub fn trail_load<T>(config: &LoggingConfig, source: &Path, parsed: &Parsed<T>) {
    if !config.enable_debug_logging {
        return;
    }
    let message = match &parsed.error {
        Some(err) => format!("records: {}\nerror: {}", parsed.records.len(), err),
        None => format!("records: {}", parsed.records.len()),
    };
    let header = format!("Loaded {}", source.display());
    if let Err(e) = log_with_header(Path::new(LOG_DIR), &config.log_file, &header, &message) {
        log::warn!("Failed to write debug trail: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::timestamp;

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_sensor_file(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, PlmError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_movement_file(dir.path()).unwrap_err();
        assert!(matches!(err, PlmError::Read { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("night.csv");
        fs::write(&path, b"2020-01-01 00:00:00.000,1,0,0,0,0,0\n2020-\xff1-01 00:00:01.000,1,0,0,0,0,0\n")
            .unwrap();
        let parsed = parse_sensor_file(&path).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.error.unwrap().line, 2);
    }

    #[test]
    fn readings_survive_a_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        let readings = vec![
            SensorReading {
                timestamp: timestamp::decode("2020-01-01 00:00:00.000").unwrap(),
                accel: [3.0, 4.0, 0.0],
                gyro: [0.0, 0.0, 2.0],
            },
            SensorReading {
                timestamp: timestamp::decode("2020-01-01 00:00:05.000").unwrap(),
                accel: [0.0, 0.0, 1.5],
                gyro: [0.25, -0.5, 0.0],
            },
        ];
        write_sensor_file(&path, &readings).unwrap();

        let parsed = parse_sensor_readings_file(&path).unwrap();
        assert!(parsed.is_complete());
        assert_eq!(parsed.records, readings);
        assert_eq!(parsed.records[0].magnitude(), 5.0);
        assert_eq!(parsed.records[0].gyro_magnitude(), 2.0);

        let missing = parse_sensor_readings_file(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(missing, PlmError::FileNotFound { .. }));
    }
}
