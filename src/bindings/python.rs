use crate::codecs::movement::{self, MovementEvent};
use crate::codecs::timestamp;
use crate::error::PlmError;
use crate::local::process_file;
use crate::processing::event_rate;
use crate::processing::viewport;

use chrono::NaiveDateTime;
use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: PlmError) -> PyErr {
    match err {
        PlmError::FileNotFound { .. } => PyFileNotFoundError::new_err(err.user_message()),
        PlmError::Read { .. } => PyIOError::new_err(err.user_message()),
        _ => PyValueError::new_err(err.user_message()),
    }
}

fn parse_instant(text: &str) -> PyResult<NaiveDateTime> {
    timestamp::decode(text).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Movement log handed to Python; events stay on the Rust side.
#[pyclass(name = "MovementLog")]
pub struct PyMovementLog {
    events: Vec<MovementEvent>,
}

#[pymethods]
impl PyMovementLog {
    pub fn __len__(&self) -> usize {
        self.events.len()
    }

    /// (start, type code, peak force, duration, interval, leg down, reason) per event.
    pub fn rows(&self) -> Vec<(String, char, f64, f64, f64, bool, String)> {
        self.events
            .iter()
            .map(|e| {
                (
                    timestamp::encode(&e.start_time),
                    e.kind.code(),
                    e.peak_force,
                    e.duration,
                    e.interval,
                    e.leg_down,
                    e.rejection_reason.clone(),
                )
            })
            .collect()
    }

    pub fn rate(&self, start: &str, end: &str) -> PyResult<f64> {
        Ok(event_rate::compute_rate(
            &self.events,
            parse_instant(start)?,
            parse_instant(end)?,
        ))
    }

    pub fn serialize(&self) -> String {
        movement::serialize(&self.events)
    }

    pub fn save(&self, path: &str) -> PyResult<()> {
        process_file::write_movement_file(path, &self.events).map_err(to_py_err)
    }
}

/// Returns ([(timestamp, magnitude)], error message or None).
#[pyfunction]
pub fn parse_sensor_file(path: &str) -> PyResult<(Vec<(String, f64)>, Option<String>)> {
    let parsed = process_file::parse_sensor_file(path).map_err(to_py_err)?;
    let samples = parsed
        .records
        .iter()
        .map(|s| (timestamp::encode(&s.timestamp), s.magnitude))
        .collect();
    Ok((samples, parsed.error.map(|e| e.to_string())))
}

#[pyfunction]
pub fn parse_movement_file(path: &str) -> PyResult<(PyMovementLog, Option<String>)> {
    let parsed = process_file::parse_movement_file(path).map_err(to_py_err)?;
    Ok((
        PyMovementLog {
            events: parsed.records,
        },
        parsed.error.map(|e| e.to_string()),
    ))
}

/// Returns (lower index, upper index).
#[pyfunction]
pub fn compute_viewport(total: usize, capacity: usize, position: f64) -> (usize, usize) {
    let v = viewport::compute_viewport(total, capacity, position);
    (v.lower_index, v.upper_index)
}

#[pyfunction]
pub fn compute_rate(log: PyRef<'_, PyMovementLog>, start: &str, end: &str) -> PyResult<f64> {
    log.rate(start, end)
}

#[pyfunction]
pub fn serialize_movement_log(log: PyRef<'_, PyMovementLog>) -> String {
    log.serialize()
}

/// A Python module implemented in Rust.
#[pymodule]
pub fn plm_analyzer(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMovementLog>()?;
    m.add_function(wrap_pyfunction!(parse_sensor_file, m)?)?;
    m.add_function(wrap_pyfunction!(parse_movement_file, m)?)?;
    m.add_function(wrap_pyfunction!(compute_viewport, m)?)?;
    m.add_function(wrap_pyfunction!(compute_rate, m)?)?;
    m.add_function(wrap_pyfunction!(serialize_movement_log, m)?)?;
    Ok(())
}
