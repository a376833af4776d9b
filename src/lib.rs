//! Core of the PLM analyzer: parsing of raw sensor exports and classified
//! movement logs, the scrolling viewport over a long recording, and
//! PLM events-per-hour for arbitrary windows.
//!
//! Everything here runs synchronously on the caller's thread. Parse results
//! are fresh values; publishing them is up to the caller (see
//! [`recording::Recording`]).

pub mod codecs;
pub mod config;
pub mod error;
pub mod local;
pub mod processing;
pub mod recording;
pub mod utils;

#[cfg(feature = "python")]
pub mod bindings;

pub use codecs::movement::{serialize as serialize_movement_log, EventKind, MovementEvent};
pub use codecs::sensor::{SensorReading, SensorSample};
pub use codecs::Parsed;
pub use error::{FormatError, PlmError};
pub use local::process_file::{parse_movement_file, parse_sensor_file};
pub use processing::event_rate::compute_rate;
pub use processing::viewport::{compute_viewport, Viewport, ViewportController};
