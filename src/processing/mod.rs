pub mod event_rate;
pub mod markers;
pub mod report;
pub mod viewport;
