//! Sensor health tracking
//!
//! Turns raw sampling results into the temperature status shown on screen.

pub mod monitor;

pub use monitor::{SensorHealth, TemperatureStatus, MAX_STALE_SAMPLES};
