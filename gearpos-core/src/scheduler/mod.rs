//! Fixed-tick scheduler
//!
//! Sequences scanner, counter, sleep timer and sampler once per tick and
//! forwards the results to the frame layer.

pub mod report;
pub mod tick;

pub use report::{TickReport, MAX_TICK_EVENTS};
pub use tick::Indicator;
