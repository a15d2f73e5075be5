//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod sensor;

pub use display::{DisplayError, DisplaySurface, Font, Icon};
pub use sensor::{SensorError, TemperatureReading, TemperatureSource};
