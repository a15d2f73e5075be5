//! RP2040-specific HAL for the gear indicator firmware
//!
//! This crate provides RP2040 implementations of the gearpos-hal traits:
//! - Gear-selector inputs taken by GPIO number at runtime
//! - Blocking ADC channel for the analog thermistor
//! - Sensor I2C bus with a per-transaction timeout

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pins;

pub use adc::AdcInput;
pub use gpio::GpioBank;
pub use i2c::TimedI2c;
pub use pins::{PinBank, PinError};
