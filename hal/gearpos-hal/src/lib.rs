//! Gearpos Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the indicator
//! core and sensor drivers are written against. Chip-specific code (the
//! RP2040 firmware, host-side mocks in tests) implements them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gearpos-firmware (board wiring)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ gearpos-core  │       │gearpos-drivers│
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gearpos-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputBank`] - Digital inputs addressed by identifier
//! - [`i2c::I2cBus`] - I2C bus operations with received-length reporting
//! - [`adc::AdcReader`] - Single-channel analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use gpio::{InputBank, InputId};
pub use i2c::{I2cBus, I2cConfig, I2cError};
