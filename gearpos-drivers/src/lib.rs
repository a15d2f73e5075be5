//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gearpos-core for the supported temperature sources:
//!
//! - Analog thermistor (linear voltage-to-Kelvin)
//! - Simple two-byte register sensor (LM75 class)
//! - Calibrated humidity/temperature sensor (HTS221 class)
//!
//! Drivers are written against the [`gearpos_hal`] bus traits and report
//! every failure as a [`gearpos_core::traits::SensorError`].

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
