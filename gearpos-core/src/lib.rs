//! Board-agnostic core logic for the gear indicator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Gear table and indicator configuration (with validation)
//! - Gear scanner with identifier-based debouncing
//! - Session change counter
//! - Display sleep/wake timer
//! - Temperature sampling cadence and sensor health tracking
//! - Fixed-tick scheduler sequencing all of the above
//! - Frame layout and rendering against an abstract display surface

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod counter;
pub mod frame;
pub mod health;
pub mod sampler;
pub mod scan;
pub mod scheduler;
pub mod sleep;
pub mod state;
pub mod traits;
