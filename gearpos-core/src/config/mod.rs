//! Configuration types
//!
//! The gear table is static data validated once at startup; the indicator
//! configuration selects which features are active and which temperature
//! source is bound.

pub mod gears;
pub mod types;

pub use gears::*;
pub use types::*;
