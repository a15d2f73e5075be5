//! Build-time indicator configuration
//!
//! Generated by build.rs from indicator.toml. Edit that file and rebuild
//! to change the gear table, features or sensor.

use gearpos_core::config::{
    Features, GearDefinition, IndicatorConfig, Orientation, RegisterFormat, SensorKind,
};

include!(concat!(env!("OUT_DIR"), "/indicator_config.rs"));
