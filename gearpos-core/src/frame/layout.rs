//! Screen layout for each orientation
//!
//! Positions are in logical pixels. Large-font text is placed by its
//! baseline, small-font text by its top edge.

use crate::config::{Features, Orientation};

/// Landscape panel width
pub const LANDSCAPE_WIDTH: i16 = 128;

/// Landscape panel height
pub const LANDSCAPE_HEIGHT: i16 = 32;

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A one-pixel rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub from: Point,
    pub to: Point,
}

impl Rule {
    const fn new(x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        Self {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
        }
    }
}

/// A cleared rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub origin: Point,
    pub width: u16,
    pub height: u16,
}

/// Positions of every frame element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Baseline of the gear label (x comes from the gear table)
    pub gear_baseline: i16,
    /// Top-left of the up arrow
    pub arrow_up: Point,
    /// Top-left of the down arrow
    pub arrow_down: Point,
    /// Session counter text
    pub counter_cursor: Point,
    /// Rules framing the counter
    pub counter_rules: &'static [Rule],
    /// Area wiped before the temperature is redrawn
    pub temperature_region: Region,
    /// Rules framing the temperature
    pub temperature_rules: &'static [Rule],
    /// Temperature text
    pub temperature_cursor: Point,
    /// Degree icon (or fault icon)
    pub degree_icon: Point,
}

const LANDSCAPE_BASE: i16 = 32;
const LANDSCAPE_TEMP_Y: i16 = 20;

const LANDSCAPE_COUNTER_RULES: [Rule; 2] = [
    Rule::new(0, 15, 58, 15),
    Rule::new(58, 0, 58, LANDSCAPE_HEIGHT),
];

const LANDSCAPE_TEMPERATURE_RULES: [Rule; 2] = [
    Rule::new(0, LANDSCAPE_TEMP_Y - 5, 58, LANDSCAPE_TEMP_Y - 5),
    Rule::new(58, 0, 58, LANDSCAPE_HEIGHT),
];

const PORTRAIT_BASE: i16 = 60;
const PORTRAIT_TEMP_Y: i16 = 110;
const PORTRAIT_TOP_TEXT_Y: i16 = 17;

const PORTRAIT_COUNTER_RULES: [Rule; 1] = [Rule::new(
    0,
    PORTRAIT_TOP_TEXT_Y + 4,
    31,
    PORTRAIT_TOP_TEXT_Y + 4,
)];

const PORTRAIT_TEMPERATURE_RULES: [Rule; 1] = [Rule::new(
    0,
    PORTRAIT_TEMP_Y - 4,
    31,
    PORTRAIT_TEMP_Y - 4,
)];

impl Layout {
    /// Layout for an orientation and feature set
    pub fn new(orientation: Orientation, features: &Features) -> Self {
        match orientation {
            Orientation::Landscape => {
                // Large glyphs sit higher when sharing the screen with small text
                let gear_baseline = if features.session_counter || features.thermometer {
                    LANDSCAPE_BASE - 6
                } else {
                    LANDSCAPE_BASE
                };

                Self {
                    gear_baseline,
                    arrow_up: Point::new(100, LANDSCAPE_BASE - 33),
                    arrow_down: Point::new(100, LANDSCAPE_BASE - 15),
                    counter_cursor: Point::new(26, 3),
                    counter_rules: &LANDSCAPE_COUNTER_RULES,
                    temperature_region: Region {
                        origin: Point::new(0, LANDSCAPE_TEMP_Y - 4),
                        width: 57,
                        height: (LANDSCAPE_HEIGHT - LANDSCAPE_TEMP_Y) as u16,
                    },
                    temperature_rules: &LANDSCAPE_TEMPERATURE_RULES,
                    temperature_cursor: Point::new(20, LANDSCAPE_TEMP_Y),
                    degree_icon: Point::new(51, LANDSCAPE_TEMP_Y - 2),
                }
            }
            Orientation::Portrait => Self {
                gear_baseline: PORTRAIT_BASE,
                arrow_up: Point::new(16, PORTRAIT_BASE + 16),
                arrow_down: Point::new(0, PORTRAIT_BASE + 16),
                counter_cursor: Point::new(0, PORTRAIT_TOP_TEXT_Y - 11),
                counter_rules: &PORTRAIT_COUNTER_RULES,
                temperature_region: Region {
                    origin: Point::new(0, PORTRAIT_TEMP_Y - 4),
                    width: LANDSCAPE_HEIGHT as u16,
                    height: (LANDSCAPE_WIDTH - (PORTRAIT_TEMP_Y - 4)) as u16,
                },
                temperature_rules: &PORTRAIT_TEMPERATURE_RULES,
                temperature_cursor: Point::new(0, PORTRAIT_TEMP_Y),
                degree_icon: Point::new(27, PORTRAIT_TEMP_Y - 2),
            },
        }
    }
}
