//! Gear table definition and validation
//!
//! The table is ordered by physical gear position. Index 0 and the last
//! index are the extremes of the selector travel.

use gearpos_hal::{InputBank, InputId};

use super::types::SensorKind;

/// Maximum number of gears in a table
pub const MAX_GEARS: usize = 8;

/// Maximum label length in bytes
pub const MAX_LABEL_LEN: usize = 7;

/// One selectable gear position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GearDefinition {
    /// Text drawn in the large font (e.g. "N", "1")
    pub label: &'static str,
    /// Input line asserted when this gear is engaged
    pub input: InputId,
    /// Horizontal offset of the label on the display
    pub x_offset: u8,
}

impl GearDefinition {
    /// Create a gear definition
    pub const fn new(label: &'static str, input: u8, x_offset: u8) -> Self {
        Self {
            label,
            input: InputId(input),
            x_offset,
        }
    }
}

/// Errors found while validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Fewer than two gears (no shift is possible)
    TooFewGears { count: usize },
    /// More gears than [`MAX_GEARS`]
    TooManyGears { count: usize },
    /// Label is empty or longer than [`MAX_LABEL_LEN`]
    InvalidLabel { index: usize },
    /// Two gears share an input, so the later one could never be detected
    DuplicateInput {
        first: usize,
        second: usize,
        input: InputId,
    },
    /// Gear input is not wired on this board
    UnwiredInput { index: usize, input: InputId },
    /// Boot gear is not a valid table index
    InitialGearOutOfRange { index: usize, count: usize },
    /// Tick period of zero milliseconds
    ZeroTickPeriod,
    /// Bound sensor is not the configured kind
    SensorMismatch {
        configured: SensorKind,
        bound: SensorKind,
    },
}

/// Which shift directions are possible from a gear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftOptions {
    pub up: bool,
    pub down: bool,
}

/// Validated gear table
#[derive(Debug, Clone, Copy)]
pub struct GearTable<'a> {
    gears: &'a [GearDefinition],
}

impl<'a> GearTable<'a> {
    /// Validate a gear slice and wrap it
    pub fn new(gears: &'a [GearDefinition]) -> Result<Self, ConfigError> {
        let count = gears.len();
        if count < 2 {
            return Err(ConfigError::TooFewGears { count });
        }
        if count > MAX_GEARS {
            return Err(ConfigError::TooManyGears { count });
        }

        for (index, gear) in gears.iter().enumerate() {
            if gear.label.is_empty() || gear.label.len() > MAX_LABEL_LEN {
                return Err(ConfigError::InvalidLabel { index });
            }

            if let Some(first) = gears[..index].iter().position(|g| g.input == gear.input) {
                return Err(ConfigError::DuplicateInput {
                    first,
                    second: index,
                    input: gear.input,
                });
            }
        }

        Ok(Self { gears })
    }

    /// Number of gears
    pub fn len(&self) -> usize {
        self.gears.len()
    }

    /// Always false for a validated table
    pub fn is_empty(&self) -> bool {
        self.gears.is_empty()
    }

    /// Gear at `index`
    pub fn get(&self, index: usize) -> Option<&'a GearDefinition> {
        self.gears.get(index)
    }

    /// Iterate gears in physical order
    pub fn iter(&self) -> core::slice::Iter<'a, GearDefinition> {
        self.gears.iter()
    }

    /// Check that every gear input exists on the board
    pub fn check_wiring<I>(&self, inputs: &I) -> Result<(), ConfigError>
    where
        I: InputBank + ?Sized,
    {
        match self.gears.iter().position(|g| !inputs.contains(g.input)) {
            Some(index) => Err(ConfigError::UnwiredInput {
                index,
                input: self.gears[index].input,
            }),
            None => Ok(()),
        }
    }

    /// Find the table index for an input
    pub fn index_of(&self, input: InputId) -> Option<usize> {
        self.gears.iter().position(|g| g.input == input)
    }

    /// Shift directions available from `index`
    ///
    /// The first gear can only shift up, the last only down, and every
    /// interior gear both ways.
    pub fn shift_options(&self, index: usize) -> ShiftOptions {
        let last = self.gears.len() - 1;
        ShiftOptions {
            up: index != last,
            down: index != 0,
        }
    }
}
