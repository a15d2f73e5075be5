//! Gear scanner
//!
//! Reads one gear input per tick, round robin over the table, so the cost
//! of polling N inputs is spread across N ticks.
//!
//! Debouncing is identifier based: an asserted input only counts as a
//! change when it differs from the last confirmed one. Holding a gear
//! therefore produces exactly one event.

use gearpos_hal::{InputBank, InputId};

use crate::config::GearTable;

/// A confirmed transition to a new gear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GearChanged {
    /// Table index of the engaged gear
    pub index: usize,
    /// Input that was found asserted
    pub input: InputId,
}

/// Scanner state
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    /// Index that the next scan will read
    current_index: usize,
    /// Input of the most recently confirmed gear (none before the first)
    last_active: Option<InputId>,
}

impl ScanState {
    /// Create the boot state
    pub const fn new() -> Self {
        Self {
            current_index: 0,
            last_active: None,
        }
    }

    /// Index that the next scan will read
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Input of the most recently confirmed gear
    pub fn last_active(&self) -> Option<InputId> {
        self.last_active
    }

    /// Scan one gear and advance to the next
    ///
    /// Returns the change if the scanned input is asserted (pulled low) and
    /// is not the already-confirmed gear.
    pub fn scan<I>(&mut self, table: &GearTable<'_>, inputs: &I) -> Option<GearChanged>
    where
        I: InputBank + ?Sized,
    {
        let count = table.len();
        let index = self.current_index % count;
        self.current_index = (index + 1) % count;

        let gear = table.get(index)?;
        if !inputs.is_asserted(gear.input) || self.last_active == Some(gear.input) {
            return None;
        }

        self.last_active = Some(gear.input);
        Some(GearChanged {
            index,
            input: gear.input,
        })
    }
}
