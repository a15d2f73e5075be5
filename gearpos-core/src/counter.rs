//! Session change counter
//!
//! Counts genuine gear changes since power-up. The first detection after
//! boot only discovers the current gear and is not counted.

/// Session change counter
#[derive(Debug, Clone)]
pub struct SessionCounter {
    /// Confirmed changes this session
    changes: u32,
    /// True until the first detection has been seen
    first_run: bool,
}

impl Default for SessionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCounter {
    /// Create the boot state
    pub const fn new() -> Self {
        Self {
            changes: 0,
            first_run: true,
        }
    }

    /// Record a confirmed gear change
    ///
    /// Returns the count after the update.
    pub fn record_change(&mut self) -> u32 {
        if self.first_run {
            self.first_run = false;
        } else {
            self.changes = self.changes.saturating_add(1);
        }
        self.changes
    }

    /// Changes counted so far
    pub fn changes(&self) -> u32 {
        self.changes
    }

    /// Check if no detection has been seen yet
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }
}
