//! Frame layer
//!
//! Turns indicator state into draw calls on a [`DisplaySurface`](crate::traits::DisplaySurface).

pub mod bitmaps;
pub mod layout;
pub mod renderer;

pub use bitmaps::{bitmap, Bitmap};
pub use layout::{Layout, Point, Region, Rule};
pub use renderer::{format_counter, format_temperature, FrameRenderer, UNAVAILABLE_TEXT};

/// Redraw requested by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameRequest {
    /// Whole screen (gear changed, or boot)
    Full,
    /// Temperature region only
    Temperature,
}
