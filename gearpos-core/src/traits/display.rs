//! Display control surface
//!
//! The indicator draws through this trait and never touches pixels itself.
//! Implementations own the frame buffer and the panel's power commands.

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus communication with the panel failed
    Bus,
    /// Drawing attempted before the panel was initialized
    NotInitialized,
}

/// Static icons available to the frame layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    /// Small degree ring next to the temperature
    Degree,
    /// "Can shift up" arrow
    ArrowUp,
    /// "Can shift down" arrow
    ArrowDown,
    /// Shown in place of the temperature when the sensor is unavailable
    SensorFault,
}

/// Text fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Default small font (counter, temperature)
    #[default]
    Small,
    /// Large bold font for the gear label
    Large,
}

/// Trait for the display device
///
/// Coordinates are in pixels of the rotated (logical) screen. Drawing
/// calls only touch the frame buffer; [`DisplaySurface::commit`] pushes it
/// to the panel.
pub trait DisplaySurface {
    /// Put the panel into low-power sleep
    fn sleep(&mut self) -> Result<(), DisplayError>;

    /// Wake the panel from sleep
    fn wake(&mut self) -> Result<(), DisplayError>;

    /// Clear the whole frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw an icon with its top-left corner at (x, y)
    fn draw_icon(&mut self, icon: Icon, x: i16, y: i16) -> Result<(), DisplayError>;

    /// Move the text cursor
    fn set_cursor(&mut self, x: i16, y: i16) -> Result<(), DisplayError>;

    /// Select the font used by [`DisplaySurface::draw_text`]
    fn set_font(&mut self, font: Font) -> Result<(), DisplayError>;

    /// Draw text at the cursor
    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Draw a one-pixel line
    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) -> Result<(), DisplayError>;

    /// Clear a rectangle to background
    fn clear_rect(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError>;

    /// Flush the frame buffer to the panel
    fn commit(&mut self) -> Result<(), DisplayError>;
}
