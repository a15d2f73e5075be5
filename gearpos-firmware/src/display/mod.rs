//! OLED display
//!
//! The panel is a 128x32 SSD1306 on its own blocking I2C bus. The core
//! renderer draws through [`OledSurface`]; the driver below it only knows
//! about pages and commands.

pub mod ssd1306;
pub mod surface;

pub use ssd1306::Ssd1306;
pub use surface::OledSurface;
