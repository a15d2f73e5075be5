//! Indicator drawing surface on the OLED panel

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use gearpos_core::frame::bitmap;
use gearpos_core::traits::{DisplayError, DisplaySurface, Font, Icon};

use super::ssd1306::Ssd1306;

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// [`DisplaySurface`] backed by an SSD1306 frame buffer
pub struct OledSurface<I2C> {
    panel: Ssd1306<I2C>,
    cursor: Point,
    font: Font,
    initialized: bool,
}

impl<I2C> OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(panel: Ssd1306<I2C>) -> Self {
        Self {
            panel,
            cursor: Point::zero(),
            font: Font::Small,
            initialized: false,
        }
    }

    /// Run the panel init sequence
    pub fn init(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.panel.init(inverted)?;
        self.initialized = true;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C> DisplaySurface for OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn sleep(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.panel.set_display_on(false)
    }

    fn wake(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.panel.set_display_on(true)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.panel.clear_buffer();
        Ok(())
    }

    fn draw_icon(&mut self, icon: Icon, x: i16, y: i16) -> Result<(), DisplayError> {
        let bitmap = bitmap(icon);
        for row in 0..bitmap.height {
            for col in 0..bitmap.width {
                if bitmap.pixel(col, row) {
                    self.panel
                        .set_pixel(x as i32 + col as i32, y as i32 + row as i32, true);
                }
            }
        }
        Ok(())
    }

    fn set_cursor(&mut self, x: i16, y: i16) -> Result<(), DisplayError> {
        self.cursor = Point::new(x as i32, y as i32);
        Ok(())
    }

    fn set_font(&mut self, font: Font) -> Result<(), DisplayError> {
        self.font = font;
        Ok(())
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        // Large labels sit on their baseline, small text hangs from its top
        let (style, baseline) = match self.font {
            Font::Large => (
                MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
                Baseline::Alphabetic,
            ),
            Font::Small => (
                MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
                Baseline::Top,
            ),
        };
        let next = Text::with_baseline(text, self.cursor, style, baseline).draw(&mut self.panel);
        self.cursor = unwrap_infallible(next);
        Ok(())
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) -> Result<(), DisplayError> {
        let line = Line::new(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));
        unwrap_infallible(line.draw(&mut self.panel));
        Ok(())
    }

    fn clear_rect(&mut self, x: i16, y: i16, width: u16, height: u16) -> Result<(), DisplayError> {
        let rect = Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off));
        unwrap_infallible(rect.draw(&mut self.panel));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.panel.flush()
    }
}
