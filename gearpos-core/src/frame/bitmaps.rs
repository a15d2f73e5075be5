//! Icon bitmaps
//!
//! One bit per pixel, most significant bit first, each row padded to a
//! whole byte.

use crate::traits::Icon;

/// A monochrome bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u16,
    pub height: u16,
    pub data: &'static [u8],
}

impl Bitmap {
    /// Bytes per row
    pub const fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Check if the pixel at (x, y) is set
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }
}

const DEGREE: [u8; 4] = [0x6f, 0x9f, 0x9f, 0x6f];

#[rustfmt::skip]
const ARROW_UP: [u8; 32] = [
    0x01, 0x80,
    0x03, 0xc0,
    0x07, 0xe0,
    0x0f, 0xf0,
    0x1f, 0xf8,
    0x3f, 0xfc,
    0x7f, 0xfe,
    0x7f, 0xfe,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x07, 0xe0,
];

#[rustfmt::skip]
const ARROW_DOWN: [u8; 32] = [
    0x07, 0xe0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x0f, 0xf0,
    0x7f, 0xfe,
    0x7f, 0xfe,
    0x3f, 0xfc,
    0x1f, 0xf8,
    0x0f, 0xf0,
    0x07, 0xe0,
    0x03, 0xc0,
    0x01, 0x80,
];

const SENSOR_FAULT: [u8; 8] = [0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x18];

/// Bitmap for an icon
pub const fn bitmap(icon: Icon) -> Bitmap {
    match icon {
        Icon::Degree => Bitmap {
            width: 4,
            height: 4,
            data: &DEGREE,
        },
        Icon::ArrowUp => Bitmap {
            width: 16,
            height: 16,
            data: &ARROW_UP,
        },
        Icon::ArrowDown => Bitmap {
            width: 16,
            height: 16,
            data: &ARROW_DOWN,
        },
        Icon::SensorFault => Bitmap {
            width: 8,
            height: 8,
            data: &SENSOR_FAULT,
        },
    }
}
