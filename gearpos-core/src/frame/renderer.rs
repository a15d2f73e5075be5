//! Frame rendering
//!
//! Draws the gear, session counter, temperature and shift arrows through a
//! [`DisplaySurface`]. A full frame redraws everything; a temperature frame
//! only repaints the temperature region.

use core::fmt::Write;

use heapless::String;

use super::layout::Layout;
use crate::config::{Features, GearTable, Orientation};
use crate::health::TemperatureStatus;
use crate::traits::{DisplayError, DisplaySurface, Font, Icon};

/// Text shown when no temperature is available
pub const UNAVAILABLE_TEXT: &str = "--.-";

/// Format a temperature as `DD.D`, truncated to tenths
///
/// Right-aligned in four columns; negative values carry a sign.
pub fn format_temperature(celsius: f32) -> String<8> {
    let tenths = (celsius * 10.0) as i32;
    let sign = if tenths < 0 { "-" } else { "" };
    let magnitude = tenths.unsigned_abs();

    let mut digits: String<8> = String::new();
    let _ = write!(digits, "{}{}.{}", sign, magnitude / 10, magnitude % 10);

    let mut out: String<8> = String::new();
    let _ = write!(out, "{:>4}", digits.as_str());
    out
}

/// Format the session counter, right-aligned in five columns
pub fn format_counter(changes: u32) -> String<12> {
    let mut out: String<12> = String::new();
    let _ = write!(out, "{:>5}", changes);
    out
}

/// Frame renderer for one orientation and feature set
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    layout: Layout,
    features: Features,
}

impl FrameRenderer {
    /// Create a renderer
    pub fn new(orientation: Orientation, features: Features) -> Self {
        Self {
            layout: Layout::new(orientation, &features),
            features,
        }
    }

    /// Layout in use
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Redraw the whole screen for a gear
    pub fn draw_full<D>(
        &self,
        display: &mut D,
        table: &GearTable<'_>,
        gear_index: usize,
        changes: u32,
        temperature: &TemperatureStatus,
    ) -> Result<(), DisplayError>
    where
        D: DisplaySurface + ?Sized,
    {
        display.clear()?;

        if self.features.arrows {
            let options = table.shift_options(gear_index);
            if options.up {
                let p = self.layout.arrow_up;
                display.draw_icon(Icon::ArrowUp, p.x, p.y)?;
            }
            if options.down {
                let p = self.layout.arrow_down;
                display.draw_icon(Icon::ArrowDown, p.x, p.y)?;
            }
        }

        if let Some(gear) = table.get(gear_index) {
            display.set_cursor(gear.x_offset as i16, self.layout.gear_baseline)?;
            display.set_font(Font::Large)?;
            display.draw_text(gear.label)?;
        }

        if self.features.session_counter {
            self.draw_counter(display, changes)?;
        }

        if self.features.thermometer {
            self.draw_temperature_region(display, temperature)?;
        }

        display.commit()
    }

    /// Repaint only the temperature region
    pub fn draw_temperature<D>(
        &self,
        display: &mut D,
        temperature: &TemperatureStatus,
    ) -> Result<(), DisplayError>
    where
        D: DisplaySurface + ?Sized,
    {
        if !self.features.thermometer {
            return Ok(());
        }
        self.draw_temperature_region(display, temperature)?;
        display.commit()
    }

    fn draw_counter<D>(&self, display: &mut D, changes: u32) -> Result<(), DisplayError>
    where
        D: DisplaySurface + ?Sized,
    {
        for rule in self.layout.counter_rules {
            display.draw_line(rule.from.x, rule.from.y, rule.to.x, rule.to.y)?;
        }
        let p = self.layout.counter_cursor;
        display.set_cursor(p.x, p.y)?;
        display.set_font(Font::Small)?;
        display.draw_text(&format_counter(changes))
    }

    fn draw_temperature_region<D>(
        &self,
        display: &mut D,
        temperature: &TemperatureStatus,
    ) -> Result<(), DisplayError>
    where
        D: DisplaySurface + ?Sized,
    {
        let region = self.layout.temperature_region;
        display.clear_rect(region.origin.x, region.origin.y, region.width, region.height)?;

        let icon = if temperature.is_unavailable() {
            Icon::SensorFault
        } else {
            Icon::Degree
        };
        let p = self.layout.degree_icon;
        display.draw_icon(icon, p.x, p.y)?;
        display.set_font(Font::Small)?;

        for rule in self.layout.temperature_rules {
            display.draw_line(rule.from.x, rule.from.y, rule.to.x, rule.to.y)?;
        }

        let p = self.layout.temperature_cursor;
        display.set_cursor(p.x, p.y)?;
        match temperature.celsius() {
            Some(celsius) => display.draw_text(&format_temperature(celsius)),
            None => display.draw_text(UNAVAILABLE_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GearDefinition, SensorKind};
    use crate::traits::TemperatureReading;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Icon(Icon, i16, i16),
        Text(String<16>),
        ClearRect,
        Commit,
    }

    /// Display that records what was drawn
    struct RecordingDisplay {
        ops: heapless::Vec<Op, 64>,
    }

    impl RecordingDisplay {
        fn new() -> Self {
            Self {
                ops: heapless::Vec::new(),
            }
        }

        fn icons(&self) -> impl Iterator<Item = Icon> + '_ {
            self.ops.iter().filter_map(|op| match op {
                Op::Icon(icon, _, _) => Some(*icon),
                _ => None,
            })
        }

        fn texts(&self) -> impl Iterator<Item = &str> + '_ {
            self.ops.iter().filter_map(|op| match op {
                Op::Text(text) => Some(text.as_str()),
                _ => None,
            })
        }
    }

    impl DisplaySurface for RecordingDisplay {
        fn sleep(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn wake(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear).unwrap();
            Ok(())
        }
        fn draw_icon(&mut self, icon: Icon, x: i16, y: i16) -> Result<(), DisplayError> {
            self.ops.push(Op::Icon(icon, x, y)).unwrap();
            Ok(())
        }
        fn set_cursor(&mut self, _x: i16, _y: i16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_font(&mut self, _font: Font) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
            self.ops.push(Op::Text(String::try_from(text).unwrap())).unwrap();
            Ok(())
        }
        fn draw_line(&mut self, _: i16, _: i16, _: i16, _: i16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn clear_rect(&mut self, _: i16, _: i16, _: u16, _: u16) -> Result<(), DisplayError> {
            self.ops.push(Op::ClearRect).unwrap();
            Ok(())
        }
        fn commit(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Commit).unwrap();
            Ok(())
        }
    }

    const SEVEN: [GearDefinition; 7] = [
        GearDefinition::new("1", 2, 64),
        GearDefinition::new("N", 3, 60),
        GearDefinition::new("2", 4, 64),
        GearDefinition::new("3", 5, 64),
        GearDefinition::new("4", 6, 64),
        GearDefinition::new("5", 7, 64),
        GearDefinition::new("6", 8, 64),
    ];

    fn valid(celsius: f32) -> TemperatureStatus {
        TemperatureStatus::Valid(TemperatureReading {
            celsius,
            source: SensorKind::RegisterSimple,
        })
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(25.0).as_str(), "25.0");
        assert_eq!(format_temperature(5.36).as_str(), " 5.3");
        assert_eq!(format_temperature(25.96).as_str(), "25.9");
        assert_eq!(format_temperature(-3.5).as_str(), "-3.5");
        assert_eq!(format_temperature(-0.5).as_str(), "-0.5");
    }

    #[test]
    fn test_format_counter() {
        assert_eq!(format_counter(0).as_str(), "    0");
        assert_eq!(format_counter(1234).as_str(), " 1234");
    }

    #[test]
    fn test_arrows_per_gear() {
        let table = GearTable::new(&SEVEN).unwrap();
        let renderer = FrameRenderer::new(Orientation::Landscape, Features::default());

        for index in 0..7 {
            let mut display = RecordingDisplay::new();
            renderer
                .draw_full(&mut display, &table, index, 0, &valid(20.0))
                .unwrap();

            let has_up = display.icons().any(|i| i == Icon::ArrowUp);
            let has_down = display.icons().any(|i| i == Icon::ArrowDown);
            match index {
                0 => assert!(has_up && !has_down),
                6 => assert!(!has_up && has_down),
                _ => assert!(has_up && has_down),
            }
        }
    }

    #[test]
    fn test_full_frame_contents() {
        let table = GearTable::new(&SEVEN).unwrap();
        let renderer = FrameRenderer::new(Orientation::Landscape, Features::default());
        let mut display = RecordingDisplay::new();

        renderer
            .draw_full(&mut display, &table, 1, 12, &valid(21.5))
            .unwrap();

        assert_eq!(display.ops.first(), Some(&Op::Clear));
        assert_eq!(display.ops.last(), Some(&Op::Commit));
        let texts: heapless::Vec<&str, 8> = display.texts().collect();
        assert_eq!(texts.as_slice(), &["N", "   12", "21.5"]);
        assert!(display.icons().any(|i| i == Icon::Degree));
    }

    #[test]
    fn test_temperature_frame_is_partial() {
        let renderer = FrameRenderer::new(Orientation::Landscape, Features::default());
        let mut display = RecordingDisplay::new();

        renderer.draw_temperature(&mut display, &valid(19.0)).unwrap();

        assert!(!display.ops.contains(&Op::Clear));
        assert_eq!(display.ops.first(), Some(&Op::ClearRect));
        assert_eq!(display.ops.last(), Some(&Op::Commit));
    }

    #[test]
    fn test_unavailable_sensor_glyph() {
        let renderer = FrameRenderer::new(Orientation::Portrait, Features::default());
        let mut display = RecordingDisplay::new();

        renderer
            .draw_temperature(&mut display, &TemperatureStatus::Unavailable(None))
            .unwrap();

        assert!(display.icons().any(|i| i == Icon::SensorFault));
        assert!(!display.icons().any(|i| i == Icon::Degree));
        assert!(display.texts().any(|t| t == UNAVAILABLE_TEXT));
    }

    #[test]
    fn test_disabled_features_not_drawn() {
        let table = GearTable::new(&SEVEN).unwrap();
        let features = Features {
            session_counter: false,
            thermometer: false,
            arrows: false,
            inverted: false,
        };
        let renderer = FrameRenderer::new(Orientation::Landscape, features);
        let mut display = RecordingDisplay::new();

        renderer
            .draw_full(&mut display, &table, 3, 7, &valid(20.0))
            .unwrap();
        assert_eq!(display.icons().count(), 0);
        let texts: heapless::Vec<&str, 8> = display.texts().collect();
        assert_eq!(texts.as_slice(), &["3"]);

        let mut display = RecordingDisplay::new();
        renderer.draw_temperature(&mut display, &valid(20.0)).unwrap();
        assert!(display.ops.is_empty());
    }
}
