//! Indicator tick loop
//!
//! [`Indicator`] owns the gear table, the runtime state, the input bank,
//! the temperature sampler and the display. The firmware calls
//! [`Indicator::start`] once and then [`Indicator::tick`] every
//! `tick_ms` milliseconds. Each call runs to completion; nothing here
//! suspends.
//!
//! Display commands are queued as pending work and issued at the end of
//! the tick. A command that fails stays pending and is retried on the
//! next tick, so a bus glitch never leaves a stale gear on screen.

use gearpos_hal::InputBank;

use super::report::TickReport;
use crate::config::{ConfigError, GearTable, IndicatorConfig};
use crate::frame::{FrameRenderer, FrameRequest};
use crate::health::TemperatureStatus;
use crate::sampler::TemperatureSampler;
use crate::state::{Event, IndicatorState};
use crate::traits::{DisplayError, DisplaySurface, TemperatureSource};

/// Display work not yet carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PendingDisplay {
    wake: bool,
    sleep: bool,
    full_frame: bool,
    temperature: bool,
}

/// Gear indicator engine
pub struct Indicator<'a, I, S, D> {
    config: IndicatorConfig,
    table: GearTable<'a>,
    state: IndicatorState,
    inputs: I,
    sampler: Option<TemperatureSampler<S>>,
    display: D,
    renderer: FrameRenderer,
    pending: PendingDisplay,
    ticks: u32,
}

impl<'a, I, S, D> Indicator<'a, I, S, D>
where
    I: InputBank,
    S: TemperatureSource,
    D: DisplaySurface,
{
    /// Build an indicator from validated parts
    ///
    /// Fails if the configuration does not fit the table, a gear input is
    /// missing from the bank, or the sensor is not the configured kind.
    /// The sensor is ignored when the thermometer feature is off.
    pub fn new(
        config: IndicatorConfig,
        table: GearTable<'a>,
        inputs: I,
        sensor: Option<S>,
        display: D,
    ) -> Result<Self, ConfigError> {
        config.validate(&table)?;
        table.check_wiring(&inputs)?;

        let sampler = if config.features.thermometer {
            if let Some(bound) = sensor.as_ref().map(|s| s.kind()) {
                if bound != config.sensor {
                    return Err(ConfigError::SensorMismatch {
                        configured: config.sensor,
                        bound,
                    });
                }
            }
            sensor.map(TemperatureSampler::new)
        } else {
            None
        };

        Ok(Self {
            state: IndicatorState::new(
                config.sleep_delay_ticks,
                config.sample_delay_ticks,
                config.initial_gear,
            ),
            renderer: FrameRenderer::new(config.orientation, config.features),
            config,
            table,
            inputs,
            sampler,
            display,
            pending: PendingDisplay::default(),
            ticks: 0,
        })
    }

    /// Boot pass: first sample, wake, and a full frame for the boot gear
    ///
    /// Any display failure here is returned as an error; the panel is
    /// not usable.
    pub fn start(&mut self) -> Result<TickReport, DisplayError> {
        let mut report = TickReport::new(0);

        self.sample(&mut report);

        self.request_wake(&mut report);
        self.service_display(&mut report);

        match report.display_error {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    /// Run one tick
    ///
    /// Always completes every step. A failed display command is reported
    /// in [`TickReport::display_error`] and retried on the next tick.
    pub fn tick(&mut self) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);
        let mut report = TickReport::new(self.ticks);

        let change = self.state.scan.scan(&self.table, &self.inputs);
        if let Some(change) = change {
            let changes = self.state.counter.record_change();
            self.state.displayed_gear = change.index;
            report.push_event(Event::GearChanged {
                index: change.index,
                changes,
            });

            self.state.sleep.wake();
            self.request_wake(&mut report);
        }

        // A tick that confirmed a change is not idle
        if change.is_none() && self.state.sleep.tick() {
            self.pending.sleep = true;
            self.pending.wake = false;
            report.push_event(Event::SleepRequested);
        }

        if self.config.features.thermometer && self.state.cadence.tick() {
            self.sample(&mut report);
            self.pending.temperature = true;
        }

        self.service_display(&mut report);
        report
    }

    fn request_wake(&mut self, report: &mut TickReport) {
        self.pending.wake = true;
        self.pending.sleep = false;
        self.pending.full_frame = true;
        report.push_event(Event::WakeRequested);
    }

    /// Issue pending display commands, keeping the ones that fail
    fn service_display(&mut self, report: &mut TickReport) {
        if self.pending.wake {
            match self.display.wake() {
                Ok(()) => self.pending.wake = false,
                Err(err) => report.record_display_error(err),
            }
        }

        if self.pending.full_frame {
            match self.draw_full() {
                Ok(()) => {
                    // The full frame carries the latest temperature
                    self.pending.full_frame = false;
                    self.pending.temperature = false;
                    report.push_frame(FrameRequest::Full);
                }
                Err(err) => report.record_display_error(err),
            }
        } else if self.pending.temperature {
            let status = self.state.temperature.status();
            match self.renderer.draw_temperature(&mut self.display, &status) {
                Ok(()) => {
                    self.pending.temperature = false;
                    report.push_frame(FrameRequest::Temperature);
                }
                Err(err) => report.record_display_error(err),
            }
        }

        if self.pending.sleep {
            match self.display.sleep() {
                Ok(()) => self.pending.sleep = false,
                Err(err) => report.record_display_error(err),
            }
        }
    }

    fn sample(&mut self, report: &mut TickReport) {
        let Some(sampler) = self.sampler.as_mut() else {
            return;
        };

        let outcome = sampler.sample(&mut self.state.temperature);
        if let Some(fault) = outcome.fault {
            report.push_event(Event::SensorFault(fault));
        }
        report.push_event(Event::TemperatureSampled(outcome.status));
    }

    fn draw_full(&mut self) -> Result<(), DisplayError> {
        self.renderer.draw_full(
            &mut self.display,
            &self.table,
            self.state.displayed_gear,
            self.state.counter.changes(),
            &self.state.temperature.status(),
        )
    }

    /// Check if display work is waiting for a retry
    pub fn display_pending(&self) -> bool {
        self.pending != PendingDisplay::default()
    }

    /// Active configuration
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Gear table
    pub fn table(&self) -> &GearTable<'a> {
        &self.table
    }

    /// Runtime state
    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    /// Current temperature status
    pub fn temperature(&self) -> TemperatureStatus {
        self.state.temperature.status()
    }

    /// Ticks run since boot
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Get access to the input bank
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// Get mutable access to the input bank
    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    /// Get access to the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get mutable access to the display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Features, GearDefinition, SensorKind};
    use crate::traits::{Font, Icon, SensorError};
    use gearpos_hal::InputId;

    const SEVEN: [GearDefinition; 7] = [
        GearDefinition::new("1", 2, 64),
        GearDefinition::new("N", 3, 60),
        GearDefinition::new("2", 4, 64),
        GearDefinition::new("3", 5, 64),
        GearDefinition::new("4", 6, 64),
        GearDefinition::new("5", 7, 64),
        GearDefinition::new("6", 8, 64),
    ];

    struct MockInputs {
        low: Option<u8>,
    }

    impl InputBank for MockInputs {
        fn is_high(&self, id: InputId) -> bool {
            self.low != Some(id.raw())
        }

        fn contains(&self, id: InputId) -> bool {
            (2..=8).contains(&id.raw())
        }
    }

    struct MockSensor {
        result: Result<f32, SensorError>,
        reads: u32,
    }

    impl TemperatureSource for MockSensor {
        fn kind(&self) -> SensorKind {
            SensorKind::RegisterSimple
        }

        fn read_celsius(&mut self) -> Result<f32, SensorError> {
            self.reads += 1;
            self.result
        }
    }

    /// Counts down a number of failures, then succeeds
    fn fail_once_more(remaining: &mut u32) -> Result<(), DisplayError> {
        if *remaining > 0 {
            *remaining -= 1;
            return Err(DisplayError::Bus);
        }
        Ok(())
    }

    #[derive(Default)]
    struct MockDisplay {
        awake: bool,
        sleeps: u32,
        wakes: u32,
        full_frames: u32,
        commits: u32,
        fail_sleeps: u32,
        fail_wakes: u32,
        fail_commits: u32,
    }

    impl DisplaySurface for MockDisplay {
        fn sleep(&mut self) -> Result<(), DisplayError> {
            fail_once_more(&mut self.fail_sleeps)?;
            self.awake = false;
            self.sleeps += 1;
            Ok(())
        }
        fn wake(&mut self) -> Result<(), DisplayError> {
            fail_once_more(&mut self.fail_wakes)?;
            self.awake = true;
            self.wakes += 1;
            Ok(())
        }
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.full_frames += 1;
            Ok(())
        }
        fn draw_icon(&mut self, _: Icon, _: i16, _: i16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_cursor(&mut self, _: i16, _: i16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn set_font(&mut self, _: Font) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_text(&mut self, _: &str) -> Result<(), DisplayError> {
            Ok(())
        }
        fn draw_line(&mut self, _: i16, _: i16, _: i16, _: i16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn clear_rect(&mut self, _: i16, _: i16, _: u16, _: u16) -> Result<(), DisplayError> {
            Ok(())
        }
        fn commit(&mut self) -> Result<(), DisplayError> {
            fail_once_more(&mut self.fail_commits)?;
            self.commits += 1;
            Ok(())
        }
    }

    fn indicator(
        config: IndicatorConfig,
        sensor: Result<f32, SensorError>,
    ) -> Indicator<'static, MockInputs, MockSensor, MockDisplay> {
        let table = GearTable::new(&SEVEN).unwrap();
        Indicator::new(
            config,
            table,
            MockInputs { low: None },
            Some(MockSensor {
                result: sensor,
                reads: 0,
            }),
            MockDisplay::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_boot_pass() {
        let mut ind = indicator(IndicatorConfig::default(), Ok(24.0));
        let report = ind.start().unwrap();

        assert_eq!(report.tick, 0);
        assert!(report.sampled());
        assert!(report.events.contains(&Event::WakeRequested));
        assert_eq!(report.frames.as_slice(), &[FrameRequest::Full]);
        assert_eq!(ind.state().displayed_gear, 1);
        assert_eq!(ind.temperature().celsius(), Some(24.0));
        assert!(ind.display().awake);
    }

    #[test]
    fn test_first_detection_draws_but_does_not_count() {
        let mut ind = indicator(IndicatorConfig::default(), Ok(20.0));
        ind.start().unwrap();
        ind.inputs_mut().low = Some(4);

        let report = ind.tick();
        assert!(report.is_quiet());

        ind.tick();
        let report = ind.tick();
        assert_eq!(report.gear_change(), Some((2, 0)));
        assert_eq!(report.events[1], Event::WakeRequested);
        assert_eq!(report.frames.as_slice(), &[FrameRequest::Full]);
        assert_eq!(ind.state().displayed_gear, 2);

        ind.inputs_mut().low = Some(5);
        let change = (0..7).find_map(|_| ind.tick().gear_change());
        assert_eq!(change, Some((3, 1)));
    }

    #[test]
    fn test_sleep_and_wake() {
        let config = IndicatorConfig {
            sleep_delay_ticks: 20,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        ind.start().unwrap();

        let slept: heapless::Vec<u32, 4> = (0..40)
            .map(|_| ind.tick())
            .filter(|r| r.slept())
            .map(|r| r.tick)
            .collect();
        assert_eq!(slept.as_slice(), &[20]);
        assert!(!ind.display().awake);
        assert_eq!(ind.display().sleeps, 1);

        ind.inputs_mut().low = Some(2);
        let report = (0..7)
            .map(|_| ind.tick())
            .find(|r| r.gear_change().is_some())
            .unwrap();
        assert!(report.events.contains(&Event::WakeRequested));
        assert!(ind.display().awake);
        assert_eq!(ind.state().sleep.elapsed_idle_ticks(), 0);
    }

    #[test]
    fn test_sleep_fires_threshold_ticks_after_change() {
        let config = IndicatorConfig {
            sleep_delay_ticks: 20,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        ind.start().unwrap();
        ind.inputs_mut().low = Some(4);

        let changed_at = (0..7)
            .map(|_| ind.tick())
            .find(|r| r.gear_change().is_some())
            .unwrap()
            .tick;
        assert_eq!(ind.state().sleep.elapsed_idle_ticks(), 0);

        let slept_at = (0..40)
            .map(|_| ind.tick())
            .find(|r| r.slept())
            .unwrap()
            .tick;
        assert_eq!(slept_at, changed_at + 20);
    }

    #[test]
    fn test_failed_wake_retried() {
        let config = IndicatorConfig {
            sleep_delay_ticks: 4,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        ind.start().unwrap();
        assert!((0..4).map(|_| ind.tick()).any(|r| r.slept()));
        assert!(!ind.display().awake);

        ind.display_mut().fail_wakes = 3;
        ind.inputs_mut().low = Some(4);
        let report = (0..7)
            .map(|_| ind.tick())
            .find(|r| r.gear_change().is_some())
            .unwrap();
        assert_eq!(report.gear_change(), Some((2, 0)));
        assert!(report.events.contains(&Event::WakeRequested));
        assert_eq!(report.display_error, Some(DisplayError::Bus));
        assert_eq!(ind.state().displayed_gear, 2);
        assert!(!ind.display().awake);
        assert!(ind.display_pending());

        let retries = (0..30)
            .map(|_| ind.tick())
            .position(|r| r.display_error.is_none());
        assert_eq!(retries, Some(2));
        assert!(ind.display().awake);
        assert!(!ind.display_pending());
        assert!(!ind.state().sleep.is_asleep());
    }

    #[test]
    fn test_failed_frame_redrawn_next_tick() {
        let mut ind = indicator(IndicatorConfig::default(), Ok(20.0));
        ind.start().unwrap();
        let commits = ind.display().commits;

        ind.display_mut().fail_commits = 1;
        ind.inputs_mut().low = Some(4);
        let report = (0..7)
            .map(|_| ind.tick())
            .find(|r| r.gear_change().is_some())
            .unwrap();
        assert!(report.frames.is_empty());
        assert_eq!(report.display_error, Some(DisplayError::Bus));
        assert!(ind.display_pending());

        let report = ind.tick();
        assert!(report.gear_change().is_none());
        assert_eq!(report.frames.as_slice(), &[FrameRequest::Full]);
        assert_eq!(report.display_error, None);
        assert_eq!(ind.display().commits, commits + 1);
        assert!(!ind.display_pending());
    }

    #[test]
    fn test_failed_sleep_retried() {
        let config = IndicatorConfig {
            sleep_delay_ticks: 5,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        ind.start().unwrap();
        ind.display_mut().fail_sleeps = 1;

        let report = (0..5).map(|_| ind.tick()).last().unwrap();
        assert!(report.slept());
        assert_eq!(report.display_error, Some(DisplayError::Bus));
        assert!(ind.display().awake);

        let report = ind.tick();
        assert!(!report.slept());
        assert_eq!(report.display_error, None);
        assert!(!ind.display().awake);
        assert_eq!(ind.display().sleeps, 1);
        assert!(!ind.display_pending());
    }

    #[test]
    fn test_sample_cadence() {
        let config = IndicatorConfig {
            sample_delay_ticks: 3,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        ind.start().unwrap();

        let sampled: heapless::Vec<u32, 4> = (0..15)
            .map(|_| ind.tick())
            .filter(|r| r.sampled())
            .map(|r| r.tick)
            .collect();
        assert_eq!(sampled.as_slice(), &[5, 10, 15]);
    }

    #[test]
    fn test_sensor_fault_reported() {
        let config = IndicatorConfig {
            sample_delay_ticks: 0,
            ..Default::default()
        };
        let mut ind = indicator(config, Err(SensorError::CalibrationDegenerate));
        let report = ind.start().unwrap();

        assert_eq!(
            report.events[0],
            Event::SensorFault(SensorError::CalibrationDegenerate)
        );
        assert!(ind.temperature().is_unavailable());

        let report = ind.tick();
        assert!(!report.sampled());
        let report = ind.tick();
        assert!(report.sampled());
        assert_eq!(report.frames.as_slice(), &[FrameRequest::Temperature]);
    }

    #[test]
    fn test_thermometer_disabled_never_samples() {
        let config = IndicatorConfig {
            features: Features {
                thermometer: false,
                ..Default::default()
            },
            sample_delay_ticks: 0,
            ..Default::default()
        };
        let mut ind = indicator(config, Ok(20.0));
        assert!(!ind.start().unwrap().sampled());
        for _ in 0..10 {
            assert!(!ind.tick().sampled());
        }
        assert_eq!(ind.temperature(), TemperatureStatus::Unavailable(None));
    }

    #[test]
    fn test_unwired_gear_rejected() {
        let gears = [
            GearDefinition::new("1", 2, 64),
            GearDefinition::new("N", 30, 60),
        ];
        let table = GearTable::new(&gears).unwrap();
        let result = Indicator::new(
            IndicatorConfig::default(),
            table,
            MockInputs { low: None },
            None::<MockSensor>,
            MockDisplay::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::UnwiredInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_sensor_kind_mismatch_rejected() {
        let sensor = || MockSensor {
            result: Ok(20.0),
            reads: 0,
        };
        let config = IndicatorConfig {
            sensor: SensorKind::AnalogThermistor,
            ..Default::default()
        };
        let result = Indicator::new(
            config,
            GearTable::new(&SEVEN).unwrap(),
            MockInputs { low: None },
            Some(sensor()),
            MockDisplay::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::SensorMismatch {
                configured: SensorKind::AnalogThermistor,
                bound: SensorKind::RegisterSimple,
            })
        ));

        // Nothing is sampled without the thermometer, so any sensor will do
        let config = IndicatorConfig {
            features: Features {
                thermometer: false,
                ..Default::default()
            },
            ..config
        };
        let result = Indicator::new(
            config,
            GearTable::new(&SEVEN).unwrap(),
            MockInputs { low: None },
            Some(sensor()),
            MockDisplay::default(),
        );
        assert!(result.is_ok());
    }
}
