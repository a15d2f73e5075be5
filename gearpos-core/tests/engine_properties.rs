//! Properties of the scan/count/sleep engine over arbitrary input scripts

use gearpos_core::config::{GearDefinition, GearTable, IndicatorConfig, SensorKind};
use gearpos_core::counter::SessionCounter;
use gearpos_core::scan::ScanState;
use gearpos_core::scheduler::Indicator;
use gearpos_core::sleep::SleepTimer;
use gearpos_core::traits::{
    DisplayError, DisplaySurface, Font, Icon, SensorError, TemperatureSource,
};
use gearpos_hal::{InputBank, InputId};
use proptest::prelude::*;

const SEVEN: [GearDefinition; 7] = [
    GearDefinition::new("1", 2, 64),
    GearDefinition::new("N", 3, 60),
    GearDefinition::new("2", 4, 64),
    GearDefinition::new("3", 5, 64),
    GearDefinition::new("4", 6, 64),
    GearDefinition::new("5", 7, 64),
    GearDefinition::new("6", 8, 64),
];

struct Selector {
    low: Option<u8>,
}

impl InputBank for Selector {
    fn is_high(&self, id: InputId) -> bool {
        self.low != Some(id.raw())
    }

    fn contains(&self, id: InputId) -> bool {
        (2..=8).contains(&id.raw())
    }
}

struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn sleep(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
    fn wake(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
    fn clear(&mut self) -> Result<(), DisplayError> {
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
        Ok(())
    }
}

struct FixedSensor;

impl TemperatureSource for FixedSensor {
    fn kind(&self) -> SensorKind {
        SensorKind::RegisterSimple
    }

    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        Ok(21.0)
    }
}

/// Gear sequences where consecutive entries differ
fn transitions() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..7, 1..30).prop_map(|mut gears| {
        gears.dedup();
        gears
    })
}

proptest! {
    #[test]
    fn scan_index_is_round_robin(ticks in 0usize..500, engaged in proptest::option::of(2u8..=8)) {
        let table = GearTable::new(&SEVEN).unwrap();
        let inputs = Selector { low: engaged };
        let mut scan = ScanState::new();

        let mut visited = [0usize; 7];
        for k in 1..=ticks {
            visited[scan.current_index()] += 1;
            scan.scan(&table, &inputs);
            prop_assert_eq!(scan.current_index(), k % 7);
        }

        // No gear is skipped over any full window
        let rounds = ticks / 7;
        for count in visited {
            prop_assert!(count >= rounds);
        }
    }

    #[test]
    fn counter_matches_transitions(script in transitions(), hold in 1usize..4) {
        let table = GearTable::new(&SEVEN).unwrap();
        let mut scan = ScanState::new();
        let mut counter = SessionCounter::new();
        let mut inputs = Selector { low: None };

        for &gear in &script {
            inputs.low = Some(SEVEN[gear].input.raw());
            // Holding for several full rounds must not re-count
            for _ in 0..7 * hold {
                if scan.scan(&table, &inputs).is_some() {
                    counter.record_change();
                }
            }
        }

        prop_assert_eq!(counter.changes() as usize, script.len() - 1);
    }

    #[test]
    fn sleep_fires_once_per_idle_period(threshold in 1u32..200, extra in 0u32..200) {
        let mut timer = SleepTimer::new(threshold);
        let fired: Vec<u32> = (1..=threshold + extra).filter(|_| timer.tick()).collect();
        prop_assert_eq!(fired, vec![threshold]);
    }
}

#[test]
fn seven_gear_session() {
    let table = GearTable::new(&SEVEN).unwrap();
    let mut indicator = Indicator::new(
        IndicatorConfig::default(),
        table,
        Selector { low: None },
        Some(FixedSensor),
        NullDisplay,
    )
    .unwrap();
    indicator.start().unwrap();

    // Boot in neutral, then ride up through every gear
    let mut changes = Vec::new();
    for gear in [1usize, 0, 2, 3, 4, 5, 6] {
        indicator.inputs_mut().low = Some(SEVEN[gear].input.raw());
        for _ in 0..7 {
            if let Some(change) = indicator.tick().gear_change() {
                changes.push(change);
            }
        }
    }
    assert_eq!(
        changes,
        vec![(1, 0), (0, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6)]
    );

    // Park in top gear until the display sleeps
    let mut slept_at = None;
    for _ in 0..10_000 {
        let report = indicator.tick();
        if report.slept() {
            slept_at = Some(indicator.state().sleep.elapsed_idle_ticks());
        }
    }
    assert_eq!(slept_at, Some(10_000));
    assert!(indicator.state().sleep.is_asleep());
    assert_eq!(indicator.temperature().celsius(), Some(21.0));
}
