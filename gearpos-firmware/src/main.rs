//! Gearpos - Gear Position Indicator Firmware
//!
//! Main firmware binary for RP2040-based gear indicators. Reads the
//! selector contacts, shows the engaged gear on a small OLED together with
//! a session shift counter and the ambient temperature, and puts the panel
//! to sleep when the selector has been idle for a while.
//!
//! Everything runs from one fixed-period tick; see
//! [`gearpos_core::scheduler::Indicator`].

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C1, PIN_18, PIN_19};
use embassy_rp::Peri;
use embassy_time::{Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use gearpos_core::config::{GearTable, SensorKind};
use gearpos_core::health::TemperatureStatus;
use gearpos_core::scheduler::{Indicator, TickReport};
use gearpos_core::state::Event;
use gearpos_drivers::sensor::{Hts221, Lm75, Thermistor, ThermistorConfig};
use gearpos_hal::I2cConfig;
use gearpos_hal_rp2040::adc::ADC_MAX;
use gearpos_hal_rp2040::{AdcInput, GpioBank, PinBank, TimedI2c};

use crate::config::{GEARS, INDICATOR, SENSOR_ADDRESS, SENSOR_TIMEOUT_MS};
use crate::display::{OledSurface, Ssd1306};
use crate::sensor::{AnySensor, SensorBus};

mod config;
mod display;
mod sensor;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});

/// Display bus clock (the panel is the only device on I2C0)
const DISPLAY_I2C_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Gearpos firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let table = match GearTable::new(&GEARS) {
        Ok(table) => table,
        Err(e) => halt("Invalid gear table", e).await,
    };
    info!("Gear table: {} gears", table.len());

    // Gear contacts (board: GPIO0-GPIO15, active low with pull-ups)
    let mut pins = PinBank::new([
        p.PIN_0.into(),
        p.PIN_1.into(),
        p.PIN_2.into(),
        p.PIN_3.into(),
        p.PIN_4.into(),
        p.PIN_5.into(),
        p.PIN_6.into(),
        p.PIN_7.into(),
        p.PIN_8.into(),
        p.PIN_9.into(),
        p.PIN_10.into(),
        p.PIN_11.into(),
        p.PIN_12.into(),
        p.PIN_13.into(),
        p.PIN_14.into(),
        p.PIN_15.into(),
    ]);
    let inputs = match GpioBank::from_pins(&mut pins, table.iter().map(|gear| gear.input.raw())) {
        Ok(inputs) => inputs,
        Err(e) => halt("Gear inputs unavailable", e).await,
    };

    // Display (board: I2C0, SDA=GPIO16, SCL=GPIO17)
    let mut display_config = i2c::Config::default();
    display_config.frequency = DISPLAY_I2C_HZ;
    let display_bus = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, display_config);
    let mut surface = OledSurface::new(Ssd1306::new(display_bus, INDICATOR.orientation));
    if let Err(e) = surface.init(INDICATOR.features.inverted) {
        halt("Display init failed", e).await;
    }
    info!("Display initialized");

    let sensor_config = I2cConfig {
        timeout_ms: SENSOR_TIMEOUT_MS,
        ..I2cConfig::STANDARD
    };

    // Temperature source (board: ADC0=GPIO26, or I2C1 with SDA=GPIO18, SCL=GPIO19)
    let sensor = if !INDICATOR.features.thermometer {
        None
    } else {
        let sensor = match INDICATOR.sensor {
            SensorKind::AnalogThermistor => {
                let adc = Adc::new_blocking(p.ADC, adc::Config::default());
                let channel = Channel::new_pin(p.PIN_26, Pull::None);
                AnySensor::Thermistor(Thermistor::new(
                    AdcInput::new(adc, channel),
                    ThermistorConfig {
                        adc_max: ADC_MAX,
                        ..Default::default()
                    },
                ))
            }
            SensorKind::RegisterSimple => {
                let bus = sensor_bus(p.I2C1, p.PIN_19, p.PIN_18, &sensor_config);
                AnySensor::Simple(Lm75::new(bus, SENSOR_ADDRESS, INDICATOR.register_format))
            }
            SensorKind::RegisterCalibrated => {
                // Identity check and power-up happen on the first sample
                let bus = sensor_bus(p.I2C1, p.PIN_19, p.PIN_18, &sensor_config);
                AnySensor::Calibrated(Hts221::new(bus, SENSOR_ADDRESS))
            }
        };
        info!("Temperature source: {}", INDICATOR.sensor);
        Some(sensor)
    };

    let mut indicator = match Indicator::new(INDICATOR, table, inputs, sensor, surface) {
        Ok(indicator) => indicator,
        Err(e) => halt("Invalid indicator configuration", e).await,
    };

    match indicator.start() {
        Ok(report) => log_report(&table, &report),
        Err(e) => halt("Display unavailable", e).await,
    }

    info!(
        "Indicator running: tick={}ms, sleep after {}ms",
        INDICATOR.tick_ms,
        INDICATOR.sleep_delay_ms()
    );

    let mut ticker = Ticker::every(Duration::from_millis(INDICATOR.tick_ms as u64));

    loop {
        ticker.next().await;

        let report = indicator.tick();
        if let Some(e) = report.display_error {
            warn!("Display update failed, retrying: {}", e);
        }
        log_report(&table, &report);
    }
}

/// Bring up the sensor bus on I2C1
fn sensor_bus(
    peri: Peri<'static, I2C1>,
    scl: Peri<'static, PIN_19>,
    sda: Peri<'static, PIN_18>,
    config: &I2cConfig,
) -> SensorBus {
    let mut bus_config = i2c::Config::default();
    bus_config.frequency = config.frequency;
    TimedI2c::new(I2c::new_async(peri, scl, sda, Irqs, bus_config), config)
}

/// Log what a tick did
fn log_report(table: &GearTable<'_>, report: &TickReport) {
    for event in report.events.iter() {
        match event {
            Event::GearChanged { index, changes } => {
                let label = table.get(*index).map_or("?", |gear| gear.label);
                info!("Gear {} engaged ({} changes)", label, changes);
            }
            Event::WakeRequested => debug!("Display wake"),
            Event::SleepRequested => info!("Display sleeping (tick {})", report.tick),
            Event::TemperatureSampled(status) => match status {
                TemperatureStatus::Valid(reading) => {
                    debug!("Temperature: {}C", reading.celsius)
                }
                TemperatureStatus::Stale { reading, fault } => {
                    debug!("Temperature stale at {}C ({})", reading.celsius, fault)
                }
                TemperatureStatus::Unavailable(_) => debug!("Temperature unavailable"),
            },
            Event::SensorFault(e) => warn!("Sensor fault: {}", e),
        }
    }
}

/// Stop here, reporting the fault once a second
async fn halt<E: Format>(what: &'static str, err: E) -> ! {
    loop {
        error!("{}: {}", what, err);
        Timer::after_secs(1).await;
    }
}
