//! Build script for gearpos-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates indicator.toml at compile time
//! - Generates the gear table and indicator configuration constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest gear table the core accepts
const MAX_GEARS: usize = 8;
/// Longest gear label in bytes
const MAX_LABEL_LEN: usize = 7;
/// GPIOs usable for gear contacts
const GEAR_PINS: std::ops::RangeInclusive<i64> = 0..=15;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Print a boxed error report and abort the build
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate indicator.toml configuration at compile time
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=indicator.toml");

    let config_path = Path::new("indicator.toml");

    if !config_path.exists() {
        fail(
            "indicator.toml not found",
            &["Create one in the gearpos-firmware directory".to_string()],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read indicator.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in indicator.toml",
            &e.to_string().lines().map(truncate).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_display(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_gears(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid indicator configuration", &errors);
    }

    println!("cargo:warning=indicator.toml validated successfully");
    config
}

fn truncate(line: &str) -> String {
    if line.len() > 62 {
        format!("{}...", &line[..59])
    } else {
        line.to_string()
    }
}

fn get_str<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    config.get(section)?.get(key)?.as_str()
}

fn get_int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn get_bool(config: &toml::Value, section: &str, key: &str, default: bool) -> bool {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(orientation) = get_str(config, "display", "orientation") {
        if !["landscape", "portrait"].contains(&orientation) {
            errors.push("[display] orientation must be 'landscape' or 'portrait'".to_string());
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["tick_ms", "sleep_delay_ticks", "sample_delay_ticks"] {
        if let Some(value) = get_int(config, "timing", key) {
            if !(0..=u32::MAX as i64).contains(&value) {
                errors.push(format!("[timing] {} must fit in 32 bits", key));
            }
        }
    }
    if get_int(config, "timing", "tick_ms") == Some(0) {
        errors.push("[timing] tick_ms must be greater than zero".to_string());
    }
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    let kind = get_str(config, "sensor", "kind").unwrap_or("register_simple");
    if !["analog_thermistor", "register_simple", "register_calibrated"].contains(&kind) {
        errors.push(format!("[sensor] unknown kind '{}'", kind));
    }

    if let Some(format) = get_str(config, "sensor", "format") {
        if !["half_degree", "q8_8"].contains(&format) {
            errors.push("[sensor] format must be 'half_degree' or 'q8_8'".to_string());
        }
    }

    if let Some(address) = get_int(config, "sensor", "address") {
        if !(0x08..=0x77).contains(&address) {
            errors.push("[sensor] address must be a 7-bit address (0x08-0x77)".to_string());
        }
    }

    if let Some(timeout) = get_int(config, "sensor", "timeout_ms") {
        if !(1..=1000).contains(&timeout) {
            errors.push("[sensor] timeout_ms must be 1-1000".to_string());
        }
    }
}

fn validate_gears(config: &toml::Value, errors: &mut Vec<String>) {
    let gears = match config.get("gear").and_then(|g| g.as_array()) {
        Some(gears) => gears,
        None => {
            errors.push("Missing [[gear]] entries".to_string());
            return;
        }
    };

    if gears.len() < 2 || gears.len() > MAX_GEARS {
        errors.push(format!("Gear count must be 2-{}, found {}", MAX_GEARS, gears.len()));
    }

    let mut seen_pins: Vec<(i64, usize)> = Vec::new();

    for (i, gear) in gears.iter().enumerate() {
        match gear.get("label").and_then(|l| l.as_str()) {
            Some(label) if !label.is_empty() && label.len() <= MAX_LABEL_LEN => {}
            Some(_) => errors.push(format!(
                "[[gear]] {} label must be 1-{} bytes",
                i, MAX_LABEL_LEN
            )),
            None => errors.push(format!("[[gear]] {} missing 'label'", i)),
        }

        match gear.get("pin").and_then(|p| p.as_integer()) {
            Some(pin) if GEAR_PINS.contains(&pin) => {
                // Two gears on one pin would make the later one undetectable
                if let Some((_, first)) = seen_pins.iter().find(|(p, _)| *p == pin) {
                    errors.push(format!(
                        "[[gear]] {} reuses GPIO{} of gear {}",
                        i, pin, first
                    ));
                } else {
                    seen_pins.push((pin, i));
                }
            }
            Some(pin) => errors.push(format!("[[gear]] {} pin {} is not GPIO0-15", i, pin)),
            None => errors.push(format!("[[gear]] {} missing 'pin'", i)),
        }

        match gear.get("x_offset").and_then(|x| x.as_integer()) {
            Some(x) if (0..=127).contains(&x) => {}
            Some(_) => errors.push(format!("[[gear]] {} x_offset must be 0-127", i)),
            None => errors.push(format!("[[gear]] {} missing 'x_offset'", i)),
        }
    }

    let initial = get_int(config, "boot", "initial_gear").unwrap_or(1);
    if initial < 0 || initial as usize >= gears.len() {
        errors.push(format!(
            "[boot] initial_gear {} is not a gear index (0-{})",
            initial,
            gears.len().saturating_sub(1)
        ));
    }
}

/// Write the validated configuration as Rust constants
fn generate_config(config: &toml::Value) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut out = String::new();

    let gears = config.get("gear").and_then(|g| g.as_array()).unwrap();
    out.push_str(&format!(
        "/// Gear table, in selector order\npub static GEARS: [GearDefinition; {}] = [\n",
        gears.len()
    ));
    for gear in gears {
        out.push_str(&format!(
            "    GearDefinition::new({:?}, {}, {}),\n",
            gear.get("label").and_then(|l| l.as_str()).unwrap(),
            gear.get("pin").and_then(|p| p.as_integer()).unwrap(),
            gear.get("x_offset").and_then(|x| x.as_integer()).unwrap(),
        ));
    }
    out.push_str("];\n\n");

    let orientation = match get_str(config, "display", "orientation").unwrap_or("landscape") {
        "portrait" => "Portrait",
        _ => "Landscape",
    };
    let sensor = match get_str(config, "sensor", "kind").unwrap_or("register_simple") {
        "analog_thermistor" => "AnalogThermistor",
        "register_calibrated" => "RegisterCalibrated",
        _ => "RegisterSimple",
    };
    let format = match get_str(config, "sensor", "format").unwrap_or("half_degree") {
        "q8_8" => "Q8_8",
        _ => "HalfDegree",
    };

    out.push_str(&format!(
        "/// Indicator configuration\n\
         pub const INDICATOR: IndicatorConfig = IndicatorConfig {{\n\
         \x20   features: Features {{\n\
         \x20       session_counter: {},\n\
         \x20       thermometer: {},\n\
         \x20       arrows: {},\n\
         \x20       inverted: {},\n\
         \x20   }},\n\
         \x20   orientation: Orientation::{},\n\
         \x20   sensor: SensorKind::{},\n\
         \x20   register_format: RegisterFormat::{},\n\
         \x20   sleep_delay_ticks: {},\n\
         \x20   sample_delay_ticks: {},\n\
         \x20   tick_ms: {},\n\
         \x20   initial_gear: {},\n\
         }};\n\n",
        get_bool(config, "features", "session_counter", true),
        get_bool(config, "features", "thermometer", true),
        get_bool(config, "features", "arrows", true),
        get_bool(config, "display", "inverted", false),
        orientation,
        sensor,
        format,
        get_int(config, "timing", "sleep_delay_ticks").unwrap_or(10_000),
        get_int(config, "timing", "sample_delay_ticks").unwrap_or(100),
        get_int(config, "timing", "tick_ms").unwrap_or(10),
        get_int(config, "boot", "initial_gear").unwrap_or(1),
    ));

    let default_address = if sensor == "RegisterCalibrated" { 0x5F } else { 0x4F };
    out.push_str(&format!(
        "/// 7-bit address of the I2C temperature sensor\n\
         pub const SENSOR_ADDRESS: u8 = {:#04x};\n\n\
         /// Sensor bus transaction timeout (ms)\n\
         pub const SENSOR_TIMEOUT_MS: u32 = {};\n",
        get_int(config, "sensor", "address").unwrap_or(default_address),
        get_int(config, "sensor", "timeout_ms").unwrap_or(20),
    ));

    fs::write(out_dir.join("indicator_config.rs"), out).unwrap();
}
