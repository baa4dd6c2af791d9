use crate::prelude::*;
use crate::register::{self, RegisterDef, RegisterWidth::*};

use serde::Serialize;
use std::collections::BTreeMap;

/// Number of body bytes in a main telemetry response (95 registers).
pub const TELEMETRY_BODY_LEN: usize = 190;

/// Semantic keys exposed in the decoded snapshot.
pub mod keys {
    pub const DEVICE_MODEL: &str = "device_model";
    pub const BATTERY_VOLTAGE: &str = "battery_voltage";
    pub const BATTERY_CURRENT: &str = "battery_current";
    pub const AC_OUT_VOLTAGE: &str = "ac_output_voltage";
    pub const GRID_VOLTAGE: &str = "grid_voltage";
    pub const AC_IN_VOLTAGE: &str = "ac_input_voltage";
    pub const AC_OUT_FREQ: &str = "ac_output_frequency";
    pub const AC_IN_FREQ: &str = "ac_input_frequency";
    pub const GRID_FREQ: &str = "grid_frequency";
    pub const AC_OUT_POWER: &str = "ac_output_power";
    pub const AC_OUT_VA: &str = "ac_output_va";
    pub const AC_IN_POWER: &str = "ac_input_power";
    pub const LOAD_POWER: &str = "load_power";
    pub const PV1_VOLTAGE: &str = "pv1_voltage";
    pub const PV2_VOLTAGE: &str = "pv2_voltage";
    pub const PV_TOTAL_VOLTAGE: &str = "pv_total_voltage";
    pub const PV1_POWER: &str = "pv1_power";
    pub const PV2_POWER: &str = "pv2_power";
    pub const PV_POWER: &str = "pv_power";
    pub const DEVICE_TEMP: &str = "device_temperature";
    pub const BATTERY_TEMP: &str = "battery_temperature";
    pub const INVERTER_TEMP: &str = "inverter_temperature";
    pub const MAX_TEMP_TODAY: &str = "max_temp_today";
    pub const BATTERY_POWER: &str = "battery_power";
    pub const BATTERY_STATUS: &str = "battery_status";
    pub const GRID_POWER: &str = "grid_power";
    pub const GRID_STATUS: &str = "grid_status";
    pub const BATTERY_SOC: &str = "battery_soc";
    pub const BATTERY_TYPE: &str = "battery_type";
    pub const BATTERY_CYCLES: &str = "battery_cycles";
    pub const IS_UPS_MODE: &str = "is_ups_mode";
    pub const MASTER_SLAVE_STATUS: &str = "master_slave_status";
    pub const FAULT_CODE: &str = "fault_code";
    pub const OPERATING_MODE: &str = "operating_mode";
    pub const SYSTEM_EFFICIENCY: &str = "system_efficiency";
    pub const POWER_FACTOR: &str = "power_factor";
    pub const DC_BUS_VOLTAGE: &str = "dc_bus_voltage";
    pub const ENERGY_TODAY: &str = "energy_today";
    pub const ENERGY_TOTAL: &str = "energy_total";
    pub const RUNTIME_HOURS: &str = "runtime_hours";
    pub const MAX_POWER_TODAY: &str = "max_power_today";
    pub const MIN_VOLTAGE_TODAY: &str = "min_voltage_today";
}

/// One decoded snapshot value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
}

/// Mapping from semantic key to decoded value. Built fresh per decode call;
/// fields that failed to decode are simply absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: BTreeMap<&'static str, Value>,
}

impl Snapshot {
    pub fn insert(&mut self, key: &'static str, value: Value) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

struct NumericField {
    key: &'static str,
    def: RegisterDef,
}

const fn field(key: &'static str, def: RegisterDef) -> NumericField {
    NumericField { key, def }
}

/// Plain scaled registers, decoded straight into the snapshot. Registers
/// needing derived handling (temperatures, signed powers, codes, flags) are
/// decoded separately below.
const NUMERIC_FIELDS: &[NumericField] = &[
    field(keys::BATTERY_VOLTAGE, RegisterDef::unsigned(11, Word, 0.01)),
    field(keys::AC_OUT_VOLTAGE, RegisterDef::unsigned(13, Word, 0.1)),
    field(keys::AC_OUT_FREQ, RegisterDef::unsigned(16, Word, 0.01)),
    field(keys::AC_IN_FREQ, RegisterDef::unsigned(17, Word, 0.01)),
    field(keys::AC_OUT_POWER, RegisterDef::unsigned(18, Word, 1.0)),
    field(keys::PV1_VOLTAGE, RegisterDef::unsigned(20, Word, 0.1)),
    field(keys::PV_TOTAL_VOLTAGE, RegisterDef::unsigned(27, Word, 0.1)),
    field(keys::BATTERY_CYCLES, RegisterDef::unsigned(35, Word, 1.0)),
    field(keys::GRID_FREQ, RegisterDef::unsigned(41, Word, 0.01)),
    field(keys::DC_BUS_VOLTAGE, RegisterDef::unsigned(47, Word, 0.1)),
    field(keys::AC_IN_POWER, RegisterDef::unsigned(53, Word, 1.0)),
    field(keys::ENERGY_TODAY, RegisterDef::unsigned(55, Word, 0.1)),
    field(keys::ENERGY_TOTAL, RegisterDef::unsigned(57, DoubleWord, 0.1)),
    field(keys::AC_OUT_VA, RegisterDef::unsigned(58, Word, 1.0)),
    field(keys::RUNTIME_HOURS, RegisterDef::unsigned(63, DoubleWord, 1.0)),
    field(keys::MAX_POWER_TODAY, RegisterDef::unsigned(65, Word, 1.0)),
    field(keys::LOAD_POWER, RegisterDef::unsigned(67, Word, 1.0)),
    field(keys::MIN_VOLTAGE_TODAY, RegisterDef::unsigned(69, Word, 0.01)),
    field(keys::PV2_VOLTAGE, RegisterDef::unsigned(72, Word, 0.1)),
];

struct TemperatureField {
    key: &'static str,
    address: u16,
    // half-open plausibility band in Celsius
    min: f64,
    max: f64,
}

const TEMPERATURE_FIELDS: &[TemperatureField] = &[
    TemperatureField {
        key: keys::DEVICE_TEMP,
        address: 24,
        min: -40.0,
        max: 150.0,
    },
    TemperatureField {
        key: keys::BATTERY_TEMP,
        address: 25,
        min: -40.0,
        max: 80.0,
    },
    TemperatureField {
        key: keys::INVERTER_TEMP,
        address: 26,
        min: -40.0,
        max: 100.0,
    },
    TemperatureField {
        key: keys::MAX_TEMP_TODAY,
        address: 71,
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    },
];

const MODEL_START_ADDRESS: u16 = 3;
const MODEL_WORD_COUNT: usize = 5;

const BATTERY_CURRENT: RegisterDef = RegisterDef::signed(12, Word, 0.01);
const GRID_VOLTAGE: RegisterDef = RegisterDef::unsigned(15, Word, 0.1);
const PV1_POWER: RegisterDef = RegisterDef::unsigned(22, Word, 1.0);
const BATTERY_TYPE: RegisterDef = RegisterDef::unsigned(37, Word, 1.0);
const SYSTEM_EFFICIENCY: RegisterDef = RegisterDef::unsigned(39, Word, 0.1);
const POWER_FACTOR: RegisterDef = RegisterDef::unsigned(45, Word, 0.001);
const BATTERY_SOC: RegisterDef = RegisterDef::unsigned(50, Word, 1.0);
const FAULT_CODE: RegisterDef = RegisterDef::unsigned(51, Word, 1.0);
const OPERATING_MODE: RegisterDef = RegisterDef::unsigned(52, Word, 1.0);
const GRID_POWER: RegisterDef = RegisterDef::signed(59, Word, 1.0);
const BATTERY_POWER: RegisterDef = RegisterDef::signed(61, Word, 1.0);
const UPS_MODE: RegisterDef = RegisterDef::unsigned(68, Word, 1.0);
const MASTER_SLAVE: RegisterDef = RegisterDef::unsigned(70, Word, 1.0);
const PV2_POWER: RegisterDef = RegisterDef::unsigned(74, Word, 1.0);

/// Decode a 190-byte main telemetry body.
///
/// Every field is independently optional; one bad register never aborts the
/// rest. The decode as a whole fails only if nothing at all decoded.
pub fn decode(body: &[u8], diag: &dyn Diagnostics) -> Result<Snapshot, DecodeError> {
    let mut snapshot = Snapshot::default();

    for f in NUMERIC_FIELDS {
        match register::read_number(body, f.def) {
            Ok(v) => snapshot.insert(f.key, numeric_value(v, f.def.scale)),
            Err(e) => diag.warn(&format!("{}: {}", f.key, e)),
        }
    }

    // Sign convention: the register reports charge current as positive, the
    // snapshot reports outflow as positive.
    if let Ok(v) = register::read_number(body, BATTERY_CURRENT) {
        snapshot.insert(keys::BATTERY_CURRENT, Value::Float(-v));
    }

    // Single-phase unit: the grid reading doubles as the AC input voltage.
    if let Ok(v) = register::read_number(body, GRID_VOLTAGE) {
        snapshot.insert(keys::GRID_VOLTAGE, Value::Float(v));
        snapshot.insert(keys::AC_IN_VOLTAGE, Value::Float(v));
    }

    for t in TEMPERATURE_FIELDS {
        match read_temperature(body, t) {
            Ok(celsius) => snapshot.insert(t.key, Value::Float(celsius)),
            Err(e) => diag.warn(&format!("{}: {}", t.key, e)),
        }
    }

    decode_battery_power(body, &mut snapshot);
    decode_grid_power(body, &mut snapshot);
    decode_pv_power(body, &mut snapshot);

    if let Ok(raw) = register::read_number(body, BATTERY_SOC) {
        let soc = (raw as i64).clamp(0, 100);
        snapshot.insert(keys::BATTERY_SOC, Value::Int(soc));
    }

    if let Ok(raw) = register::read_number(body, UPS_MODE) {
        snapshot.insert(keys::IS_UPS_MODE, Value::Bool(raw as i64 == 0));
    }

    if let Ok(raw) = register::read_number(body, BATTERY_TYPE) {
        let name = battery_type_name(raw as u16);
        snapshot.insert(keys::BATTERY_TYPE, Value::Text(name.to_string()));
    }

    if let Ok(raw) = register::read_number(body, FAULT_CODE) {
        let name = fault_name(raw as u16);
        snapshot.insert(keys::FAULT_CODE, Value::Text(name.to_string()));
    }

    if let Ok(raw) = register::read_number(body, OPERATING_MODE) {
        let name = operating_mode_name(raw as u16);
        snapshot.insert(keys::OPERATING_MODE, Value::Text(name.to_string()));
    }

    if let Ok(raw) = register::read_number(body, MASTER_SLAVE) {
        snapshot.insert(keys::MASTER_SLAVE_STATUS, Value::Int(raw as i64));
    }

    if let Ok(v) = register::read_number(body, SYSTEM_EFFICIENCY) {
        if (0.0..=100.0).contains(&v) {
            snapshot.insert(keys::SYSTEM_EFFICIENCY, Value::Float(v));
        } else {
            diag.warn(&format!("{}: implausible value {}", keys::SYSTEM_EFFICIENCY, v));
        }
    }

    if let Ok(v) = register::read_number(body, POWER_FACTOR) {
        if (0.0..=1.0).contains(&v) {
            snapshot.insert(keys::POWER_FACTOR, Value::Float(v));
        } else {
            diag.warn(&format!("{}: implausible value {}", keys::POWER_FACTOR, v));
        }
    }

    match register::read_ascii(body, MODEL_START_ADDRESS, MODEL_WORD_COUNT) {
        Ok(model) => snapshot.insert(keys::DEVICE_MODEL, Value::Text(model)),
        Err(e) => diag.warn(&format!("{}: {}", keys::DEVICE_MODEL, e)),
    }

    if snapshot.is_empty() {
        return Err(DecodeError::EmptySnapshot);
    }

    Ok(snapshot)
}

/// Scale-1 registers carry codes and whole-unit quantities; keep them as
/// integers. Everything scaled is a float.
fn numeric_value(v: f64, scale: f64) -> Value {
    if scale == 1.0 {
        Value::Int(v as i64)
    } else {
        Value::Float(v)
    }
}

/// Celsius = (raw - 1000) / 10, one decimal. Values outside the field's
/// plausibility band are discarded, not clamped.
fn read_temperature(body: &[u8], t: &TemperatureField) -> Result<f64, FieldError> {
    let raw = register::read_number(body, RegisterDef::signed(t.address, Word, 1.0))?;
    let celsius = Utils::round((raw - 1000.0) / 10.0, 1);
    if celsius >= t.min && celsius < t.max {
        Ok(celsius)
    } else {
        Err(FieldError::Implausible { value: celsius })
    }
}

fn decode_battery_power(body: &[u8], snapshot: &mut Snapshot) {
    match register::read_number(body, BATTERY_POWER) {
        Ok(raw) => {
            let status = if raw < 0.0 { "Charging" } else { "Discharging" };
            snapshot.insert(keys::BATTERY_POWER, Value::Int(raw.abs() as i64));
            snapshot.insert(keys::BATTERY_STATUS, Value::Text(status.to_string()));
        }
        Err(_) => {
            snapshot.insert(keys::BATTERY_STATUS, Value::Text("Unknown".to_string()));
        }
    }
}

fn decode_grid_power(body: &[u8], snapshot: &mut Snapshot) {
    match register::read_number(body, GRID_POWER) {
        Ok(raw) => {
            let status = if raw > 0.0 { "Importing" } else { "Exporting" };
            snapshot.insert(keys::GRID_POWER, Value::Int(raw as i64));
            snapshot.insert(keys::GRID_STATUS, Value::Text(status.to_string()));
        }
        Err(_) => {
            snapshot.insert(keys::GRID_STATUS, Value::Text("Unknown".to_string()));
        }
    }
}

/// Combined PV power treats a missing string as zero, but is absent only if
/// both strings are missing.
fn decode_pv_power(body: &[u8], snapshot: &mut Snapshot) {
    let pv1 = register::read_number(body, PV1_POWER).ok();
    let pv2 = register::read_number(body, PV2_POWER).ok();

    if let Some(v) = pv1 {
        snapshot.insert(keys::PV1_POWER, Value::Int(v as i64));
    }
    if let Some(v) = pv2 {
        snapshot.insert(keys::PV2_POWER, Value::Int(v as i64));
    }
    if pv1.is_some() || pv2.is_some() {
        let total = pv1.unwrap_or(0.0) + pv2.unwrap_or(0.0);
        snapshot.insert(keys::PV_POWER, Value::Int(total as i64));
    }
}

fn battery_type_name(code: u16) -> &'static str {
    match code {
        2 => "No Battery",
        _ => "Present",
    }
}

fn fault_name(code: u16) -> &'static str {
    match code {
        0 => "No Fault",
        1 => "Overvoltage",
        2 => "Undervoltage",
        3 => "Overtemperature",
        4 => "Battery Error",
        5 => "Grid Error",
        _ => "Unknown",
    }
}

fn operating_mode_name(code: u16) -> &'static str {
    match code {
        0 => "Standby",
        1 => "Grid Mode",
        2 => "Battery Mode",
        3 => "Hybrid Mode",
        4 => "Maintenance",
        _ => "Unknown",
    }
}
