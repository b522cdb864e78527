//! The fixed metric descriptor registry.
//!
//! Three unlabeled gauge identities, defined once for the process lifetime.
//! The exposed names are a fixed contract; changing them requires a
//! migration note for every scraping deployment.

use serde::Serialize;

/// Immutable identity of one exported metric: stable name plus help text,
/// no labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDesc {
    /// Metric name as it appears in the exposition body
    pub name: &'static str,
    /// Human-readable help text
    pub help: &'static str,
}

/// Temperature in degrees Celsius.
pub static TEMPERATURE_DESC: MetricDesc = MetricDesc {
    name: "bme280_temperature_celsius",
    help: "Temperature in celsius degree",
};

/// Barometric pressure in hectopascal.
pub static PRESSURE_DESC: MetricDesc = MetricDesc {
    name: "bme280_pressure_hpa",
    help: "Barometric pressure in hPa",
};

/// Relative humidity in percent.
pub static HUMIDITY_DESC: MetricDesc = MetricDesc {
    name: "bme280_humidity",
    help: "Humidity in percentage of relative humidity",
};

/// All descriptors in collection order: temperature, pressure, humidity.
///
/// Shared by reference across every collector invocation; the statics are
/// never regenerated, so descriptor identity is stable across scrapes.
pub static DESCRIPTORS: [&MetricDesc; 3] = [&TEMPERATURE_DESC, &PRESSURE_DESC, &HUMIDITY_DESC];
