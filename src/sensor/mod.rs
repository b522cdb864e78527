//! Sensor port abstraction and hardware drivers.
//!
//! The exporter core never talks to hardware directly; it holds a
//! [`SensorPort`] capability that is satisfied either by the feature-gated
//! BME280 I2C driver or by a stub in tests.

pub mod traits;

#[cfg(feature = "hardware")]
pub mod bme280;

// Re-export commonly used items
pub use traits::{SensorError, SensorPort, SensorResult};

#[cfg(feature = "hardware")]
pub use bme280::Bme280Port;
