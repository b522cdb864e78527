//! # BME280 Exporter - Environmental Metrics for Prometheus
//!
//! A small Rust crate that bridges a BME280 environmental sensor (temperature,
//! barometric pressure, relative humidity) to a pull-based Prometheus metrics
//! endpoint. Designed for plug-and-play operation on a Raspberry Pi with the
//! sensor attached to an I2C bus.
//!
//! ## Features
//!
//! - **On-demand sampling**: every scrape of `/metrics` performs exactly one
//!   live read per metric, never cached
//! - **Explicit failure policies**: choose how a scrape behaves when a
//!   hardware read fails (zero-fill, fail-fast, or per-metric invalid markers)
//! - **Hardware behind a trait**: the sensor is a [`SensorPort`] capability,
//!   so tests run against stubs and the I2C driver is feature-gated
//! - **Library + Binary**: use as a crate or standalone exporter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bme280_exporter::{start_web_server, FailurePolicy, SensorCollector, WebConfig};
//! # use bme280_exporter::sensor::{SensorPort, SensorResult};
//! # struct MyPort;
//! # impl SensorPort for MyPort {
//! #     fn read_temperature(&mut self) -> SensorResult<f64> { Ok(0.0) }
//! #     fn read_pressure(&mut self) -> SensorResult<f64> { Ok(0.0) }
//! #     fn read_humidity(&mut self) -> SensorResult<f64> { Ok(0.0) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     # let port = MyPort;
//!     let collector = Arc::new(SensorCollector::new(port, FailurePolicy::IndependentInvalid));
//!     start_web_server(WebConfig::from_env(), collector).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod sensor;
pub mod web;

// Re-export public API
pub use error::{ExporterError, Result};
pub use metrics::{
    collector::{FailurePolicy, Sample, SampleValue, SensorCollector},
    desc::{MetricDesc, DESCRIPTORS},
    traits::Collector,
};
pub use sensor::{SensorError, SensorPort};

#[cfg(feature = "hardware")]
pub use sensor::bme280::Bme280Port;

pub use web::{start_web_server, WebConfig};

/// Environment variable holding the listen address for the metrics endpoint.
pub const LISTEN_ADDR_ENV: &str = "BME280_EXPORTER_ADDRESS";

/// The default listen address when [`LISTEN_ADDR_ENV`] is absent or empty.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// The default I2C bus the sensor is attached to.
pub const DEFAULT_I2C_BUS: u8 = 1;

/// The default per-read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
