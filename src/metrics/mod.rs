//! Metric identities, samples and the scrape-driven collector.
//!
//! This module is the core of the exporter: the fixed three-metric registry,
//! the sample model produced per scrape, and the failure policy governing a
//! scrape in which one or more hardware reads fail.

pub mod collector;
pub mod desc;
pub mod traits;

// Re-export commonly used items
pub use collector::{FailurePolicy, Sample, SampleValue, SensorCollector};
pub use desc::{MetricDesc, DESCRIPTORS};
pub use traits::Collector;
