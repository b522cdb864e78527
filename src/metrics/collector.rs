//! The scrape-driven sensor collector and its failure policies.

use crate::metrics::desc::{MetricDesc, DESCRIPTORS, HUMIDITY_DESC, PRESSURE_DESC, TEMPERATURE_DESC};
use crate::metrics::traits::Collector;
use crate::sensor::{SensorError, SensorPort, SensorResult};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::warn;

/// The value carried by one sample: a live gauge reading, or an explicit
/// invalid marker holding the read error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleValue {
    /// Successfully read gauge value, already unit-converted
    Gauge(f64),
    /// The read failed; the marker carries the originating error
    Invalid(SensorError),
}

/// One (metric identity, value-or-invalid) pair produced per scrape.
///
/// One-shot: produced by a single collection, serialized by the exposition
/// layer, never retained across scrapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// The descriptor this sample belongs to
    pub desc: &'static MetricDesc,
    /// The sampled value or failure marker
    pub value: SampleValue,
}

impl Sample {
    /// Create a gauge sample for a successful read.
    pub fn gauge(desc: &'static MetricDesc, value: f64) -> Self {
        Self {
            desc,
            value: SampleValue::Gauge(value),
        }
    }

    /// Create an invalid sample carrying a read error.
    pub fn invalid(desc: &'static MetricDesc, err: SensorError) -> Self {
        Self {
            desc,
            value: SampleValue::Invalid(err),
        }
    }

    /// Whether this sample carries a live value.
    pub fn is_valid(&self) -> bool {
        matches!(self.value, SampleValue::Gauge(_))
    }
}

/// What a collection does when a hardware read fails.
///
/// The three variants are mutually exclusive; a deployment picks exactly one
/// and keeps it for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the error, substitute a zero-valued gauge and keep going.
    /// Every scrape yields exactly 3 samples.
    DegradeAndContinue,

    /// Emit one invalid sample for the failed metric and abort the scrape;
    /// later metrics are never attempted.
    FailFast,

    /// Attempt every metric; each failure becomes an invalid sample carrying
    /// its error. Every scrape yields exactly 3 samples, each individually
    /// valid or invalid.
    #[default]
    IndependentInvalid,
}

impl FailurePolicy {
    /// All policies, for CLI help text.
    pub const ALL: [FailurePolicy; 3] = [
        FailurePolicy::DegradeAndContinue,
        FailurePolicy::FailFast,
        FailurePolicy::IndependentInvalid,
    ];

    /// The kebab-case name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::DegradeAndContinue => "degrade-and-continue",
            FailurePolicy::FailFast => "fail-fast",
            FailurePolicy::IndependentInvalid => "independent-invalid",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "degrade-and-continue" => Ok(FailurePolicy::DegradeAndContinue),
            "fail-fast" => Ok(FailurePolicy::FailFast),
            "independent-invalid" => Ok(FailurePolicy::IndependentInvalid),
            other => Err(format!(
                "unknown failure policy '{}', expected one of: degrade-and-continue, fail-fast, independent-invalid",
                other
            )),
        }
    }
}

type ReadFn<S> = fn(&mut S) -> SensorResult<f64>;

/// Collector turning one scrape trigger into a bounded sequence of samples.
///
/// Holds the sensor port for the process lifetime behind a mutex, so the
/// three reads of one scrape are contiguous even when the HTTP layer serves
/// scrapes concurrently. Logically stateless between invocations: nothing
/// from one scrape influences the next.
pub struct SensorCollector<S> {
    port: Mutex<S>,
    policy: FailurePolicy,
}

impl<S: SensorPort> SensorCollector<S> {
    /// Create a collector owning the given sensor port.
    pub fn new(port: S, policy: FailurePolicy) -> Self {
        Self {
            port: Mutex::new(port),
            policy,
        }
    }

    /// The active failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Read every metric in the fixed order, applying the failure policy.
    ///
    /// Exactly one hardware read per metric per invocation; no retry, no
    /// caching of earlier successful values. Pressure arrives in Pascal and
    /// is divided by 100 to hectopascal before sampling; temperature and
    /// humidity pass through unconverted.
    fn collect_samples(&self) -> Vec<Sample> {
        // Poisoning only happens if a read panicked; the port itself holds
        // no invariant worth tearing the process down for.
        let mut port = self.port.lock().unwrap_or_else(|e| e.into_inner());

        let reads: [(&'static MetricDesc, ReadFn<S>); 3] = [
            (&TEMPERATURE_DESC, |p| p.read_temperature()),
            (&PRESSURE_DESC, |p| p.read_pressure().map(|pa| pa / 100.0)),
            (&HUMIDITY_DESC, |p| p.read_humidity()),
        ];

        let mut samples = Vec::with_capacity(reads.len());
        for (desc, read) in reads {
            match read(&mut *port) {
                Ok(value) => samples.push(Sample::gauge(desc, value)),
                Err(err) => {
                    warn!(metric = desc.name, error = %err, "sensor read failed");
                    match self.policy {
                        FailurePolicy::DegradeAndContinue => {
                            samples.push(Sample::gauge(desc, 0.0));
                        }
                        FailurePolicy::FailFast => {
                            samples.push(Sample::invalid(desc, err));
                            break;
                        }
                        FailurePolicy::IndependentInvalid => {
                            samples.push(Sample::invalid(desc, err));
                        }
                    }
                }
            }
        }

        samples
    }
}

impl<S: SensorPort> Collector for SensorCollector<S> {
    fn describe(&self) -> &'static [&'static MetricDesc] {
        &DESCRIPTORS
    }

    fn collect(&self) -> Vec<Sample> {
        self.collect_samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub port with per-metric outcomes and call counters.
    #[derive(Default)]
    struct StubPort {
        temperature: Option<f64>,
        pressure: Option<f64>,
        humidity: Option<f64>,
        humidity_calls: usize,
    }

    impl StubPort {
        fn all_ok() -> Self {
            Self {
                temperature: Some(23.5),
                pressure: Some(101_325.0),
                humidity: Some(45.0),
                humidity_calls: 0,
            }
        }

        fn pressure_failing() -> Self {
            Self {
                pressure: None,
                ..Self::all_ok()
            }
        }
    }

    impl SensorPort for StubPort {
        fn read_temperature(&mut self) -> SensorResult<f64> {
            self.temperature.ok_or_else(|| SensorError::bus("temperature read failed"))
        }

        fn read_pressure(&mut self) -> SensorResult<f64> {
            self.pressure.ok_or_else(|| SensorError::bus("pressure read failed"))
        }

        fn read_humidity(&mut self) -> SensorResult<f64> {
            self.humidity_calls += 1;
            self.humidity.ok_or_else(|| SensorError::bus("humidity read failed"))
        }
    }

    fn gauges(samples: &[Sample]) -> Vec<f64> {
        samples
            .iter()
            .filter_map(|s| match s.value {
                SampleValue::Gauge(v) => Some(v),
                SampleValue::Invalid(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_all_reads_succeed() {
        let collector = SensorCollector::new(StubPort::all_ok(), FailurePolicy::default());
        let samples = collector.collect();

        assert_eq!(samples.len(), 3);
        assert_eq!(gauges(&samples), vec![23.5, 1013.25, 45.0]);
        assert_eq!(samples[1].desc.name, "bme280_pressure_hpa");
    }

    #[test]
    fn test_degrade_and_continue_zero_fills() {
        let collector =
            SensorCollector::new(StubPort::pressure_failing(), FailurePolicy::DegradeAndContinue);
        let samples = collector.collect();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].value, SampleValue::Gauge(0.0));
        assert_eq!(samples[2].value, SampleValue::Gauge(45.0));
    }

    #[test]
    fn test_fail_fast_aborts_remaining_metrics() {
        let collector = SensorCollector::new(StubPort::pressure_failing(), FailurePolicy::FailFast);
        let samples = collector.collect();

        // Temperature succeeded, pressure carries the error, humidity was
        // never attempted.
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, SampleValue::Gauge(23.5));
        assert_eq!(
            samples[1].value,
            SampleValue::Invalid(SensorError::bus("pressure read failed"))
        );
        let port = collector.port.lock().unwrap();
        assert_eq!(port.humidity_calls, 0);
    }

    #[test]
    fn test_independent_invalid_attempts_everything() {
        let collector =
            SensorCollector::new(StubPort::pressure_failing(), FailurePolicy::IndependentInvalid);
        let samples = collector.collect();

        assert_eq!(samples.len(), 3);
        assert!(samples[0].is_valid());
        assert_eq!(
            samples[1].value,
            SampleValue::Invalid(SensorError::bus("pressure read failed"))
        );
        assert!(samples[2].is_valid());
    }

    #[test]
    fn test_collect_is_idempotent() {
        let collector = SensorCollector::new(StubPort::all_ok(), FailurePolicy::IndependentInvalid);
        assert_eq!(collector.collect(), collector.collect());
    }

    #[test]
    fn test_describe_is_stable() {
        let collector = SensorCollector::new(StubPort::all_ok(), FailurePolicy::default());
        assert_eq!(collector.describe(), collector.describe());
        assert_eq!(collector.describe().len(), 3);
    }

    #[test]
    fn test_policy_round_trips_through_str() {
        for policy in FailurePolicy::ALL {
            assert_eq!(policy.as_str().parse::<FailurePolicy>(), Ok(policy));
        }
        assert!("retry-forever".parse::<FailurePolicy>().is_err());
    }
}
