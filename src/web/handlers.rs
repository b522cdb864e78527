//! HTTP handlers and text exposition encoding.

use crate::metrics::{Collector, Sample, SampleValue, SensorCollector};
use crate::sensor::SensorPort;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::fmt::Write;
use std::sync::Arc;
use tracing::error;

/// Content type of the Prometheus text exposition format.
pub const TEXT_EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Serve one scrape: exactly one collection, serialized as text exposition.
///
/// Always 200 for the scrape itself; failed reads show up in the body as
/// zero values, missing lines or `# ERROR` markers depending on the active
/// failure policy. The hardware reads block, so the collection runs on the
/// blocking pool.
pub async fn metrics<S>(State(collector): State<Arc<SensorCollector<S>>>) -> Response
where
    S: SensorPort + Send + 'static,
{
    let samples = match tokio::task::spawn_blocking(move || collector.collect()).await {
        Ok(samples) => samples,
        Err(e) => {
            error!("collection task panicked: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        [(header::CONTENT_TYPE, TEXT_EXPOSITION_CONTENT_TYPE)],
        encode_samples(&samples),
    )
        .into_response()
}

/// Serialize samples into the text exposition format.
///
/// An empty sample set encodes to an empty string, which the handler still
/// serves as a 200. Invalid samples become a `# ERROR` comment line instead
/// of a value line, keeping the body parseable by scrapers.
pub fn encode_samples(samples: &[Sample]) -> String {
    let mut body = String::new();
    for sample in samples {
        match &sample.value {
            SampleValue::Gauge(value) => {
                // Writing to a String cannot fail.
                let _ = writeln!(body, "# HELP {} {}", sample.desc.name, sample.desc.help);
                let _ = writeln!(body, "# TYPE {} gauge", sample.desc.name);
                let _ = writeln!(body, "{} {}", sample.desc.name, value);
            }
            SampleValue::Invalid(err) => {
                let _ = writeln!(body, "# ERROR {} {}", sample.desc.name, err);
            }
        }
    }
    body
}

/// Minimal landing page pointing scrapers and humans at `/metrics`.
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE_HTML)
}

const LANDING_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>BME280 Exporter</title>
</head>
<body>
    <h1>BME280 Exporter</h1>
    <p>Environmental sensor metrics for Prometheus.</p>
    <p><a href="/metrics">Metrics</a></p>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::desc::{PRESSURE_DESC, TEMPERATURE_DESC};
    use crate::sensor::SensorError;

    #[test]
    fn test_encode_gauge_sample() {
        let body = encode_samples(&[Sample::gauge(&TEMPERATURE_DESC, 23.5)]);
        assert_eq!(
            body,
            "# HELP bme280_temperature_celsius Temperature in celsius degree\n\
             # TYPE bme280_temperature_celsius gauge\n\
             bme280_temperature_celsius 23.5\n"
        );
    }

    #[test]
    fn test_encode_invalid_sample_as_comment() {
        let body = encode_samples(&[Sample::invalid(
            &PRESSURE_DESC,
            SensorError::bus("i2c transfer failed"),
        )]);
        assert_eq!(
            body,
            "# ERROR bme280_pressure_hpa bus error: i2c transfer failed\n"
        );
    }

    #[test]
    fn test_encode_empty_sample_set() {
        assert_eq!(encode_samples(&[]), "");
    }

    #[test]
    fn test_encode_zero_gauge() {
        let body = encode_samples(&[Sample::gauge(&PRESSURE_DESC, 0.0)]);
        assert!(body.ends_with("bme280_pressure_hpa 0\n"));
    }
}
