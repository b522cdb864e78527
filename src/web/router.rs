//! Router construction and registration-time descriptor validation.

use crate::error::{ExporterError, Result};
use crate::metrics::{Collector, MetricDesc, SensorCollector};
use crate::sensor::SensorPort;
use crate::web::handlers;
use axum::{routing::get, Router};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Build the axum application serving `/` and `/metrics`.
///
/// Calls `describe()` once here, at registration time, and rejects a
/// collector whose metric identities are malformed; after that the
/// descriptors are never re-validated.
pub fn create_app<S>(collector: Arc<SensorCollector<S>>) -> Result<Router>
where
    S: SensorPort + Send + 'static,
{
    validate_descriptors(collector.describe())?;

    Ok(Router::new()
        .route("/", get(handlers::landing_page))
        .route("/metrics", get(handlers::metrics::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(collector))
}

fn validate_descriptors(descs: &[&'static MetricDesc]) -> Result<()> {
    let mut seen = HashSet::new();
    for desc in descs {
        if desc.name.is_empty() {
            return Err(ExporterError::config_error("metric with empty name"));
        }
        if !seen.insert(desc.name) {
            return Err(ExporterError::config_error(format!(
                "duplicate metric name '{}'",
                desc.name
            )));
        }
        debug!(metric = desc.name, help = desc.help, "registered metric");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DESCRIPTORS;

    #[test]
    fn test_registry_passes_validation() {
        assert!(validate_descriptors(&DESCRIPTORS).is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let descs = [DESCRIPTORS[0], DESCRIPTORS[0]];
        assert!(validate_descriptors(&descs).is_err());
    }
}
