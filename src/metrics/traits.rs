//! Traits for scrape-driven metric collection.

use crate::metrics::collector::Sample;
use crate::metrics::desc::MetricDesc;

/// Trait for scrape-driven metric sources.
///
/// An exposition layer calls [`Collector::describe`] once when the collector
/// is registered, to validate metric identities, and [`Collector::collect`]
/// exactly once per inbound scrape request, serializing whatever samples
/// come back.
pub trait Collector {
    /// Return the fixed set of metric descriptors, in collection order.
    ///
    /// Pure: no I/O, identical results on every call, safe to call
    /// concurrently and repeatedly.
    fn describe(&self) -> &'static [&'static MetricDesc];

    /// Perform one collection, reading every metric live.
    ///
    /// Must be safe to call from concurrent scrape requests.
    fn collect(&self) -> Vec<Sample>;
}
