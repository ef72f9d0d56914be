//! Optional counters for heap operations (feature `metrics`).
//!
//! - [`traits`]: recorder, snapshot, reset, and export seams.
//! - [`metrics_impl`]: counter storage for the write path and the read path.
//! - [`snapshot`]: plain copy of all counters plus gauges.
//! - [`exporter`]: Prometheus text exposition.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
