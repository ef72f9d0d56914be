use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::HeapMapMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for heap metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<HeapMapMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &HeapMapMetricsSnapshot) {
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_rejected_total", snapshot.insert_rejected);
        self.write_counter("pops_total", snapshot.pops);
        self.write_counter("sift_up_steps_total", snapshot.sift_up_steps);
        self.write_counter("sift_down_steps_total", snapshot.sift_down_steps);
        self.write_counter("top_nodes_calls_total", snapshot.top_nodes_calls);
        self.write_counter("top_nodes_returned_total", snapshot.top_nodes_returned);
        self.write_counter("priority_calls_total", snapshot.priority_calls);
        self.write_counter("priority_hits_total", snapshot.priority_hits);
        self.write_counter("priority_misses_total", snapshot.priority_misses);
        self.write_counter("top_calls_total", snapshot.top_calls);
        self.write_counter("top_empty_total", snapshot.top_empty);
        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}
