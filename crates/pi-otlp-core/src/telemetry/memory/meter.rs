//! In-memory meter

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::super::instruments::{Counter, Histogram, Meter};
use super::counter::RecordingCounter;
use super::histogram::RecordingHistogram;
use super::types::MetricData;

/// A [`Meter`] whose instruments aggregate in process memory.
///
/// Requesting the same instrument name twice returns the same storage.
#[derive(Debug, Default)]
pub struct InMemoryMeter {
    counters: RwLock<BTreeMap<String, Arc<RecordingCounter>>>,
    histograms: RwLock<BTreeMap<String, Arc<RecordingHistogram>>>,
}

impl InMemoryMeter {
    /// Create an empty meter
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter registered under `name`
    pub fn recording_counter(&self, name: &str) -> Option<Arc<RecordingCounter>> {
        self.counters.read().get(name).cloned()
    }

    /// Histogram registered under `name`
    pub fn recording_histogram(&self, name: &str) -> Option<Arc<RecordingHistogram>> {
        self.histograms.read().get(name).cloned()
    }

    /// Collected data of one instrument
    pub fn find(&self, name: &str) -> Option<MetricData> {
        if let Some(counter) = self.recording_counter(name) {
            return Some(counter.collect());
        }
        self.recording_histogram(name).map(|h| h.collect())
    }

    /// Snapshot of every instrument, sorted by name
    pub fn collect(&self) -> Vec<MetricData> {
        let mut data: Vec<MetricData> = self
            .counters
            .read()
            .values()
            .map(|c| c.collect())
            .chain(self.histograms.read().values().map(|h| h.collect()))
            .collect();
        data.sort_by(|a, b| a.name.cmp(&b.name));
        data
    }

    /// Clear recorded values, keeping the instruments registered
    pub fn reset(&self) {
        for counter in self.counters.read().values() {
            counter.reset();
        }
        for histogram in self.histograms.read().values() {
            histogram.reset();
        }
    }
}

impl Meter for InMemoryMeter {
    fn counter(&self, name: &str, description: &str, unit: &str) -> Arc<dyn Counter> {
        let mut counters = self.counters.write();
        let counter = counters
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RecordingCounter::new(name, description, unit)));
        Arc::clone(counter) as Arc<dyn Counter>
    }

    fn histogram(&self, name: &str, description: &str, unit: &str) -> Arc<dyn Histogram> {
        let mut histograms = self.histograms.write();
        let histogram = histograms
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RecordingHistogram::new(name, description, unit)));
        Arc::clone(histogram) as Arc<dyn Histogram>
    }
}
