//! Recording histogram - per-attribute-set distributions

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::super::attributes::MetricAttributes;
use super::super::instruments::Histogram;
use super::types::{AttributeKey, HistogramData, InstrumentKind, MetricData, MetricPoint, PointValue};

/// Default bucket bounds, in seconds
pub const DEFAULT_BUCKETS: [f64; 17] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0, 600.0,
    1800.0, 3600.0,
];

/// Histogram that keeps one distribution per distinct attribute set
#[derive(Debug)]
pub struct RecordingHistogram {
    name: String,
    description: String,
    unit: String,
    bounds: Vec<f64>,
    series: RwLock<BTreeMap<AttributeKey, HistogramData>>,
}

impl RecordingHistogram {
    /// Create a new histogram with default buckets
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self::with_buckets(name, description, unit, DEFAULT_BUCKETS.to_vec())
    }

    /// Create with custom bucket boundaries
    pub fn with_buckets(
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        bounds: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
            bounds,
            series: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distribution recorded for an exact attribute set
    pub fn get(&self, attributes: &MetricAttributes) -> Option<HistogramData> {
        self.series.read().get(&attributes.pairs()).cloned()
    }

    /// Snapshot of every series
    pub fn collect(&self) -> MetricData {
        let series = self.series.read();
        MetricData {
            name: self.name.clone(),
            description: self.description.clone(),
            unit: self.unit.clone(),
            kind: InstrumentKind::Histogram,
            points: series
                .iter()
                .map(|(key, data)| MetricPoint::new(key, PointValue::Histogram(data.clone())))
                .collect(),
        }
    }

    /// Drop every series
    pub fn reset(&self) {
        self.series.write().clear();
    }

    fn empty_data(&self) -> HistogramData {
        HistogramData {
            count: 0,
            sum: 0.0,
            min: f64::MAX,
            max: f64::MIN,
            buckets: self.bounds.iter().map(|b| (*b, 0u64)).collect(),
        }
    }
}

impl Histogram for RecordingHistogram {
    fn record(&self, value: f64, attributes: &MetricAttributes) {
        let mut series = self.series.write();
        let data = series
            .entry(attributes.pairs())
            .or_insert_with(|| self.empty_data());

        data.count += 1;
        data.sum += value;
        data.min = data.min.min(value);
        data.max = data.max.max(value);

        // Update bucket counts
        for (bound, count) in &mut data.buckets {
            if value <= *bound {
                *count += 1;
            }
        }
    }
}
