//! Recording counter - per-attribute-set sums

use std::collections::BTreeMap;

// Use parking_lot::RwLock for synchronous, non-blocking access
use parking_lot::RwLock;

use super::super::attributes::MetricAttributes;
use super::super::instruments::Counter;
use super::types::{AttributeKey, InstrumentKind, MetricData, MetricPoint, PointValue};

/// Counter that keeps one running sum per distinct attribute set
#[derive(Debug)]
pub struct RecordingCounter {
    name: String,
    description: String,
    unit: String,
    sums: RwLock<BTreeMap<AttributeKey, f64>>,
}

impl RecordingCounter {
    /// Create a new counter
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
            sums: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sum recorded for an exact attribute set
    pub fn get(&self, attributes: &MetricAttributes) -> f64 {
        self.sums
            .read()
            .get(&attributes.pairs())
            .copied()
            .unwrap_or(0.0)
    }

    /// Snapshot of every series
    pub fn collect(&self) -> MetricData {
        let sums = self.sums.read();
        MetricData {
            name: self.name.clone(),
            description: self.description.clone(),
            unit: self.unit.clone(),
            kind: InstrumentKind::Counter,
            points: sums
                .iter()
                .map(|(key, value)| MetricPoint::new(key, PointValue::Sum { value: *value }))
                .collect(),
        }
    }

    /// Drop every series
    pub fn reset(&self) {
        self.sums.write().clear();
    }
}

impl Counter for RecordingCounter {
    fn add(&self, value: f64, attributes: &MetricAttributes) {
        // Counters only move forward
        if value.is_nan() || value < 0.0 {
            tracing::warn!(counter = %self.name, value, "Ignoring negative counter delta");
            return;
        }
        *self.sums.write().entry(attributes.pairs()).or_insert(0.0) += value;
    }
}
