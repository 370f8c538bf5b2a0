//! Collected metric data types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute set as stored by the recording instruments
pub(crate) type AttributeKey = Vec<(&'static str, String)>;

/// Instrument kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Monotonic sum
    Counter,
    /// Distribution of values
    Histogram,
}

/// Histogram data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
    /// Number of observations
    pub count: u64,
    /// Sum of all observations
    pub sum: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Cumulative bucket counts as (upper bound, observations <= bound)
    pub buckets: Vec<(f64, u64)>,
}

impl HistogramData {
    /// Calculate mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Value of one attribute series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointValue {
    Sum { value: f64 },
    Histogram(HistogramData),
}

/// One attribute series of an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub attributes: BTreeMap<String, String>,
    pub value: PointValue,
}

impl MetricPoint {
    pub(crate) fn new(key: &AttributeKey, value: PointValue) -> Self {
        Self {
            attributes: key
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            value,
        }
    }

    /// Attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Counter sum, if this is a counter point
    pub fn sum(&self) -> Option<f64> {
        match &self.value {
            PointValue::Sum { value } => Some(*value),
            PointValue::Histogram(_) => None,
        }
    }

    /// Histogram data, if this is a histogram point
    pub fn histogram(&self) -> Option<&HistogramData> {
        match &self.value {
            PointValue::Histogram(data) => Some(data),
            PointValue::Sum { .. } => None,
        }
    }
}

/// Everything one instrument has recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub kind: InstrumentKind,
    pub points: Vec<MetricPoint>,
}

impl MetricData {
    /// Points whose attribute `key` equals `value`
    pub fn points_where(&self, key: &str, value: &str) -> Vec<&MetricPoint> {
        self.points
            .iter()
            .filter(|p| p.attribute(key) == Some(value))
            .collect()
    }

    /// Sum across all points (counter sums or histogram sums)
    pub fn total(&self) -> f64 {
        self.points
            .iter()
            .map(|p| match &p.value {
                PointValue::Sum { value } => *value,
                PointValue::Histogram(data) => data.sum,
            })
            .sum()
    }
}
