//! In-memory metric instruments
//!
//! A self-contained [`Meter`](super::instruments::Meter) implementation:
//! - Counters: one running sum per attribute set
//! - Histograms: count/sum/min/max and cumulative buckets per attribute set
//! - Collection into plain [`MetricData`] values for exporters and tests

mod counter;
mod histogram;
mod meter;
mod types;


pub use counter::RecordingCounter;
pub use histogram::{DEFAULT_BUCKETS, RecordingHistogram};
pub use meter::InMemoryMeter;
pub use types::{HistogramData, InstrumentKind, MetricData, MetricPoint, PointValue};
