//! Host lifecycle events and their dispatch into the collector

mod dispatcher;
mod types;

pub use dispatcher::EventDispatcher;
pub use types::{LifecycleEvent, ModelRef, TurnMessage};
