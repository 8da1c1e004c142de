//! Core crawl pipeline.
//!
//! The `Poller` drives the cadence, the `NodeDispatcher` fans each snapshot
//! out into isolated `MeasurementJob` tasks, and every task probes one
//! channel and reports what its node asked for.

pub mod dispatcher;
pub mod poller;
pub mod task;


pub use dispatcher::{CycleHandle, NodeDispatcher};
pub use poller::Poller;
