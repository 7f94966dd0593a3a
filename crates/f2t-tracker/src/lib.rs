//! Result tracking and reporting for authenticator conformance runs.
//!
//! One [`DeviceTracker`] instance corresponds to one device, one process,
//! one run. It records capability discovery, status-code comparisons,
//! free-form findings and named counter samples, then renders a
//! human-readable report (through a swappable [`ReportSink`]) and a
//! machine-readable [`ReportDocument`] with identical accounting.

#![forbid(unsafe_code)]

mod capabilities;
mod report;
mod tracker;

pub use capabilities::CapabilitySet;
pub use report::{AnsiSink, PlainSink, ReportDocument, ReportSink};
pub use tracker::DeviceTracker;
