//! metricnorm - normalization of dashboard telemetry.
//!
//! Two families of pure parsers:
//! - [`prom`] reads Prometheus exposition text into metrics, summarizes
//!   them and extracts a flat system snapshot.
//! - [`telemetry`] turns device telemetry records of the enhanced and the
//!   legacy schema into series keyed by measurement type.
//!
//! Nothing here performs I/O. Every call builds fresh output from its
//! input, so calls on independent inputs can run on any thread.

pub mod error;
pub mod prom;
pub mod telemetry;

pub use error::{Error, Result};
