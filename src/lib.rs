//! Synheart Vitals - Metric registry and time-series resolution for health data
//!
//! Vitals answers one question for the charting layer: given a metric and a
//! time window, what points should be drawn? It keeps a static catalog of the
//! metrics the app understands and resolves each request against the device's
//! native health store, falling back to the cloud analytics service when the
//! device has nothing.
//!
//! ## Modules
//!
//! - **Catalog**: every metric with its category, unit, chart style and
//!   per-platform record type
//! - **Resolver**: timeout-guarded native reads, cloud fallback, and the
//!   concurrent "today" snapshot
//! - **Adapters**: per-metric conversion of raw records into data points
//! - **Recorded**: fixture-backed readers for the CLI and tests

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod error;
pub mod recorded;
pub mod resolver;
pub mod sources;
pub mod stats;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use catalog::{lookup, MetricDefinition};
pub use config::ResolverConfig;
pub use error::{SourceError, SourceResult, VitalsError};
pub use resolver::MetricResolver;
pub use sources::{CloudAnalyticsReader, NativeHealthReader};
pub use stats::compute_stats;
pub use types::{AggregateStats, DataPoint, MetricCategory, Platform, Series, TimeWindow};

/// Crate version, reported by the CLI and FFI
pub const VITALS_VERSION: &str = env!("CARGO_PKG_VERSION");
