//! Single-pass aggregation of a survey day.
//!
//! This module folds a stream of vehicle observations into the scalar
//! [`types::MetricReport`] and the per-hour [`types::HourlyJunctionBins`]
//! that drive the histogram.

pub mod aggregate;
pub mod types;
pub mod utility;
