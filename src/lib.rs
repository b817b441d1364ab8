pub mod analyzers;
pub mod chart;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod survey;

use std::path::Path;

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::types::{HourlyJunctionBins, MetricReport};
use crate::error::SurveyError;

/// Opens the survey file at `path` and aggregates it in a single pass.
///
/// The file is closed before this returns, whether the pass succeeded or not.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn summarize_file(path: &Path) -> Result<(MetricReport, HourlyJunctionBins), SurveyError> {
    let records = parser::open(path)?;
    aggregate(records)
}
