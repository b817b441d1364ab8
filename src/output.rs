//! Output formatting and persistence for survey reports.
//!
//! Renders a [`MetricReport`] as the fixed list of report sentences, appends
//! those sentences to the running results log, and serializes a full summary
//! as JSON.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{ELM_RABBIT, HANLEY_WESTWAY, HourlyJunctionBins, MetricReport};
use crate::error::SurveyError;

/// Written after every report appended to the results log.
pub const SEPARATOR: &str = "***************************";

/// Everything one pass produced, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct SurveySummary<'a> {
    pub source: &'a Path,
    pub report: &'a MetricReport,
    pub bins: &'a HourlyJunctionBins,
}

/// Formats the report as one sentence per metric, in report order.
pub fn report_lines(source: &Path, report: &MetricReport) -> Vec<String> {
    vec![
        format!("Data file selected is {}", source.display()),
        format!(
            "The total number of vehicles recorded for this date is {}",
            report.total_vehicles
        ),
        format!(
            "The total number of trucks recorded for this date is {}",
            report.total_trucks
        ),
        format!(
            "The total number of electric vehicles for this date is {}",
            report.total_electric
        ),
        format!(
            "The total number of two-wheeled vehicles for this date is {}",
            report.two_wheeled
        ),
        format!(
            "The total number of buses leaving {ELM_RABBIT} heading North is {}",
            report.buses_north_from_elm_rabbit
        ),
        format!(
            "The total number of vehicles through both junctions not turning left or right is {}",
            report.straight_through
        ),
        format!(
            "The percentage of total vehicles recorded that are trucks for this date is {}%",
            report.truck_percentage
        ),
        format!(
            "The average number of bicycles per hour for this date is {}",
            report.avg_bicycles_per_hour
        ),
        format!(
            "The total number of vehicles recorded as over the speed limit for this date is {}",
            report.over_speed_limit
        ),
        format!(
            "The total number of vehicles recorded through {ELM_RABBIT} junction is {}",
            report.elm_rabbit_total
        ),
        format!(
            "The total number of vehicles recorded through {HANLEY_WESTWAY} junction is {}",
            report.hanley_westway_total
        ),
        format!(
            "{}% of vehicles recorded through {ELM_RABBIT} are scooters.",
            report.scooter_percentage
        ),
        format!(
            "The highest number of vehicles in an hour on {HANLEY_WESTWAY} is {}",
            report.peak_hour_count
        ),
        format!(
            "The most vehicles through {HANLEY_WESTWAY} were recorded between {}",
            report.peak_hour_label
        ),
        format!(
            "The number of hours of rain for this date is {}",
            report.rain_hours
        ),
    ]
}

/// Records the full report, including the counts that have no report line, in the debug log.
pub fn log_report(report: &MetricReport) {
    debug!(report = ?report, "Survey metrics");
}

/// Serializes the pass result as pretty-printed JSON.
pub fn to_json(summary: &SurveySummary<'_>) -> Result<String, SurveyError> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Appends report lines and a separator to the results log.
///
/// Creates the file if it does not exist; earlier reports are kept.
pub fn append_results(path: &Path, lines: &[String]) -> Result<(), SurveyError> {
    debug!(path = %path.display(), lines = lines.len(), "Appending report");

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "\n{SEPARATOR}")?;
    writer.flush()?;

    info!(path = %path.display(), "Report saved");
    Ok(())
}
