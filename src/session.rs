//! The interactive reporting loop and the per-day publish step it shares with
//! the one-shot `analyze` command.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{error, info, warn};

use crate::analyzers::types::{HourlyJunctionBins, MetricReport};
use crate::chart::write_histogram;
use crate::config::Settings;
use crate::error::SurveyError;
use crate::output::{append_results, log_report, report_lines};
use crate::prompt::Prompter;
use crate::summarize_file;
use crate::survey::SurveyDate;

/// Writes the report to `out`, appends it to the results log and, when
/// `chart` is set, draws the histogram.
///
/// A day with no hourly data is not an error here; the chart is skipped with a note.
pub fn publish<W: Write>(
    out: &mut W,
    settings: &Settings,
    date: &SurveyDate,
    path: &Path,
    report: &MetricReport,
    bins: &HourlyJunctionBins,
    chart: bool,
) -> Result<(), SurveyError> {
    log_report(report);

    let lines = report_lines(path, report);
    writeln!(out)?;
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    append_results(&settings.results_file, &lines)?;

    if chart {
        match write_histogram(bins, date, &settings.chart_dir) {
            Ok(chart_path) => writeln!(out, "Histogram saved to {}", chart_path.display())?,
            Err(SurveyError::EmptyInput) => {
                info!(date = %date, "No hourly data to chart");
                writeln!(out, "No hourly data to chart for {date}.")?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Prompts for dates until the user stops, reporting on each survey day.
///
/// A date with no data file is answered by asking for another date. Any other
/// failure in a pass, including saving its report or chart, is shown and the
/// loop returns to date selection. Only a failure of the console itself ends
/// the session early.
#[tracing::instrument(skip_all)]
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> Result<(), SurveyError> {
    loop {
        let date = prompter.survey_date()?;
        let path = settings.data_dir.join(date.file_name());

        let (report, bins) = match summarize_file(&path) {
            Ok(summary) => summary,
            Err(e) if e.is_not_found() => {
                warn!(path = %path.display(), "Survey file not found");
                prompter.show(&format!(
                    "Error: File '{}' not found. Please enter another date.",
                    path.display()
                ))?;
                continue;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Survey pass failed");
                prompter.show(&format!(
                    "Error: could not process '{}': {e}. No report was produced.",
                    path.display()
                ))?;
                continue;
            }
        };

        if let Err(e) = publish(
            prompter.writer(),
            settings,
            &date,
            &path,
            &report,
            &bins,
            true,
        ) {
            error!(path = %path.display(), error = %e, "Publishing report failed");
            prompter.show(&format!(
                "Error: could not save the report for '{}': {e}. Please enter another date.",
                path.display()
            ))?;
            continue;
        }

        if !prompter.load_another()? {
            prompter.show("\nEnd of Run! Thank you for using the Traffic Data Processor!")?;
            break;
        }
    }

    Ok(())
}
