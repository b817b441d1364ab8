//! Histogram of hourly traffic at the two tracked junctions, rendered as SVG.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::analyzers::types::{HourlyJunctionBins, TrackedJunction};
use crate::error::SurveyError;
use crate::survey::SurveyDate;

const CANVAS_WIDTH: f64 = 1100.0;
const CANVAS_HEIGHT: f64 = 680.0;
const MARGIN: f64 = 50.0;
const BAR_WIDTH: f64 = 15.0;
const BAR_SPACING: f64 = 10.0;

const FONT: &str = "Helvetica";

/// Bar order within each hour, left to right.
const JUNCTIONS: [TrackedJunction; 2] =
    [TrackedJunction::ElmRabbit, TrackedJunction::HanleyWestway];

fn colour(junction: TrackedJunction) -> &'static str {
    match junction {
        TrackedJunction::ElmRabbit => "green",
        TrackedJunction::HanleyWestway => "red",
    }
}

/// Draws one pair of bars per hour, scaled against the busiest single bar.
///
/// A day whose counts are all zero draws flat bars rather than dividing by zero.
///
/// # Errors
///
/// Returns [`SurveyError::EmptyInput`] when there are no hours to draw.
pub fn render_svg(bins: &HourlyJunctionBins, date: &SurveyDate) -> Result<String, SurveyError> {
    if bins.is_empty() {
        return Err(SurveyError::EmptyInput);
    }

    let y_base = CANVAS_HEIGHT - MARGIN;
    let max_value = bins.max_count();
    let y_scale = if max_value == 0 {
        0.0
    } else {
        (y_base - MARGIN) / max_value as f64
    };

    let mut svg = String::new();
    draw(&mut svg, bins, date, y_base, y_scale)?;
    Ok(svg)
}

fn draw(
    svg: &mut String,
    bins: &HourlyJunctionBins,
    date: &SurveyDate,
    y_base: f64,
    y_scale: f64,
) -> fmt::Result {
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}">"#
    )?;
    writeln!(
        svg,
        r#"<rect width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" fill="white"/>"#
    )?;
    writeln!(
        svg,
        r#"<text x="{}" y="20" text-anchor="middle" font-family="{FONT}" font-size="18" font-weight="bold" fill="black">Histogram of Vehicle Frequency per Hour ({date})</text>"#,
        CANVAS_WIDTH / 2.0
    )?;

    // x axis and its title
    writeln!(
        svg,
        r#"<line x1="{MARGIN}" y1="{y_base}" x2="{}" y2="{y_base}" stroke="black" stroke-width="2"/>"#,
        CANVAS_WIDTH - MARGIN
    )?;
    writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-family="{FONT}" font-size="12" font-weight="bold" fill="black">Hours 00:00 to 24:00</text>"#,
        CANVAS_WIDTH / 2.0,
        y_base + 40.0
    )?;

    for (i, (hour, counts)) in bins.iter().enumerate() {
        let x1 = MARGIN + i as f64 * (BAR_WIDTH * 2.0 + BAR_SPACING);

        for (offset, junction) in JUNCTIONS.into_iter().enumerate() {
            let value = counts.get(junction);
            let x = x1 + offset as f64 * BAR_WIDTH;
            let top = y_base - value as f64 * y_scale;
            let fill = colour(junction);

            writeln!(
                svg,
                r#"<rect x="{x}" y="{top}" width="{BAR_WIDTH}" height="{}" fill="{fill}" stroke="black"/>"#,
                y_base - top
            )?;
            writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="middle" font-family="{FONT}" font-size="8" fill="{fill}">{value}</text>"#,
                x + BAR_WIDTH / 2.0,
                top - 10.0
            )?;
        }

        writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="{FONT}" font-size="10" fill="black">{hour}</text>"#,
            x1 + BAR_WIDTH,
            y_base + 20.0
        )?;
    }

    draw_legend(svg)?;
    writeln!(svg, "</svg>")
}

fn draw_legend(svg: &mut String) -> fmt::Result {
    let legend_x = 70.0;
    for (i, junction) in JUNCTIONS.into_iter().enumerate() {
        let legend_y = 30.0 + i as f64 * 30.0;
        writeln!(
            svg,
            r#"<rect x="{legend_x}" y="{legend_y}" width="20" height="20" fill="{}" stroke="black"/>"#,
            colour(junction)
        )?;
        writeln!(
            svg,
            r#"<text x="{}" y="{}" dominant-baseline="middle" font-family="{FONT}" font-size="10" fill="black">{}</text>"#,
            legend_x + 30.0,
            legend_y + 10.0,
            junction.name()
        )?;
    }
    Ok(())
}

/// File name of the histogram for `date`.
pub fn chart_file_name(date: &SurveyDate) -> String {
    format!("histogram_{date}.svg")
}

/// Renders the histogram and writes it into `dir`, returning the file path.
#[tracing::instrument(skip_all, fields(date = %date, dir = %dir.display()))]
pub fn write_histogram(
    bins: &HourlyJunctionBins,
    date: &SurveyDate,
    dir: &Path,
) -> Result<PathBuf, SurveyError> {
    let svg = render_svg(bins, date)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(chart_file_name(date));
    fs::write(&path, svg)?;

    info!(path = %path.display(), hours = bins.len(), "Histogram written");
    Ok(path)
}
