//! CSV record source for a day of vehicle observations.
//!
//! [`open`] resolves a survey file and returns an [`ObservationReader`], a
//! forward-only iterator that decodes one row at a time. Each row is first
//! read as a [`RawObservation`] (every column optional) and then validated into
//! a [`VehicleObservation`], so failures can name the offending column.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::SurveyError;

/// One observed vehicle, as recorded by the survey camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleObservation {
    pub vehicle_type: String,
    pub junction_name: String,
    pub direction_in: String,
    pub direction_out: String,
    pub time_of_day: String,
    pub hour: u8,
    pub vehicle_speed: u32,
    pub junction_speed_limit: u32,
    pub weather_condition: String,
    pub is_electric_or_hybrid: bool,
}

/// A row exactly as it appears in the file. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "VehicleType", default)]
    vehicle_type: Option<String>,
    #[serde(rename = "JunctionName", default)]
    junction_name: Option<String>,
    #[serde(rename = "elctricHybrid", default)]
    electric_hybrid: Option<String>,
    #[serde(rename = "travel_Direction_in", default)]
    direction_in: Option<String>,
    #[serde(rename = "travel_Direction_out", default)]
    direction_out: Option<String>,
    #[serde(rename = "VehicleSpeed", default)]
    vehicle_speed: Option<String>,
    #[serde(rename = "JunctionSpeedLimit", default)]
    junction_speed_limit: Option<String>,
    #[serde(rename = "timeOfDay", default)]
    time_of_day: Option<String>,
    #[serde(rename = "Weather_Conditions", default)]
    weather_conditions: Option<String>,
}

impl RawObservation {
    /// Validates the row, reporting the first missing or unparsable column.
    pub fn into_observation(self, line: u64) -> Result<VehicleObservation, SurveyError> {
        let time_of_day = required(self.time_of_day, "timeOfDay", line)?;
        let hour = parse_hour(&time_of_day, line)?;
        let vehicle_speed = parse_count(
            required(self.vehicle_speed, "VehicleSpeed", line)?,
            "VehicleSpeed",
            line,
        )?;
        let junction_speed_limit = parse_count(
            required(self.junction_speed_limit, "JunctionSpeedLimit", line)?,
            "JunctionSpeedLimit",
            line,
        )?;

        Ok(VehicleObservation {
            vehicle_type: required(self.vehicle_type, "VehicleType", line)?,
            junction_name: required(self.junction_name, "JunctionName", line)?,
            direction_in: required(self.direction_in, "travel_Direction_in", line)?,
            direction_out: required(self.direction_out, "travel_Direction_out", line)?,
            time_of_day,
            hour,
            vehicle_speed,
            junction_speed_limit,
            weather_condition: required(self.weather_conditions, "Weather_Conditions", line)?,
            is_electric_or_hybrid: required(self.electric_hybrid, "elctricHybrid", line)?
                .trim()
                .eq_ignore_ascii_case("true"),
        })
    }
}

fn malformed(line: u64, field: &str, reason: impl Into<String>) -> SurveyError {
    SurveyError::MalformedRecord {
        line,
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn required(value: Option<String>, field: &str, line: u64) -> Result<String, SurveyError> {
    value.ok_or_else(|| malformed(line, field, "missing value"))
}

fn parse_count(value: String, field: &str, line: u64) -> Result<u32, SurveyError> {
    value
        .trim()
        .parse()
        .map_err(|e| malformed(line, field, format!("'{value}' is not an integer: {e}")))
}

/// Extracts the hour from the leading `HH` of a time-of-day value.
fn parse_hour(time_of_day: &str, line: u64) -> Result<u8, SurveyError> {
    let hour = time_of_day
        .get(..2)
        .filter(|hh| hh.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|hh| hh.parse::<u8>().ok())
        .filter(|h| *h < 24);

    hour.ok_or_else(|| {
        malformed(
            line,
            "timeOfDay",
            format!("'{time_of_day}' does not start with an hour 00-23"),
        )
    })
}

/// Streams [`VehicleObservation`]s out of a CSV source, one row at a time.
///
/// The underlying reader is owned here and released when the iterator is
/// dropped, whether the pass finished or stopped on an error. After the first
/// error the iterator is fused.
pub struct ObservationReader<R = File> {
    source: PathBuf,
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
    failed: bool,
}

/// Opens the survey file at `path`.
///
/// # Errors
///
/// Returns [`SurveyError::NotFound`] if the file does not exist and
/// [`SurveyError::MalformedRecord`] if the header row cannot be read.
pub fn open(path: &Path) -> Result<ObservationReader<File>, SurveyError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SurveyError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SurveyError::Io(e),
    })?;
    debug!(path = %path.display(), "Opened survey file");

    ObservationReader::from_reader(path, file)
}

impl<R: Read> ObservationReader<R> {
    /// Wraps any byte source; `source` is only used to label the report.
    pub fn from_reader(source: impl Into<PathBuf>, rdr: R) -> Result<Self, SurveyError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(rdr);
        let headers = reader
            .headers()
            .map_err(|e| csv_error(e, "<header>"))?
            .clone();

        Ok(Self {
            source: source.into(),
            reader,
            headers,
            record: StringRecord::new(),
            failed: false,
        })
    }

    /// Where the records come from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn decode(&self) -> Result<VehicleObservation, SurveyError> {
        let line = self.record.position().map_or(0, |p| p.line());
        let raw: RawObservation = self
            .record
            .deserialize(Some(&self.headers))
            .map_err(|e| csv_error(e, "<row>"))?;
        raw.into_observation(line)
    }
}

impl<R: Read> Iterator for ObservationReader<R> {
    type Item = Result<VehicleObservation, SurveyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = match self.reader.read_record(&mut self.record) {
            Ok(false) => return None,
            Ok(true) => self.decode(),
            Err(e) => Err(csv_error(e, "<row>")),
        };

        self.failed = item.is_err();
        Some(item)
    }
}

fn csv_error(err: csv::Error, field: &str) -> SurveyError {
    let line = err.position().map_or(0, |p| p.line());
    if !err.is_io_error() {
        return malformed(line, field, err.to_string());
    }
    match err.into_kind() {
        csv::ErrorKind::Io(io) => SurveyError::Io(io),
        kind => malformed(line, field, format!("{kind:?}")),
    }
}
