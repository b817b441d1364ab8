use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::analyzers::types::{HourlyJunctionBins, MetricReport, TrackedJunction};
use crate::analyzers::utility::{percentage, round_ratio};
use crate::error::SurveyError;
use crate::parser::VehicleObservation;

/// Vehicle types counted as two-wheeled.
static TWO_WHEELED: &[&str] = &["Bicycle", "Motorcycle", "Scooter"];

/// The survey data spells buses "Buss"; the corrected spelling is accepted too.
static BUS_TYPES: &[&str] = &["Buss", "Bus"];

/// Weather labels that make an hour a rain hour.
static RAIN: &[&str] = &["Light Rain", "Heavy Rain"];

const NORTH: &str = "N";

/// Hours in the survey day, used as the divisor for the bicycle average.
const HOURS_PER_DAY: usize = 24;

/// Running totals for one pass over a survey day.
///
/// Feed every observation to [`SurveyAccumulator::observe`], then call
/// [`SurveyAccumulator::finish`], which consumes the accumulator so it cannot
/// be fed again.
#[derive(Debug, Default)]
pub struct SurveyAccumulator {
    total_vehicles: usize,
    total_trucks: usize,
    total_electric: usize,
    two_wheeled: usize,
    buses_north_from_elm_rabbit: usize,
    straight_through: usize,
    over_speed_limit: usize,
    elm_rabbit_total: usize,
    elm_rabbit_scooters: usize,
    hanley_westway_total: usize,
    /// Hanley Highway/Westway counts per hour, in first-seen order.
    hanley_hourly: Vec<(u8, usize)>,
    rain_hours: BTreeSet<u8>,
    bicycles: usize,
    bins: HourlyJunctionBins,
}

impl SurveyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every counting rule to one observation.
    pub fn observe(&mut self, obs: &VehicleObservation) {
        let vehicle = obs.vehicle_type.as_str();
        let junction = TrackedJunction::from_name(&obs.junction_name);

        self.total_vehicles += 1;

        if vehicle == "Truck" {
            self.total_trucks += 1;
        }

        if obs.is_electric_or_hybrid {
            self.total_electric += 1;
        }

        if TWO_WHEELED.contains(&vehicle) {
            self.two_wheeled += 1;
        }

        if junction == Some(TrackedJunction::ElmRabbit)
            && obs.direction_out == NORTH
            && BUS_TYPES.contains(&vehicle)
        {
            self.buses_north_from_elm_rabbit += 1;
        }

        if obs.direction_in == obs.direction_out {
            self.straight_through += 1;
        }

        if obs.vehicle_speed > obs.junction_speed_limit {
            self.over_speed_limit += 1;
        }

        match junction {
            Some(TrackedJunction::ElmRabbit) => {
                self.elm_rabbit_total += 1;
                if vehicle == "Scooter" {
                    self.elm_rabbit_scooters += 1;
                }
            }
            Some(TrackedJunction::HanleyWestway) => {
                self.hanley_westway_total += 1;
                match self.hanley_hourly.iter_mut().find(|(h, _)| *h == obs.hour) {
                    Some((_, count)) => *count += 1,
                    None => self.hanley_hourly.push((obs.hour, 1)),
                }
            }
            None => {}
        }

        if RAIN.contains(&obs.weather_condition.as_str()) {
            self.rain_hours.insert(obs.hour);
        }

        if vehicle == "Bicycle" {
            self.bicycles += 1;
        }

        self.bins.record(obs.hour, junction);
    }

    /// Computes the derived metrics and hands back the finished report and bins.
    pub fn finish(self) -> (MetricReport, HourlyJunctionBins) {
        let peak_hour_count = self
            .hanley_hourly
            .iter()
            .map(|(_, count)| *count)
            .max()
            .unwrap_or(0);

        let peak_hours: Vec<u8> = self
            .hanley_hourly
            .iter()
            .filter(|(_, count)| *count == peak_hour_count)
            .map(|(hour, _)| *hour)
            .collect();

        let peak_hour_label = peak_hours
            .iter()
            .map(|hour| peak_range(*hour))
            .collect::<Vec<_>>()
            .join(", ");

        let report = MetricReport {
            total_vehicles: self.total_vehicles,
            total_trucks: self.total_trucks,
            total_electric: self.total_electric,
            two_wheeled: self.two_wheeled,
            buses_north_from_elm_rabbit: self.buses_north_from_elm_rabbit,
            straight_through: self.straight_through,
            truck_percentage: percentage(self.total_trucks, self.total_vehicles),
            bicycles: self.bicycles,
            avg_bicycles_per_hour: round_ratio(self.bicycles, HOURS_PER_DAY),
            over_speed_limit: self.over_speed_limit,
            elm_rabbit_total: self.elm_rabbit_total,
            elm_rabbit_scooters: self.elm_rabbit_scooters,
            hanley_westway_total: self.hanley_westway_total,
            scooter_percentage: percentage(self.elm_rabbit_scooters, self.elm_rabbit_total),
            peak_hour_count,
            peak_hours,
            peak_hour_label,
            rain_hours: self.rain_hours.len(),
        };

        (report, self.bins)
    }
}

/// Renders an hour as the range label used in the report, e.g. `Between 08:00 and 9:00`.
pub fn peak_range(hour: u8) -> String {
    format!("Between {hour:02}:00 and {}:00", u32::from(hour) + 1)
}

/// Consumes a record stream once and summarises it.
///
/// An empty stream is not an error: every count, percentage and average is 0
/// and the peak label is empty.
///
/// # Errors
///
/// The first error yielded by the stream aborts the pass and is returned
/// unchanged; no partial report is produced.
#[tracing::instrument(skip_all)]
pub fn aggregate<I>(records: I) -> Result<(MetricReport, HourlyJunctionBins), SurveyError>
where
    I: IntoIterator<Item = Result<VehicleObservation, SurveyError>>,
{
    let mut acc = SurveyAccumulator::new();
    for record in records {
        acc.observe(&record?);
    }

    let (report, bins) = acc.finish();
    if report.total_vehicles == 0 {
        debug!("Survey contained no observations");
    }
    info!(
        total_vehicles = report.total_vehicles,
        hours = bins.len(),
        peak_hour_count = report.peak_hour_count,
        "Aggregation complete"
    );

    Ok((report, bins))
}
