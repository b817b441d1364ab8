//! Data types produced by the aggregation pass.

use std::collections::BTreeMap;

use serde::Serialize;

/// Survey site whose traffic is broken out separately ("Junction A").
pub const ELM_RABBIT: &str = "Elm Avenue/Rabbit Road";
/// Survey site used for peak-hour detection ("Junction B").
pub const HANLEY_WESTWAY: &str = "Hanley Highway/Westway";

/// One of the two junctions the report distinguishes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedJunction {
    ElmRabbit,
    HanleyWestway,
}

impl TrackedJunction {
    /// Matches a junction name exactly; every other site is untracked.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ELM_RABBIT => Some(Self::ElmRabbit),
            HANLEY_WESTWAY => Some(Self::HanleyWestway),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ElmRabbit => ELM_RABBIT,
            Self::HanleyWestway => HANLEY_WESTWAY,
        }
    }
}

/// Scalar results of one survey day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricReport {
    pub total_vehicles: usize,
    pub total_trucks: usize,
    pub total_electric: usize,
    pub two_wheeled: usize,
    pub buses_north_from_elm_rabbit: usize,
    pub straight_through: usize,
    pub truck_percentage: usize,
    pub bicycles: usize,
    pub avg_bicycles_per_hour: usize,
    pub over_speed_limit: usize,
    pub elm_rabbit_total: usize,
    pub elm_rabbit_scooters: usize,
    pub hanley_westway_total: usize,
    pub scooter_percentage: usize,
    pub peak_hour_count: usize,
    /// Hours sharing the peak, in the order they were first seen.
    pub peak_hours: Vec<u8>,
    pub peak_hour_label: String,
    pub rain_hours: usize,
}

/// Vehicle counts for one hour at each tracked junction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JunctionCounts {
    pub elm_rabbit: usize,
    pub hanley_westway: usize,
}

impl JunctionCounts {
    pub fn get(&self, junction: TrackedJunction) -> usize {
        match junction {
            TrackedJunction::ElmRabbit => self.elm_rabbit,
            TrackedJunction::HanleyWestway => self.hanley_westway,
        }
    }

    fn increment(&mut self, junction: TrackedJunction) {
        match junction {
            TrackedJunction::ElmRabbit => self.elm_rabbit += 1,
            TrackedJunction::HanleyWestway => self.hanley_westway += 1,
        }
    }

    /// The larger of the two counts.
    pub fn max(&self) -> usize {
        self.elm_rabbit.max(self.hanley_westway)
    }
}

/// Hour label (`"00"`..`"23"`) to per-junction counts, for charting.
///
/// Sparse: an hour appears once any observation falls in it, and then carries
/// both counters. Iteration is always in ascending hour order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HourlyJunctionBins(BTreeMap<String, JunctionCounts>);

impl HourlyJunctionBins {
    /// Two-digit label for an hour of the day.
    pub fn label(hour: u8) -> String {
        format!("{hour:02}")
    }

    /// Makes sure `hour` has an entry, then counts one vehicle at `junction`.
    pub(crate) fn record(&mut self, hour: u8, junction: Option<TrackedJunction>) {
        let counts = self.0.entry(Self::label(hour)).or_default();
        if let Some(junction) = junction {
            counts.increment(junction);
        }
    }

    pub fn get(&self, label: &str) -> Option<&JunctionCounts> {
        self.0.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JunctionCounts)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest single-junction count across all hours; 0 when empty.
    pub fn max_count(&self) -> usize {
        self.0.values().map(JunctionCounts::max).max().unwrap_or(0)
    }

    /// Sum of one junction's counts over the day.
    pub fn total(&self, junction: TrackedJunction) -> usize {
        self.0.values().map(|c| c.get(junction)).sum()
    }
}

impl FromIterator<(String, JunctionCounts)> for HourlyJunctionBins {
    fn from_iter<T: IntoIterator<Item = (String, JunctionCounts)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_junction_exact_match() {
        assert_eq!(
            TrackedJunction::from_name("Elm Avenue/Rabbit Road"),
            Some(TrackedJunction::ElmRabbit)
        );
        assert_eq!(
            TrackedJunction::from_name("Hanley Highway/Westway"),
            Some(TrackedJunction::HanleyWestway)
        );
        assert_eq!(TrackedJunction::from_name("elm avenue/rabbit road"), None);
        assert_eq!(TrackedJunction::from_name("Western Way/Bond Street"), None);
    }

    #[test]
    fn test_record_initializes_both_counters() {
        let mut bins = HourlyJunctionBins::default();
        bins.record(7, Some(TrackedJunction::HanleyWestway));

        let counts = bins.get("07").unwrap();
        assert_eq!(counts.elm_rabbit, 0);
        assert_eq!(counts.hanley_westway, 1);
    }

    #[test]
    fn test_iter_is_sorted_by_hour() {
        let mut bins = HourlyJunctionBins::default();
        bins.record(14, Some(TrackedJunction::ElmRabbit));
        bins.record(3, Some(TrackedJunction::ElmRabbit));
        bins.record(9, None);

        let hours: Vec<_> = bins.iter().map(|(h, _)| h.to_string()).collect();
        assert_eq!(hours, vec!["03", "09", "14"]);
    }

    #[test]
    fn test_max_and_totals() {
        let mut bins = HourlyJunctionBins::default();
        assert_eq!(bins.max_count(), 0);

        bins.record(8, Some(TrackedJunction::ElmRabbit));
        bins.record(8, Some(TrackedJunction::ElmRabbit));
        bins.record(8, Some(TrackedJunction::HanleyWestway));
        bins.record(9, Some(TrackedJunction::HanleyWestway));

        assert_eq!(bins.max_count(), 2);
        assert_eq!(bins.total(TrackedJunction::ElmRabbit), 2);
        assert_eq!(bins.total(TrackedJunction::HanleyWestway), 2);
    }

    #[test]
    fn test_bins_serialize_as_map() {
        let bins: HourlyJunctionBins = [(
            "08".to_string(),
            JunctionCounts {
                elm_rabbit: 1,
                hanley_westway: 2,
            },
        )]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&bins).unwrap();
        assert_eq!(json, r#"{"08":{"elm_rabbit":1,"hanley_westway":2}}"#);
    }
}
