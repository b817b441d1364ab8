//! Survey identifiers: a validated calendar date and the file it maps to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::SurveyError;

pub const DAY_RANGE: (u32, u32) = (1, 31);
pub const MONTH_RANGE: (u32, u32) = (1, 12);
pub const YEAR_RANGE: (u32, u32) = (2000, 2024);

/// A survey day within the range the traffic survey covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SurveyDate(NaiveDate);

/// Checks one date component against its inclusive bounds.
pub fn check_component(
    component: &'static str,
    value: u32,
    (min, max): (u32, u32),
) -> Result<u32, SurveyError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(SurveyError::OutOfRange {
            component,
            min,
            max,
        })
    }
}

impl SurveyDate {
    /// Validates each component's range, then that they form a real date.
    pub fn new(day: u32, month: u32, year: u32) -> Result<Self, SurveyError> {
        check_component("day", day, DAY_RANGE)?;
        check_component("month", month, MONTH_RANGE)?;
        let year = check_component("year", year, YEAR_RANGE)? as i32;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(SurveyDate)
            .ok_or(SurveyError::InvalidDate { day, month, year })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Name of the CSV file holding this day's observations.
    pub fn file_name(&self) -> String {
        format!(
            "traffic_data{:02}{:02}{:04}.csv",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

impl fmt::Display for SurveyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d-%m-%Y"))
    }
}

impl FromStr for SurveyDate {
    type Err = SurveyError;

    /// Parses `DD-MM-YYYY` (or `DD/MM/YYYY`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SurveyError::InvalidIdentifier(s.to_string());

        let parts: Vec<u32> = s
            .trim()
            .split(['-', '/'])
            .map(|p| p.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [day, month, year] => SurveyDate::new(*day, *month, *year),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_zero_padded() {
        let date = SurveyDate::new(5, 6, 2024).unwrap();
        assert_eq!(date.file_name(), "traffic_data05062024.csv");
    }

    #[test]
    fn test_display_matches_prompt_format() {
        let date = SurveyDate::new(15, 6, 2024).unwrap();
        assert_eq!(date.to_string(), "15-06-2024");
    }

    #[test]
    fn test_component_ranges() {
        assert!(matches!(
            SurveyDate::new(0, 6, 2024),
            Err(SurveyError::OutOfRange { component: "day", .. })
        ));
        assert!(matches!(
            SurveyDate::new(1, 13, 2024),
            Err(SurveyError::OutOfRange { component: "month", .. })
        ));
        assert!(matches!(
            SurveyDate::new(1, 1, 1999),
            Err(SurveyError::OutOfRange { component: "year", .. })
        ));
        assert!(matches!(
            SurveyDate::new(1, 1, 2025),
            Err(SurveyError::OutOfRange { component: "year", .. })
        ));
    }

    #[test]
    fn test_impossible_dates_rejected() {
        assert!(matches!(
            SurveyDate::new(31, 4, 2024),
            Err(SurveyError::InvalidDate { .. })
        ));
        assert!(matches!(
            SurveyDate::new(29, 2, 2023),
            Err(SurveyError::InvalidDate { .. })
        ));
        assert!(SurveyDate::new(29, 2, 2024).is_ok());
    }

    #[test]
    fn test_from_str() {
        let date: SurveyDate = "15-06-2024".parse().unwrap();
        assert_eq!(date, SurveyDate::new(15, 6, 2024).unwrap());
        let date: SurveyDate = "1/2/2020".parse().unwrap();
        assert_eq!(date.file_name(), "traffic_data01022020.csv");

        assert!(matches!(
            "2024-06".parse::<SurveyDate>(),
            Err(SurveyError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            "aa-bb-cccc".parse::<SurveyDate>(),
            Err(SurveyError::InvalidIdentifier(_))
        ));
    }
}
