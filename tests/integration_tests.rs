use std::fs;
use std::path::{Path, PathBuf};

use traffic_survey::analyzers::types::TrackedJunction;
use traffic_survey::error::SurveyError;
use traffic_survey::output::{SEPARATOR, append_results, report_lines};
use traffic_survey::summarize_file;
use traffic_survey::survey::SurveyDate;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_path() -> PathBuf {
    let date = SurveyDate::new(15, 6, 2024).unwrap();
    fixtures().join(date.file_name())
}

#[test]
fn test_full_pipeline() {
    let (report, bins) = summarize_file(&fixture_path()).expect("Failed to summarise fixture");

    assert_eq!(report.total_vehicles, 12);
    assert_eq!(report.total_trucks, 2);
    assert_eq!(report.truck_percentage, 17);
    assert_eq!(report.total_electric, 3);
    assert_eq!(report.two_wheeled, 5);
    assert_eq!(report.buses_north_from_elm_rabbit, 1);
    assert_eq!(report.straight_through, 5);
    assert_eq!(report.over_speed_limit, 5);
    assert_eq!(report.elm_rabbit_total, 4);
    assert_eq!(report.elm_rabbit_scooters, 1);
    assert_eq!(report.scooter_percentage, 25);
    assert_eq!(report.hanley_westway_total, 7);
    assert_eq!(report.bicycles, 2);
    assert_eq!(report.avg_bicycles_per_hour, 0);
    assert_eq!(report.peak_hour_count, 3);
    assert_eq!(report.peak_hours, vec![7, 17]);
    assert_eq!(
        report.peak_hour_label,
        "Between 07:00 and 8:00, Between 17:00 and 18:00"
    );
    assert_eq!(report.rain_hours, 3);

    let hours: Vec<_> = bins.iter().map(|(h, _)| h.to_string()).collect();
    assert_eq!(hours, vec!["00", "07", "08", "17", "18"]);
    assert_eq!(bins.get("07").unwrap().elm_rabbit, 1);
    assert_eq!(bins.get("07").unwrap().hanley_westway, 3);
    assert_eq!(bins.get("17").unwrap().elm_rabbit, 0);
    assert_eq!(bins.get("17").unwrap().hanley_westway, 3);
}

#[test]
fn test_counters_respect_bounds() {
    let (report, bins) = summarize_file(&fixture_path()).unwrap();

    for count in [
        report.total_trucks,
        report.total_electric,
        report.two_wheeled,
        report.buses_north_from_elm_rabbit,
        report.straight_through,
        report.over_speed_limit,
        report.elm_rabbit_total,
        report.hanley_westway_total,
    ] {
        assert!(count <= report.total_vehicles);
    }
    assert!(report.elm_rabbit_scooters <= report.elm_rabbit_total);
    assert!(report.two_wheeled >= report.bicycles);
    assert!(report.truck_percentage <= 100);
    assert!(report.scooter_percentage <= 100);

    assert_eq!(
        bins.total(TrackedJunction::ElmRabbit) + bins.total(TrackedJunction::HanleyWestway),
        report.elm_rabbit_total + report.hanley_westway_total
    );
}

#[test]
fn test_repeated_passes_are_identical() {
    let first = summarize_file(&fixture_path()).unwrap();
    let second = summarize_file(&fixture_path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_file_is_not_found() {
    let date = SurveyDate::new(1, 1, 2000).unwrap();
    let path = fixtures().join(date.file_name());

    match summarize_file(&path) {
        Err(SurveyError::NotFound { path: p }) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_row_fails_whole_pass() {
    let path = std::env::temp_dir().join("traffic_survey_malformed.csv");
    let mut content = fs::read_to_string(fixture_path()).unwrap();
    content.push_str("Hanley Highway/Westway,15/06/2024,19:00:00,N,S,Clear,30,,Car,False\n");
    fs::write(&path, content).unwrap();

    match summarize_file(&path) {
        Err(SurveyError::MalformedRecord { line, field, .. }) => {
            assert_eq!(line, 14);
            assert_eq!(field, "VehicleSpeed");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_header_only_file_reports_zeros() {
    let path = std::env::temp_dir().join("traffic_survey_header_only.csv");
    let header = fs::read_to_string(fixture_path())
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    fs::write(&path, header + "\n").unwrap();

    let (report, bins) = summarize_file(&path).unwrap();
    assert_eq!(report.total_vehicles, 0);
    assert_eq!(report.truck_percentage, 0);
    assert_eq!(report.scooter_percentage, 0);
    assert_eq!(report.peak_hour_count, 0);
    assert_eq!(report.peak_hour_label, "");
    assert_eq!(report.rain_hours, 0);
    assert!(bins.is_empty());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_report_is_appended_to_results_log() {
    let results = std::env::temp_dir().join("traffic_survey_results_it.txt");
    let _ = fs::remove_file(&results);

    let path = fixture_path();
    let (report, _) = summarize_file(&path).unwrap();
    let lines = report_lines(&path, &report);
    append_results(&results, &lines).unwrap();

    let content = fs::read_to_string(&results).unwrap();
    assert!(content.contains("The total number of vehicles recorded for this date is 12"));
    assert!(content.contains("The number of hours of rain for this date is 3"));
    assert!(content.trim_end().ends_with(SEPARATOR));

    fs::remove_file(&results).unwrap();
}
