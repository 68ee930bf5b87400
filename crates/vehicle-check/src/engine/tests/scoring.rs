use super::common::{date, defect, failed_test, passed_test, petrol_snapshot};
use crate::engine::domain::DefectSeverity;
use crate::engine::mileage::{detect_clocking, ClockingThresholds, MileageTimeline};
use crate::engine::patterns::{analyze_failure_patterns, DefectVocabulary};
use crate::engine::scoring::{condition_score, ScoringWeights};

fn score(records: &[crate::engine::domain::InspectionRecord]) -> Option<u8> {
    let timeline = MileageTimeline::build(records);
    let clocking = detect_clocking(&timeline, &ClockingThresholds::default());
    let patterns = analyze_failure_patterns(records, &DefectVocabulary::standard());

    condition_score(
        &petrol_snapshot(),
        records,
        &clocking,
        &patterns,
        &ScoringWeights::default(),
        date("2025-06-01"),
    )
}

#[test]
fn empty_history_has_no_score() {
    assert_eq!(score(&[]), None);
}

#[test]
fn clean_passing_history_scores_full_marks() {
    let records = vec![
        passed_test(1, "2023-05-01", 40_000),
        passed_test(2, "2024-05-01", 47_000),
    ];
    assert_eq!(score(&records), Some(100));
}

#[test]
fn each_failed_test_costs_three_points() {
    let records = vec![
        failed_test(1, "2023-05-01", 40_000, Vec::new()),
        passed_test(2, "2023-05-08", 40_020),
        failed_test(3, "2024-05-01", 47_000, Vec::new()),
        passed_test(4, "2024-05-08", 47_015),
    ];
    assert_eq!(score(&records), Some(94));
}

#[test]
fn advisories_beyond_three_cost_one_point_each() {
    let mut record = passed_test(1, "2023-05-01", 40_000);
    record.defects = vec![
        defect("Nearside front tyre worn", DefectSeverity::Advisory),
        defect("Offside front tyre worn", DefectSeverity::Advisory),
        defect("Slight oil leak", DefectSeverity::Advisory),
        defect("Wiper blade deteriorated", DefectSeverity::Advisory),
        defect("Undertray insecure", DefectSeverity::Advisory),
    ];
    let records = vec![record, passed_test(2, "2024-05-01", 47_000)];

    assert_eq!(score(&records), Some(98));
}

#[test]
fn a_clocked_vehicle_loses_fifteen_points() {
    let records = vec![
        passed_test(1, "2023-05-01", 60_000),
        passed_test(2, "2024-05-01", 45_000),
    ];
    assert_eq!(score(&records), Some(85));
}

#[test]
fn dangerous_records_and_recurring_faults_stack() {
    let records = vec![
        failed_test(
            1,
            "2022-05-01",
            40_000,
            vec![defect("Brake pipe excessively corroded", DefectSeverity::Dangerous)],
        ),
        failed_test(
            2,
            "2023-05-01",
            47_000,
            vec![defect("Brake disc worn", DefectSeverity::Major)],
        ),
        passed_test(3, "2024-05-01", 54_000),
    ];

    // Two failures (6), one dangerous record (8), one brakes pattern with
    // two occurrences (2).
    assert_eq!(score(&records), Some(84));
}

#[test]
fn an_expired_mot_costs_ten_points() {
    let mut snapshot = petrol_snapshot();
    snapshot.mot_status = Some("Not valid".to_string());
    snapshot.mot_expiry_date = Some(date("2025-01-01"));

    let records = vec![
        passed_test(1, "2023-05-01", 40_000),
        passed_test(2, "2024-05-01", 47_000),
    ];
    let timeline = MileageTimeline::build(&records);
    let clocking = detect_clocking(&timeline, &ClockingThresholds::default());

    let result = condition_score(
        &snapshot,
        &records,
        &clocking,
        &[],
        &ScoringWeights::default(),
        date("2025-06-01"),
    );
    assert_eq!(result, Some(90));
}

#[test]
fn score_is_deterministic_and_never_negative() {
    let mut records = Vec::new();
    for sequence in 1..=12u32 {
        let year = 2013 + sequence as i32;
        records.push(failed_test(
            sequence,
            &format!("{year}-05-01"),
            40_000 + i64::from(sequence) * 500,
            vec![
                defect("Brake pipe excessively corroded", DefectSeverity::Dangerous),
                defect("Tyre cord exposed", DefectSeverity::Dangerous),
            ],
        ));
    }

    let first = score(&records);
    let second = score(&records);
    assert_eq!(first, second);
    assert_eq!(first, Some(0));
}
