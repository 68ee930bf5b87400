use chrono::NaiveDate;
use vehicle_check::engine::{
    normalize, HistoryAnalysisEngine, NormalizationError, RawMotHistory, RawVehicleRecord,
    RiskLevel, ScoreBand,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

fn vehicle_payload() -> RawVehicleRecord {
    serde_json::from_value(serde_json::json!({
        "registration": "AB12 CDE",
        "make": "FORD",
        "colour": "BLUE",
        "fuelType": "PETROL",
        "yearOfManufacture": 2016,
        "engineCapacity": 1498,
        "co2Emissions": 120,
        "euroStatus": "Euro 6",
        "taxStatus": "Taxed",
        "taxDueDate": "2025-11-01",
        "motStatus": "Valid",
        "motExpiryDate": "2026-03-14",
        "dateOfLastV5CIssued": "2023-08-20"
    }))
    .expect("vehicle payload deserializes")
}

fn history_payload() -> RawMotHistory {
    serde_json::from_value(serde_json::json!({
        "registration": "AB12CDE",
        "motTests": [
            {
                "completedDate": "2024-03-14T09:30:00Z",
                "testResult": "PASSED",
                "odometerValue": "47,500",
                "odometerUnit": "MI",
                "odometerResultType": "READ",
                "expiryDate": "2025-03-14",
                "motTestNumber": "100000000003",
                "defects": [
                    {"text": "Nearside front tyre worn close to legal limit", "type": "ADVISORY"}
                ]
            },
            {
                "completedDate": "2022-03-10T11:00:00Z",
                "testResult": "FAILED",
                "odometerValue": 33000,
                "odometerUnit": "MI",
                "odometerResultType": "READ",
                "motTestNumber": "100000000001",
                "rfrAndComments": [
                    {"text": "Offside front brake disc worn", "type": "MAJOR"}
                ]
            },
            {
                "completedDate": "2023-03-12T10:00:00Z",
                "testResult": "PASSED",
                "odometerValue": 40100,
                "odometerUnit": "MI",
                "odometerResultType": "READ",
                "motTestNumber": "100000000002"
            }
        ]
    }))
    .expect("history payload deserializes")
}

#[test]
fn raw_payloads_flow_through_to_a_full_report() {
    let (snapshot, records) =
        normalize(&vehicle_payload(), &history_payload()).expect("payloads normalize");

    assert_eq!(snapshot.registration, "AB12CDE");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date.to_string(), "2022-03-10");

    let report = HistoryAnalysisEngine::default().analyze(&snapshot, &records, today());

    assert_eq!(report.mot_summary.total_tests, 3);
    assert_eq!(report.mot_summary.total_failures, 1);
    assert_eq!(report.mot_summary.current_odometer, Some(47_500));
    assert!(!report.clocking_analysis.clocked);
    assert_eq!(report.clocking_analysis.risk_level, RiskLevel::None);
    // One failed test costs three points.
    assert_eq!(report.condition_score, Some(97));
    assert_eq!(report.condition_band, Some(ScoreBand::Good));
    assert_eq!(report.ulez_compliance.euro_standard, Some(6));
    assert_eq!(
        report.tax_calculation.as_ref().expect("tax bands").band,
        "G"
    );
    assert_eq!(report.vehicle_stats.mot_days_remaining, Some(286));
    assert_eq!(report.vehicle_stats.advisory_items, 1);
    assert_eq!(report.vehicle_stats.major_items, 1);
}

#[test]
fn an_empty_history_reports_unknown_risk_without_a_score() {
    let history: RawMotHistory =
        serde_json::from_value(serde_json::json!({"registration": "AB12CDE", "motTests": []}))
            .expect("history payload deserializes");

    let (snapshot, records) = normalize(&vehicle_payload(), &history).expect("normalizes");
    assert!(records.is_empty());

    let report = HistoryAnalysisEngine::default().analyze(&snapshot, &records, today());
    assert_eq!(report.clocking_analysis.risk_level, RiskLevel::Unknown);
    assert_eq!(report.condition_score, None);
    assert!(report.mileage_timeline.is_empty());
}

#[test]
fn a_payload_without_registration_is_rejected() {
    let vehicle = RawVehicleRecord::default();
    let history: RawMotHistory =
        serde_json::from_value(serde_json::json!({"motTests": []})).expect("deserializes");

    let error = normalize(&vehicle, &history).expect_err("no registration anywhere");
    assert!(matches!(error, NormalizationError::MissingRegistration));
}
