use crate::engine::domain::{
    DefectObservation, DefectSeverity, InspectionRecord, OdometerResultType, OdometerUnit,
    TestResult, VehicleSnapshot,
};
use chrono::NaiveDate;

pub(super) fn date(value: &str) -> NaiveDate {
    value.parse().expect("valid date")
}

pub(super) fn petrol_snapshot() -> VehicleSnapshot {
    VehicleSnapshot {
        registration: "AB12CDE".to_string(),
        make: Some("FORD".to_string()),
        colour: Some("BLUE".to_string()),
        fuel_type: Some("PETROL".to_string()),
        year_of_manufacture: Some(2016),
        engine_capacity: Some(1_498),
        co2_emissions: Some(120),
        euro_status: Some("Euro 6".to_string()),
        tax_status: Some("Taxed".to_string()),
        tax_due_date: None,
        mot_status: Some("Valid".to_string()),
        mot_expiry_date: Some(date("2026-05-01")),
        date_of_last_v5c_issued: None,
        marked_for_export: None,
        type_approval: Some("M1".to_string()),
    }
}

pub(super) fn diesel_snapshot() -> VehicleSnapshot {
    VehicleSnapshot {
        fuel_type: Some("DIESEL".to_string()),
        euro_status: None,
        ..petrol_snapshot()
    }
}

pub(super) fn electric_snapshot() -> VehicleSnapshot {
    VehicleSnapshot {
        fuel_type: Some("ELECTRICITY".to_string()),
        co2_emissions: Some(0),
        euro_status: None,
        ..petrol_snapshot()
    }
}

pub(super) fn passed_test(sequence: u32, day: &str, miles: i64) -> InspectionRecord {
    InspectionRecord {
        sequence,
        test_id: Some(format!("2000000{sequence}")),
        date: date(day),
        result: TestResult::Passed,
        odometer_value: Some(miles),
        odometer_unit: Some(OdometerUnit::Miles),
        odometer_result: OdometerResultType::Read,
        expiry_date: None,
        defects: Vec::new(),
    }
}

pub(super) fn failed_test(
    sequence: u32,
    day: &str,
    miles: i64,
    defects: Vec<DefectObservation>,
) -> InspectionRecord {
    InspectionRecord {
        result: TestResult::Failed,
        defects,
        ..passed_test(sequence, day, miles)
    }
}

pub(super) fn defect(text: &str, severity: DefectSeverity) -> DefectObservation {
    DefectObservation {
        text: text.to_string(),
        severity,
    }
}
