mod mapping;
mod parser;

pub use parser::{RawDefect, RawMotHistory, RawMotTest, RawVehicleRecord};

use crate::engine::domain::{DefectObservation, DefectSeverity, InspectionRecord, VehicleSnapshot};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("vehicle payload carries no registration")]
    MissingRegistration,
    #[error("inspection history payload carries no test list")]
    MissingInspections,
}

/// Canonicalize raw provider payloads into the engine's model.
///
/// Fails only when the registration or the inspection list is structurally
/// absent; every other missing field degrades to `None`. Tests are returned
/// oldest first, with same-date ties keeping their provider order so the
/// later record carries the higher sequence number.
pub fn normalize(
    vehicle: &RawVehicleRecord,
    history: &RawMotHistory,
) -> Result<(VehicleSnapshot, Vec<InspectionRecord>), NormalizationError> {
    let registration = vehicle
        .registration
        .as_deref()
        .or(history.registration.as_deref())
        .map(clean_registration)
        .filter(|reg| !reg.is_empty())
        .ok_or(NormalizationError::MissingRegistration)?;

    let raw_tests = history
        .mot_tests
        .as_deref()
        .ok_or(NormalizationError::MissingInspections)?;

    let snapshot = build_snapshot(registration, vehicle);
    let records = build_records(&snapshot.registration, raw_tests);

    Ok((snapshot, records))
}

fn clean_registration(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn build_snapshot(registration: String, vehicle: &RawVehicleRecord) -> VehicleSnapshot {
    VehicleSnapshot {
        registration,
        make: vehicle.make.clone(),
        colour: vehicle.colour.clone(),
        fuel_type: vehicle.fuel_type.clone(),
        year_of_manufacture: vehicle.year_of_manufacture,
        engine_capacity: vehicle.engine_capacity,
        co2_emissions: vehicle.co2_emissions,
        euro_status: vehicle.euro_status.clone(),
        tax_status: vehicle.tax_status.clone(),
        tax_due_date: vehicle.tax_due_date.as_deref().and_then(parser::parse_date),
        mot_status: vehicle.mot_status.clone(),
        mot_expiry_date: vehicle
            .mot_expiry_date
            .as_deref()
            .and_then(parser::parse_date),
        date_of_last_v5c_issued: vehicle
            .date_of_last_v5c_issued
            .as_deref()
            .and_then(parser::parse_date),
        marked_for_export: vehicle.marked_for_export,
        type_approval: vehicle.type_approval.clone(),
    }
}

fn build_records(registration: &str, raw_tests: &[RawMotTest]) -> Vec<InspectionRecord> {
    let mut dated: Vec<(chrono::NaiveDate, &RawMotTest)> = Vec::with_capacity(raw_tests.len());
    for test in raw_tests {
        match test.completed_date.as_deref().and_then(parser::parse_date) {
            Some(date) => dated.push((date, test)),
            None => {
                warn!(%registration, "dropping inspection record with unparseable date");
            }
        }
    }

    // Stable sort keeps provider order within a day, so retests land after
    // the failed test they follow.
    dated.sort_by_key(|(date, _)| *date);

    dated
        .into_iter()
        .enumerate()
        .map(|(index, (date, test))| build_record(registration, index as u32 + 1, date, test))
        .collect()
}

fn build_record(
    registration: &str,
    sequence: u32,
    date: chrono::NaiveDate,
    test: &RawMotTest,
) -> InspectionRecord {
    let defects = test
        .defect_items()
        .iter()
        .filter_map(|defect| classify_defect(registration, defect))
        .collect();

    let odometer_value = test.odometer_reading();

    InspectionRecord {
        sequence,
        test_id: test.mot_test_number.clone(),
        date,
        result: mapping::result_for(test.test_result.as_deref()),
        odometer_value,
        odometer_unit: mapping::odometer_unit_for(test.odometer_unit.as_deref()),
        odometer_result: mapping::odometer_result_for(
            test.odometer_result_type.as_deref(),
            odometer_value.is_some(),
        ),
        expiry_date: test.expiry_date.as_deref().and_then(parser::parse_date),
        defects,
    }
}

fn classify_defect(registration: &str, defect: &RawDefect) -> Option<DefectObservation> {
    let text = defect.description()?.trim();
    if text.is_empty() {
        return None;
    }

    let severity = match defect.kind.as_deref() {
        Some(kind) => mapping::severity_for(kind).unwrap_or_else(|| {
            warn!(%registration, defect_type = kind, "unrecognised defect type, treating as advisory");
            DefectSeverity::Advisory
        }),
        None => DefectSeverity::Advisory,
    };

    Some(DefectObservation {
        text: text.to_string(),
        severity,
    })
}
