use crate::engine::domain::{DefectSeverity, OdometerResultType, OdometerUnit, TestResult};

/// Classify a raw defect type string. Returns `None` for unrecognised types
/// so the caller can fall back to advisory and log the gap.
pub(crate) fn severity_for(raw: &str) -> Option<DefectSeverity> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "DANGEROUS" => Some(DefectSeverity::Dangerous),
        "MAJOR" | "FAIL" => Some(DefectSeverity::Major),
        "MINOR" | "PRS" => Some(DefectSeverity::Minor),
        "ADVISORY" | "USER ENTERED" => Some(DefectSeverity::Advisory),
        _ => None,
    }
}

pub(crate) fn result_for(raw: Option<&str>) -> TestResult {
    match raw.map(|value| value.trim().to_ascii_uppercase()) {
        Some(value) if value == "PASSED" || value == "PASS" => TestResult::Passed,
        Some(value) if value == "FAILED" || value == "FAIL" => TestResult::Failed,
        _ => TestResult::Unknown,
    }
}

pub(crate) fn odometer_unit_for(raw: Option<&str>) -> Option<OdometerUnit> {
    match raw.map(|value| value.trim().to_ascii_uppercase()) {
        Some(value) if value == "MI" || value == "MILES" => Some(OdometerUnit::Miles),
        Some(value) if value == "KM" || value == "KILOMETRES" || value == "KILOMETERS" => {
            Some(OdometerUnit::Kilometres)
        }
        _ => None,
    }
}

/// A missing result type on a test that still carries a reading is treated
/// as READ; the DVSA feed only started populating the field in 2018.
pub(crate) fn odometer_result_for(raw: Option<&str>, has_value: bool) -> OdometerResultType {
    match raw.map(|value| value.trim().to_ascii_uppercase()) {
        Some(value) if value == "READ" => OdometerResultType::Read,
        Some(value) if value == "UNREADABLE" => OdometerResultType::Unreadable,
        Some(value) if value == "NO_ODOMETER" || value == "NO ODOMETER" => {
            OdometerResultType::NoOdometer
        }
        Some(_) => OdometerResultType::Unreadable,
        None if has_value => OdometerResultType::Read,
        None => OdometerResultType::NoOdometer,
    }
}
