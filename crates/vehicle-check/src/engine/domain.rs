use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable vehicle record assembled once per check from the upstream data
/// collaborator. Every field except the registration may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub registration: String,
    pub make: Option<String>,
    pub colour: Option<String>,
    pub fuel_type: Option<String>,
    pub year_of_manufacture: Option<i32>,
    pub engine_capacity: Option<u32>,
    pub co2_emissions: Option<u32>,
    pub euro_status: Option<String>,
    pub tax_status: Option<String>,
    pub tax_due_date: Option<NaiveDate>,
    pub mot_status: Option<String>,
    pub mot_expiry_date: Option<NaiveDate>,
    pub date_of_last_v5c_issued: Option<NaiveDate>,
    pub marked_for_export: Option<bool>,
    pub type_approval: Option<String>,
}

impl VehicleSnapshot {
    pub fn fuel_category(&self) -> FuelCategory {
        FuelCategory::classify(self.fuel_type.as_deref())
    }

    /// Whether the MOT is currently valid. `None` when neither the status
    /// string nor an expiry date gives any signal.
    pub fn mot_valid_on(&self, today: NaiveDate) -> Option<bool> {
        if let Some(expiry) = self.mot_expiry_date {
            if expiry < today {
                return Some(false);
            }
        }

        match self.mot_status.as_deref() {
            Some(status) => {
                let status = status.trim().to_ascii_lowercase();
                Some(status == "valid")
            }
            None => self.mot_expiry_date.map(|expiry| expiry >= today),
        }
    }
}

/// Broad fuel grouping used by the compliance and tax rules. Hybrids resolve
/// to their combustion side: a diesel hybrid is gated like a diesel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCategory {
    Petrol,
    Diesel,
    ZeroEmission,
    Other,
    Unknown,
}

impl FuelCategory {
    pub fn classify(fuel_type: Option<&str>) -> Self {
        let Some(raw) = fuel_type else {
            return Self::Unknown;
        };
        let fuel = raw.trim().to_ascii_uppercase();
        if fuel.is_empty() {
            return Self::Unknown;
        }
        if matches!(fuel.as_str(), "ELECTRICITY" | "ELECTRIC" | "HYDROGEN") {
            return Self::ZeroEmission;
        }
        if fuel.contains("DIESEL") || fuel == "HEAVY OIL" {
            return Self::Diesel;
        }
        if fuel.contains("PETROL") {
            return Self::Petrol;
        }
        Self::Other
    }
}

/// One historical roadworthiness test. Insertion order across a history is
/// chronological; same-date ties carry a higher sequence number on the later
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub sequence: u32,
    pub test_id: Option<String>,
    pub date: NaiveDate,
    pub result: TestResult,
    pub odometer_value: Option<i64>,
    pub odometer_unit: Option<OdometerUnit>,
    pub odometer_result: OdometerResultType,
    pub expiry_date: Option<NaiveDate>,
    pub defects: Vec<DefectObservation>,
}

impl InspectionRecord {
    /// Odometer reading normalized to miles, when the reading is resolvable.
    pub fn miles(&self) -> Option<i64> {
        if self.odometer_result != OdometerResultType::Read {
            return None;
        }
        let value = self.odometer_value?;
        match self.odometer_unit.unwrap_or(OdometerUnit::Miles) {
            OdometerUnit::Miles => Some(value),
            OdometerUnit::Kilometres => Some(kilometres_to_miles(value)),
        }
    }

    pub fn has_dangerous_defect(&self) -> bool {
        self.defects
            .iter()
            .any(|defect| defect.severity == DefectSeverity::Dangerous)
    }

    pub fn advisory_count(&self) -> usize {
        self.defects
            .iter()
            .filter(|defect| defect.severity == DefectSeverity::Advisory)
            .count()
    }
}

pub(crate) const KM_TO_MILES: f64 = 0.621_371;

pub(crate) fn kilometres_to_miles(km: i64) -> i64 {
    (km as f64 * KM_TO_MILES).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    Passed,
    Failed,
    Unknown,
}

impl TestResult {
    pub const fn label(self) -> &'static str {
        match self {
            TestResult::Passed => "PASSED",
            TestResult::Failed => "FAILED",
            TestResult::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OdometerUnit {
    Miles,
    Kilometres,
}

impl OdometerUnit {
    pub const fn label(self) -> &'static str {
        match self {
            OdometerUnit::Miles => "mi",
            OdometerUnit::Kilometres => "km",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OdometerResultType {
    Read,
    Unreadable,
    NoOdometer,
}

/// One defect or advisory item observed during a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectObservation {
    pub text: String,
    pub severity: DefectSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectSeverity {
    Advisory,
    Minor,
    Major,
    Dangerous,
}

impl DefectSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            DefectSeverity::Advisory => "ADVISORY",
            DefectSeverity::Minor => "MINOR",
            DefectSeverity::Major => "MAJOR",
            DefectSeverity::Dangerous => "DANGEROUS",
        }
    }

    /// Advisories are observations, not failures.
    pub const fn is_failure(self) -> bool {
        !matches!(self, DefectSeverity::Advisory)
    }
}
