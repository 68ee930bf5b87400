use crate::engine::compliance::ZoneCompliance;
use crate::engine::domain::{DefectSeverity, TestResult, VehicleSnapshot};
use crate::engine::mileage::{ClockingAssessment, MileagePoint};
use crate::engine::patterns::FailurePattern;
use crate::engine::stats::VehicleStats;
use crate::engine::tax::TaxBand;
use chrono::NaiveDate;
use serde::Serialize;

/// Coarse banding of the 0-100 condition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=100 => Self::Good,
            50..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestTestView {
    pub date: NaiveDate,
    pub result: TestResult,
    pub result_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_miles: Option<i64>,
}

/// Headline counts over the full test history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotSummary {
    pub registration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    pub total_tests: usize,
    pub total_passes: usize,
    pub total_failures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_test: Option<LatestTestView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_odometer: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectItemView {
    pub text: String,
    pub severity: DefectSeverity,
    pub severity_label: &'static str,
}

/// One test rendered for the report, defects split by class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionView {
    pub test_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    pub date: NaiveDate,
    pub result: TestResult,
    pub result_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_miles: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub advisories: Vec<DefectItemView>,
    pub failures: Vec<DefectItemView>,
    pub dangerous: Vec<DefectItemView>,
    pub total_defects: usize,
}

/// The full analysis for one vehicle, assembled by the engine and serialized
/// as-is by the API layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub registration: String,
    pub vehicle: VehicleSnapshot,
    pub mot_summary: MotSummary,
    pub clocking_analysis: ClockingAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_band: Option<ScoreBand>,
    pub mileage_timeline: Vec<MileagePoint>,
    pub failure_patterns: Vec<FailurePattern>,
    pub inspections: Vec<InspectionView>,
    pub ulez_compliance: ZoneCompliance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_calculation: Option<TaxBand>,
    pub vehicle_stats: VehicleStats,
    pub generated_on: NaiveDate,
}
