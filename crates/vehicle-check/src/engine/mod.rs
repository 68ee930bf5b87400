//! Vehicle history analysis: a pure, synchronous rule pipeline.
//!
//! The engine holds its rule tables and thresholds; callers supply the
//! normalized vehicle snapshot, the inspection history, and the reference
//! date. Identical inputs always produce identical reports.

pub mod compliance;
pub mod domain;
pub mod mileage;
pub mod normalizer;
pub mod patterns;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod tax;

#[cfg(test)]
mod tests;

pub use compliance::{
    evaluate_compliance, ComplianceStatus, ZoneCompliance, ZoneComplianceResult, ZoneTable,
};
pub use domain::{
    DefectObservation, DefectSeverity, FuelCategory, InspectionRecord, OdometerResultType,
    OdometerUnit, TestResult, VehicleSnapshot,
};
pub use mileage::{
    detect_clocking, ClockingAssessment, ClockingThresholds, MileageTimeline, RiskLevel,
};
pub use normalizer::{
    normalize, NormalizationError, RawDefect, RawMotHistory, RawMotTest, RawVehicleRecord,
};
pub use patterns::{analyze_failure_patterns, DefectVocabulary, FailurePattern};
pub use report::{ScoreBand, VehicleReport};
pub use scoring::{condition_score, ScoringWeights};
pub use stats::{derive_stats, StatsThresholds, VehicleStats};
pub use tax::{calculate_tax, TaxBand, TaxSchedule};

use chrono::NaiveDate;

/// Tunable thresholds for the individual analysis stages.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub clocking: ClockingThresholds,
    pub scoring: ScoringWeights,
    pub stats: StatsThresholds,
}

/// The analysis pipeline with its static rule tables bound in.
#[derive(Debug, Clone)]
pub struct HistoryAnalysisEngine {
    config: EngineConfig,
    zones: ZoneTable,
    tax: TaxSchedule,
    vocabulary: DefectVocabulary,
}

impl Default for HistoryAnalysisEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl HistoryAnalysisEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            zones: ZoneTable::standard(),
            tax: TaxSchedule::standard(),
            vocabulary: DefectVocabulary::standard(),
        }
    }

    /// Run every analysis stage and assemble the report. `records` must be
    /// chronological, oldest first, as produced by [`normalize`].
    pub fn analyze(
        &self,
        snapshot: &VehicleSnapshot,
        records: &[InspectionRecord],
        today: NaiveDate,
    ) -> VehicleReport {
        let timeline = MileageTimeline::build(records);
        let clocking = detect_clocking(&timeline, &self.config.clocking);
        let patterns = analyze_failure_patterns(records, &self.vocabulary);
        let score = condition_score(
            snapshot,
            records,
            &clocking,
            &patterns,
            &self.config.scoring,
            today,
        );

        tracing::info!(
            registration = %snapshot.registration,
            tests = records.len(),
            risk = ?clocking.risk_level,
            score = ?score,
            "vehicle history analyzed"
        );

        VehicleReport {
            registration: snapshot.registration.clone(),
            mot_summary: report::build_mot_summary(snapshot, records),
            clocking_analysis: clocking,
            condition_score: score,
            condition_band: score.map(ScoreBand::for_score),
            mileage_timeline: timeline.points().to_vec(),
            failure_patterns: patterns,
            inspections: report::inspection_views(records),
            ulez_compliance: evaluate_compliance(snapshot, &self.zones),
            tax_calculation: calculate_tax(snapshot, &self.tax),
            vehicle_stats: derive_stats(snapshot, records, &timeline, &self.config.stats, today),
            vehicle: snapshot.clone(),
            generated_on: today,
        }
    }
}
