use crate::engine::domain::{InspectionRecord, TestResult, VehicleSnapshot};
use crate::engine::mileage::{ClockingAssessment, FlagSeverity};
use crate::engine::patterns::FailurePattern;
use chrono::NaiveDate;

/// Deduction schedule for the 0-100 condition score.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub failed_test_penalty: i32,
    pub dangerous_record_penalty: i32,
    pub advisory_penalty: i32,
    /// Advisories up to this total are free.
    pub advisory_allowance: usize,
    pub invalid_mot_penalty: i32,
    pub clocked_penalty: i32,
    /// Applied per medium clocking flag when the vehicle is not clocked.
    pub medium_flag_penalty: i32,
    /// Per pattern: (occurrences - 1) * this.
    pub pattern_repeat_penalty: i32,
    pub pattern_penalty_cap: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            failed_test_penalty: 3,
            dangerous_record_penalty: 8,
            advisory_penalty: 1,
            advisory_allowance: 3,
            invalid_mot_penalty: 10,
            clocked_penalty: 15,
            medium_flag_penalty: 5,
            pattern_repeat_penalty: 2,
            pattern_penalty_cap: 20,
        }
    }
}

/// Combine pass/fail history, defect severity, clocking risk, and recurring
/// faults into one clamped 0-100 score. Deterministic for identical inputs;
/// `None` when there is no test history to judge.
pub fn condition_score(
    snapshot: &VehicleSnapshot,
    records: &[InspectionRecord],
    clocking: &ClockingAssessment,
    patterns: &[FailurePattern],
    weights: &ScoringWeights,
    today: NaiveDate,
) -> Option<u8> {
    if records.is_empty() {
        return None;
    }

    let mut score: i32 = 100;

    let failures = records
        .iter()
        .filter(|record| record.result == TestResult::Failed)
        .count() as i32;
    score -= failures * weights.failed_test_penalty;

    let dangerous_records = records
        .iter()
        .filter(|record| record.has_dangerous_defect())
        .count() as i32;
    score -= dangerous_records * weights.dangerous_record_penalty;

    let total_advisories: usize = records.iter().map(InspectionRecord::advisory_count).sum();
    let excess_advisories = total_advisories.saturating_sub(weights.advisory_allowance) as i32;
    score -= excess_advisories * weights.advisory_penalty;

    if snapshot.mot_valid_on(today) == Some(false) {
        score -= weights.invalid_mot_penalty;
    }

    if clocking.clocked {
        score -= weights.clocked_penalty;
    } else {
        let medium_flags = clocking
            .flags
            .iter()
            .filter(|flag| flag.severity == FlagSeverity::Medium)
            .count() as i32;
        score -= medium_flags * weights.medium_flag_penalty;
    }

    let pattern_penalty: i32 = patterns
        .iter()
        .map(|pattern| (pattern.occurrences.saturating_sub(1)) as i32 * weights.pattern_repeat_penalty)
        .sum();
    score -= pattern_penalty.min(weights.pattern_penalty_cap);

    Some(score.clamp(0, 100) as u8)
}
