use crate::engine::domain::{DefectSeverity, InspectionRecord, VehicleSnapshot};
use crate::engine::mileage::MileageTimeline;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Cutoffs for usage classification and V5C recency.
#[derive(Debug, Clone)]
pub struct StatsThresholds {
    pub below_average_max: f64,
    pub average_max: f64,
    pub recent_v5c_days: i64,
}

impl Default for StatsThresholds {
    fn default() -> Self {
        Self {
            below_average_max: 5_000.0,
            average_max: 10_000.0,
            recent_v5c_days: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MileageAssessment {
    BelowAverage,
    Average,
    High,
}

impl MileageAssessment {
    pub const fn label(self) -> &'static str {
        match self {
            MileageAssessment::BelowAverage => "Below average mileage",
            MileageAssessment::Average => "Average mileage",
            MileageAssessment::High => "High mileage",
        }
    }
}

/// Descriptive facts about the vehicle derived from the snapshot and the
/// inspection history. Purely informational; nothing here feeds the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStats {
    pub age_years: Option<i32>,
    pub year_of_manufacture: Option<i32>,
    pub mot_expiry_date: Option<NaiveDate>,
    pub mot_days_remaining: Option<i64>,
    pub mot_expiry_detail: Option<String>,
    pub tax_due_date: Option<NaiveDate>,
    pub tax_days_remaining: Option<i64>,
    pub tax_due_detail: Option<String>,
    pub v5c_issued_date: Option<NaiveDate>,
    pub v5c_recently_issued: Option<bool>,
    pub v5c_insight: Option<String>,
    pub estimated_annual_mileage: Option<i64>,
    pub total_recorded_mileage: Option<i64>,
    pub mileage_readings: usize,
    pub mileage_assessment: Option<MileageAssessment>,
    pub advisory_items: usize,
    pub minor_items: usize,
    pub major_items: usize,
    pub dangerous_items: usize,
    pub failure_items: usize,
}

pub fn derive_stats(
    snapshot: &VehicleSnapshot,
    records: &[InspectionRecord],
    timeline: &MileageTimeline,
    thresholds: &StatsThresholds,
    today: NaiveDate,
) -> VehicleStats {
    let age_years = snapshot
        .year_of_manufacture
        .map(|year| (today.year() - year).max(0));

    let (mot_days_remaining, mot_expiry_detail) =
        expiry_countdown(snapshot.mot_expiry_date, today, "Expires", "Valid for");
    let (tax_days_remaining, tax_due_detail) =
        expiry_countdown(snapshot.tax_due_date, today, "Due", "Taxed for");

    let (v5c_recently_issued, v5c_insight) = match snapshot.date_of_last_v5c_issued {
        Some(issued) => {
            let days_ago = (today - issued).num_days();
            let recent = days_ago >= 0 && days_ago <= thresholds.recent_v5c_days;
            let insight = if recent {
                format!(
                    "V5C issued {} days ago; a recent logbook can indicate a change of keeper",
                    days_ago
                )
            } else {
                format!("V5C last issued {}", issued)
            };
            (Some(recent), Some(insight))
        }
        None => (None, None),
    };

    let estimated_annual_mileage = annual_mileage(timeline);
    let total_recorded_mileage = timeline.last().map(|point| point.miles);
    let mileage_assessment = estimated_annual_mileage.map(|annual| {
        if (annual as f64) < thresholds.below_average_max {
            MileageAssessment::BelowAverage
        } else if (annual as f64) <= thresholds.average_max {
            MileageAssessment::Average
        } else {
            MileageAssessment::High
        }
    });

    let mut advisory_items = 0;
    let mut minor_items = 0;
    let mut major_items = 0;
    let mut dangerous_items = 0;
    for record in records {
        for defect in &record.defects {
            match defect.severity {
                DefectSeverity::Advisory => advisory_items += 1,
                DefectSeverity::Minor => minor_items += 1,
                DefectSeverity::Major => major_items += 1,
                DefectSeverity::Dangerous => dangerous_items += 1,
            }
        }
    }

    VehicleStats {
        age_years,
        year_of_manufacture: snapshot.year_of_manufacture,
        mot_expiry_date: snapshot.mot_expiry_date,
        mot_days_remaining,
        mot_expiry_detail,
        tax_due_date: snapshot.tax_due_date,
        tax_days_remaining,
        tax_due_detail,
        v5c_issued_date: snapshot.date_of_last_v5c_issued,
        v5c_recently_issued,
        v5c_insight,
        estimated_annual_mileage,
        total_recorded_mileage,
        mileage_readings: timeline.points().len(),
        mileage_assessment,
        advisory_items,
        minor_items,
        major_items,
        dangerous_items,
        failure_items: minor_items + major_items + dangerous_items,
    }
}

/// Average miles per year over the full timeline. Undefined when the span is
/// under a calendar year; a short window would extrapolate wildly.
fn annual_mileage(timeline: &MileageTimeline) -> Option<i64> {
    if !timeline.sufficient() {
        return None;
    }
    let span_days = timeline.span_days()?;
    if span_days < 365 {
        return None;
    }

    let first = timeline.first()?;
    let last = timeline.last()?;
    let delta = (last.miles - first.miles).max(0) as f64;
    Some((delta / (span_days as f64 / 365.25)).round() as i64)
}

fn expiry_countdown(
    date: Option<NaiveDate>,
    today: NaiveDate,
    near_verb: &str,
    far_verb: &str,
) -> (Option<i64>, Option<String>) {
    let Some(date) = date else {
        return (None, None);
    };

    let days = (date - today).num_days();
    let detail = if days < 0 {
        format!("Expired {} days ago", -days)
    } else if days == 0 {
        format!("{} today", near_verb)
    } else if days <= 60 {
        format!("{} in {} days", near_verb, days)
    } else {
        format!("{} {} days", far_verb, days)
    };

    (Some(days), Some(detail))
}
