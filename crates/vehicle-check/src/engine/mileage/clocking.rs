use super::timeline::MileageTimeline;
use chrono::NaiveDate;
use serde::Serialize;

/// Tuning for the anomaly rules. Defaults reflect UK norms (~7,400 miles a
/// year average) and the common fail/retest odometer jitter.
#[derive(Debug, Clone)]
pub struct ClockingThresholds {
    /// Drops larger than this are flagged high rather than medium.
    pub major_drop_miles: i64,
    /// Identical readings further apart than this raise a no-change flag.
    pub stagnant_days: i64,
    /// Sustained annualised rate above this is implausible.
    pub max_annual_miles: f64,
    /// A gain of this many miles inside `burst_window_days` is implausible.
    pub burst_miles: i64,
    pub burst_window_days: i64,
    /// Drops below this within `retest_window_days` are retest noise, not
    /// rollbacks. Set to 0 to disable.
    pub retest_drop_tolerance_miles: i64,
    pub retest_window_days: i64,
    pub uk_average_annual_miles: f64,
    /// Fraction of the UK average below which usage looks suspiciously low.
    pub low_usage_fraction: f64,
    /// Low-usage flag only applies once total mileage passes this floor.
    pub low_usage_floor_miles: i64,
}

impl Default for ClockingThresholds {
    fn default() -> Self {
        Self {
            major_drop_miles: 1_000,
            stagnant_days: 180,
            max_annual_miles: 40_000.0,
            burst_miles: 3_000,
            burst_window_days: 7,
            retest_drop_tolerance_miles: 200,
            retest_window_days: 14,
            uk_average_annual_miles: 7_400.0,
            low_usage_fraction: 0.3,
            low_usage_floor_miles: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    MileageDrop,
    NoChange,
    ImplausibleJump,
    SuspiciouslyLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockingFlag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub severity: FlagSeverity,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_amount: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Unknown,
}

/// Outcome of the mileage anomaly walk. `risk_level == Unknown` means the
/// history could not be analysed at all; it is never a clean verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockingAssessment {
    pub clocked: bool,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub flags: Vec<ClockingFlag>,
}

impl ClockingAssessment {
    fn insufficient() -> Self {
        Self {
            clocked: false,
            risk_level: RiskLevel::Unknown,
            reason: Some("Insufficient test history for mileage analysis".to_string()),
            flags: Vec::new(),
        }
    }
}

/// Walk consecutive timeline pairs and aggregate anomaly flags into a risk
/// verdict. `clocked` is true iff at least one mileage drop survives the
/// retest tolerance.
pub fn detect_clocking(
    timeline: &MileageTimeline,
    thresholds: &ClockingThresholds,
) -> ClockingAssessment {
    if !timeline.sufficient() {
        return ClockingAssessment::insufficient();
    }

    let points = timeline.points();
    let mut flags = Vec::new();

    for pair in points.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let delta = next.miles - prev.miles;
        let elapsed_days = (next.date - prev.date).num_days();

        if delta < 0 {
            let drop = -delta;
            if drop < thresholds.retest_drop_tolerance_miles
                && elapsed_days.abs() <= thresholds.retest_window_days
            {
                continue;
            }

            let severity = if drop > thresholds.major_drop_miles {
                FlagSeverity::High
            } else {
                FlagSeverity::Medium
            };
            flags.push(ClockingFlag {
                kind: FlagKind::MileageDrop,
                severity,
                detail: format!(
                    "Mileage dropped from {} to {} miles ({} mile drop)",
                    prev.miles, next.miles, drop
                ),
                from_date: Some(prev.date),
                to_date: Some(next.date),
                drop_amount: Some(drop),
            });
            continue;
        }

        if delta == 0 {
            if elapsed_days > thresholds.stagnant_days {
                flags.push(ClockingFlag {
                    kind: FlagKind::NoChange,
                    severity: FlagSeverity::Low,
                    detail: format!(
                        "Odometer unchanged at {} miles over {} days",
                        next.miles, elapsed_days
                    ),
                    from_date: Some(prev.date),
                    to_date: Some(next.date),
                    drop_amount: None,
                });
            }
            continue;
        }

        let burst = delta > thresholds.burst_miles && elapsed_days < thresholds.burst_window_days;
        let sustained = elapsed_days > 0
            && annualised(delta, elapsed_days) > thresholds.max_annual_miles;
        if burst || sustained {
            flags.push(ClockingFlag {
                kind: FlagKind::ImplausibleJump,
                severity: FlagSeverity::Medium,
                detail: format!(
                    "Mileage increased by {} miles in {} days (~{:.0} miles/year annualised)",
                    delta,
                    elapsed_days,
                    annualised(delta, elapsed_days.max(1))
                ),
                from_date: Some(prev.date),
                to_date: Some(next.date),
                drop_amount: None,
            });
        }
    }

    if let Some(flag) = low_usage_flag(timeline, thresholds) {
        flags.push(flag);
    }

    let clocked = flags.iter().any(|flag| flag.kind == FlagKind::MileageDrop);
    let risk_level = if clocked {
        RiskLevel::High
    } else {
        match flags.iter().map(|flag| flag.severity).max() {
            Some(FlagSeverity::High) => RiskLevel::High,
            Some(FlagSeverity::Medium) => RiskLevel::Medium,
            Some(FlagSeverity::Low) => RiskLevel::Low,
            None => RiskLevel::None,
        }
    };

    ClockingAssessment {
        clocked,
        risk_level,
        reason: None,
        flags,
    }
}

fn annualised(delta: i64, elapsed_days: i64) -> f64 {
    delta as f64 / (elapsed_days as f64 / 365.25)
}

fn low_usage_flag(
    timeline: &MileageTimeline,
    thresholds: &ClockingThresholds,
) -> Option<ClockingFlag> {
    let first = timeline.first()?;
    let last = timeline.last()?;
    let days = (last.date - first.date).num_days();
    if days <= 0 {
        return None;
    }

    let avg_annual = annualised(last.miles - first.miles, days);
    if avg_annual < thresholds.uk_average_annual_miles * thresholds.low_usage_fraction
        && last.miles > thresholds.low_usage_floor_miles
    {
        return Some(ClockingFlag {
            kind: FlagKind::SuspiciouslyLow,
            severity: FlagSeverity::Low,
            detail: format!(
                "Average {:.0} miles/year is well below the UK average of {:.0} miles/year",
                avg_annual, thresholds.uk_average_annual_miles
            ),
            from_date: Some(first.date),
            to_date: Some(last.date),
            drop_amount: None,
        });
    }

    None
}
