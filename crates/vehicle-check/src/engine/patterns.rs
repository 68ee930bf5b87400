use crate::engine::domain::{DefectSeverity, InspectionRecord};
use serde::Serialize;

/// Controlled vocabulary for recurring-fault clustering. Raw defect text is
/// matched against keyword lists; the first matching category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCategory {
    Brakes,
    Tyres,
    Suspension,
    Steering,
    Lighting,
    Emissions,
    Bodywork,
    Visibility,
    Restraints,
}

impl DefectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            DefectCategory::Brakes => "brakes",
            DefectCategory::Tyres => "tyres",
            DefectCategory::Suspension => "suspension",
            DefectCategory::Steering => "steering",
            DefectCategory::Lighting => "lighting",
            DefectCategory::Emissions => "emissions",
            DefectCategory::Bodywork => "bodywork",
            DefectCategory::Visibility => "visibility",
            DefectCategory::Restraints => "restraints",
        }
    }
}

/// Keyword table mapping raw defect text into the fixed vocabulary.
#[derive(Debug, Clone)]
pub struct DefectVocabulary {
    entries: &'static [(DefectCategory, &'static [&'static str])],
}

const STANDARD_VOCABULARY: &[(DefectCategory, &[&str])] = &[
    (DefectCategory::Brakes, &["brake", "abs"]),
    (DefectCategory::Tyres, &["tyre", "tire", "tread"]),
    (
        DefectCategory::Suspension,
        &["suspension", "shock absorber", "coil spring", "anti-roll"],
    ),
    (
        DefectCategory::Steering,
        &["steering", "track rod", "ball joint"],
    ),
    (
        DefectCategory::Lighting,
        &["lamp", "headlight", "indicator", "light"],
    ),
    (
        DefectCategory::Emissions,
        &["emission", "exhaust", "catalytic", "smoke"],
    ),
    (
        DefectCategory::Bodywork,
        &["corrosion", "corroded", "rust", "sill", "body"],
    ),
    (
        DefectCategory::Visibility,
        &["windscreen", "wiper", "washer", "mirror", "view of the road"],
    ),
    (
        DefectCategory::Restraints,
        &["seat belt", "seatbelt", "airbag"],
    ),
];

impl DefectVocabulary {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_VOCABULARY,
        }
    }

    fn categorise(&self, text: &str) -> Option<DefectCategory> {
        let lowered = text.to_lowercase();
        for (category, keywords) in self.entries {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return Some(*category);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    Low,
    Medium,
    High,
}

/// A defect category seen at least twice across the history. A single
/// occurrence is noise, not a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailurePattern {
    pub category: DefectCategory,
    pub occurrences: usize,
    pub concern_level: ConcernLevel,
}

#[derive(Default)]
struct CategoryTally {
    count: usize,
    dangerous: bool,
    major: bool,
}

/// Cluster failure defects (advisories excluded) across the full history.
pub fn analyze_failure_patterns(
    records: &[InspectionRecord],
    vocabulary: &DefectVocabulary,
) -> Vec<FailurePattern> {
    let mut tallies: Vec<(DefectCategory, CategoryTally)> = Vec::new();

    for record in records {
        for defect in &record.defects {
            if !defect.severity.is_failure() {
                continue;
            }
            let Some(category) = vocabulary.categorise(&defect.text) else {
                continue;
            };

            let index = match tallies.iter().position(|(c, _)| *c == category) {
                Some(index) => index,
                None => {
                    tallies.push((category, CategoryTally::default()));
                    tallies.len() - 1
                }
            };
            let tally = &mut tallies[index].1;
            tally.count += 1;
            tally.dangerous |= defect.severity == DefectSeverity::Dangerous;
            tally.major |= defect.severity == DefectSeverity::Major;
        }
    }

    let mut patterns: Vec<FailurePattern> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.count >= 2)
        .map(|(category, tally)| FailurePattern {
            category,
            occurrences: tally.count,
            concern_level: concern_level(&tally),
        })
        .collect();

    patterns.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    patterns
}

fn concern_level(tally: &CategoryTally) -> ConcernLevel {
    if tally.dangerous || tally.count >= 4 {
        ConcernLevel::High
    } else if tally.major || tally.count >= 3 {
        ConcernLevel::Medium
    } else {
        ConcernLevel::Low
    }
}
